//! mathcontent CLI - content block to HTML rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use mathcontent::{
    lines_to_json, parse_file, JsonFormat, LatexMode, LineRenderer, RenderOptions, RenderStats,
};

#[derive(Parser)]
#[command(name = "mathcontent")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render text, LaTeX and image blocks to HTML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON block document to HTML
    Render {
        /// Input JSON document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        renderer: RendererArgs,

        /// Print rendering statistics
        #[arg(long)]
        stats: bool,
    },

    /// Show how blocks are grouped into lines
    Lines {
        /// Input JSON document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct RendererArgs {
    /// Directory image blocks are resolved against
    #[arg(long, value_name = "DIR", env = "MATHCONTENT_SRC_DIR")]
    src_dir: Option<PathBuf>,

    /// Directory generated and copied images are written to
    #[arg(long, value_name = "DIR", env = "MATHCONTENT_DEST_DIR")]
    dest_dir: Option<PathBuf>,

    /// Prefix for image links in the output
    #[arg(long, value_name = "URL", env = "MATHCONTENT_REFERENCE_URL")]
    reference_url: Option<String>,

    /// LaTeX-to-markup service endpoint
    #[arg(long, value_name = "URL", env = "MATHCONTENT_MARKUP_ENDPOINT")]
    markup_endpoint: Option<String>,

    /// LaTeX-to-image service endpoint
    #[arg(long, value_name = "URL", env = "MATHCONTENT_IMAGE_ENDPOINT")]
    image_endpoint: Option<String>,

    /// Render LaTeX as markup instead of images
    #[arg(long)]
    markup: bool,

    /// Generate a new image for every LaTeX block, even repeated ones
    #[arg(long)]
    no_reuse: bool,
}

impl RendererArgs {
    fn to_options(&self) -> RenderOptions {
        let mut options = RenderOptions::new()
            .with_latex_mode(if self.markup {
                LatexMode::Markup
            } else {
                LatexMode::Image
            })
            .with_reuse_images(!self.no_reuse);

        if let Some(ref dir) = self.src_dir {
            options = options.with_source_dir(dir);
        }
        if let Some(ref dir) = self.dest_dir {
            options = options.with_dest_dir(dir);
        }
        if let Some(ref url) = self.reference_url {
            options = options.with_reference_url(url);
        }
        if let Some(ref endpoint) = self.markup_endpoint {
            options = options.with_markup_endpoint(endpoint);
        }
        if let Some(ref endpoint) = self.image_endpoint {
            options = options.with_image_endpoint(endpoint);
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            renderer,
            stats,
        }) => cmd_render(&input, output.as_deref(), &renderer, stats),
        Some(Commands::Lines {
            input,
            output,
            compact,
        }) => cmd_lines(&input, output.as_deref(), compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: mathcontent render <FILE> [OPTIONS]".yellow());
            println!("       mathcontent --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    args: &RendererArgs,
    show_stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options();
    options.validate()?;

    // Validate every block before touching the network or filesystem
    let doc = parse_file(input)?;
    log::info!("Loaded {} blocks from {}", doc.len(), input.display());

    if let Some(ref dest) = options.dest_image_dir {
        fs::create_dir_all(dest)?;
    }

    let mut renderer = LineRenderer::new(options)?;
    let result = renderer.render_with_stats(&doc.blocks)?;

    if let Some(path) = output {
        fs::write(path, &result.html)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", result.html);
    }

    if show_stats {
        print_stats(&result.stats);
    }

    Ok(())
}

fn print_stats(stats: &RenderStats) {
    eprintln!();
    eprintln!("{}", "Rendering Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Paragraphs".bold(), stats.line_count);
    eprintln!("{}: {}", "Text blocks".bold(), stats.text_count);
    eprintln!("{}: {}", "LaTeX blocks".bold(), stats.latex_count);
    eprintln!("{}: {}", "Images generated".bold(), stats.generated_image_count);
    eprintln!("{}: {}", "Images reused".bold(), stats.cache_hit_count);
    eprintln!("{}: {}", "Markup requests".bold(), stats.markup_call_count);
    eprintln!("{}: {}", "Images copied".bold(), stats.copied_file_count);
}

fn cmd_lines(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = lines_to_json(&doc.lines(), format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mathcontent".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Content block to HTML rendering tool");
    println!();
    println!("License: MIT");
}
