//! Property tests for line grouping.

use mathcontent::{group_into_lines, Block};
use proptest::prelude::*;

fn arb_block() -> impl Strategy<Value = Block> {
    let kind = prop_oneof![
        "[a-z ]{0,8}".prop_map(Block::text),
        "[a-z^_{}\\\\]{1,8}".prop_map(Block::latex),
        "[a-z]{1,6}\\.png".prop_map(Block::image),
    ];
    (kind, any::<bool>()).prop_map(|(block, inline)| block.with_inline(inline))
}

proptest! {
    #[test]
    fn lines_are_never_empty(blocks in prop::collection::vec(arb_block(), 1..40)) {
        let lines = group_into_lines(&blocks);
        prop_assert!(!lines.is_empty());
        for line in &lines {
            prop_assert!(!line.is_empty());
        }
    }

    #[test]
    fn concatenated_lines_equal_input(blocks in prop::collection::vec(arb_block(), 1..40)) {
        let lines = group_into_lines(&blocks);
        let flattened: Vec<Block> = lines
            .iter()
            .flat_map(|line| line.blocks().iter().map(|b| (*b).clone()))
            .collect();
        prop_assert_eq!(flattened, blocks);
    }

    #[test]
    fn first_line_starts_with_first_block(blocks in prop::collection::vec(arb_block(), 1..40)) {
        let lines = group_into_lines(&blocks);
        prop_assert!(std::ptr::eq(lines[0].first(), &blocks[0]));
    }

    #[test]
    fn only_non_inline_blocks_start_lines(blocks in prop::collection::vec(arb_block(), 1..40)) {
        let lines = group_into_lines(&blocks);
        let expected = 1 + blocks[1..].iter().filter(|b| !b.inline).count();
        prop_assert_eq!(lines.len(), expected);

        for line in lines.iter().skip(1) {
            prop_assert!(!line.first().inline);
        }
        for line in &lines {
            for block in &line.blocks()[1..] {
                prop_assert!(block.inline);
            }
        }
    }
}

#[test]
fn test_all_inline_is_one_line() {
    let blocks: Vec<Block> = (0..5).map(|i| Block::text(i.to_string()).inline()).collect();
    let lines = group_into_lines(&blocks);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].len(), 5);
}

#[test]
fn test_no_inline_is_one_line_per_block() {
    let blocks: Vec<Block> = (0..5).map(|i| Block::text(i.to_string())).collect();
    let lines = group_into_lines(&blocks);
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|line| line.len() == 1));
}
