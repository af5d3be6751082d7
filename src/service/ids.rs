//! Identifier generation for generated image files.

use super::IdGenerator;
use uuid::Uuid;

/// Generates random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
