pub mod block;
pub mod chunk;
pub mod error;
pub mod level;
pub mod version;

pub use error::{DataBuildError, DataError};

/// Section edge length; a section is a SECTION_SIZE^3 cube of blocks.
pub const SECTION_SIZE: usize = 16;
/// Number of blocks in one section.
pub const SECTION_VOLUME: usize = SECTION_SIZE * SECTION_SIZE * SECTION_SIZE;
/// Nibble-packed per-block arrays hold half a byte per block.
pub const SECTION_NIBBLE_VOLUME: usize = SECTION_VOLUME / 2;
/// Sections per chunk column.
pub const SECTIONS_PER_CHUNK: usize = 16;
