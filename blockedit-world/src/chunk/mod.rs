use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::{DataBuildError, DataError};
use crate::SECTIONS_PER_CHUNK;

pub mod section;

pub use section::{Section, SectionBuilder, FULLY_LIT};

pub const BIOMES_LEN: usize = 256;
pub const HEIGHT_MAP_LEN: usize = 1024;

/// A 16x16-block column: up to 16 vertically stacked sections plus
/// per-column metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    sections: HashMap<u8, Section>,
    x_pos: i32,
    z_pos: i32,
    last_update: i64,
    light_populated: bool,
    terrain_populated: bool,
    inhabited_time: i64,
    biomes: Box<[u8; BIOMES_LEN]>,
    height_map: Box<[i32; HEIGHT_MAP_LEN]>,
}

impl Chunk {
    pub fn builder() -> ChunkBuilder {
        ChunkBuilder::default()
    }

    /// Looks up the section at vertical index `y`.
    ///
    /// A missing section inside the valid vertical range is synthesized as
    /// an empty section; indices outside the range report absence.
    pub fn section(&self, y: u8) -> Option<Cow<'_, Section>> {
        if let Some(section) = self.sections.get(&y) {
            return Some(Cow::Borrowed(section));
        }
        if (y as usize) < SECTIONS_PER_CHUNK {
            return Some(Cow::Owned(Section::empty(y)));
        }
        None
    }

    pub fn sections(&self) -> &HashMap<u8, Section> {
        &self.sections
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x_pos, self.z_pos)
    }

    /// The last-update timestamp, when one was recorded.
    pub fn last_update(&self) -> Option<i64> {
        (self.last_update > 0).then_some(self.last_update)
    }

    pub fn light_populated(&self) -> bool {
        self.light_populated
    }

    pub fn terrain_populated(&self) -> bool {
        self.terrain_populated
    }

    pub fn inhabited_time(&self) -> i64 {
        self.inhabited_time
    }

    pub fn biomes(&self) -> &[u8; BIOMES_LEN] {
        &self.biomes
    }

    pub fn height_map(&self) -> &[i32; HEIGHT_MAP_LEN] {
        &self.height_map
    }
}

#[derive(Debug)]
pub struct ChunkBuilder {
    sections: HashMap<u8, Section>,
    x_pos: Option<i32>,
    z_pos: Option<i32>,
    last_update: i64,
    light_populated: bool,
    terrain_populated: bool,
    inhabited_time: i64,
    biomes: Box<[u8; BIOMES_LEN]>,
    height_map: Box<[i32; HEIGHT_MAP_LEN]>,
}

impl Default for ChunkBuilder {
    fn default() -> Self {
        ChunkBuilder {
            sections: HashMap::new(),
            x_pos: None,
            z_pos: None,
            last_update: -1,
            light_populated: false,
            terrain_populated: false,
            inhabited_time: -1,
            biomes: Box::new([0; BIOMES_LEN]),
            height_map: Box::new([0; HEIGHT_MAP_LEN]),
        }
    }
}

impl ChunkBuilder {
    /// Registers a section under its own vertical index. Once the chunk
    /// holds 16 sections, further ones are ignored.
    pub fn add_section(mut self, section: Section) -> Self {
        if self.sections.len() < SECTIONS_PER_CHUNK {
            self.sections.insert(section.y(), section);
        }
        self
    }

    pub fn x_pos(mut self, x: i32) -> Self {
        self.x_pos = Some(x);
        self
    }

    pub fn z_pos(mut self, z: i32) -> Self {
        self.z_pos = Some(z);
        self
    }

    pub fn last_update(mut self, timestamp: i64) -> Self {
        self.last_update = timestamp;
        self
    }

    pub fn light_populated(mut self, populated: bool) -> Self {
        self.light_populated = populated;
        self
    }

    pub fn terrain_populated(mut self, populated: bool) -> Self {
        self.terrain_populated = populated;
        self
    }

    pub fn inhabited_time(mut self, ticks: i64) -> Self {
        self.inhabited_time = ticks;
        self
    }

    pub fn biomes(mut self, biomes: Vec<u8>) -> Result<Self, DataError> {
        let actual = biomes.len();
        self.biomes = <Box<[u8; BIOMES_LEN]>>::try_from(biomes.into_boxed_slice()).map_err(
            |_| DataError::BadArrayLength {
                expected: BIOMES_LEN,
                actual,
            },
        )?;
        Ok(self)
    }

    pub fn height_map(mut self, height_map: Vec<i32>) -> Result<Self, DataError> {
        let actual = height_map.len();
        self.height_map = <Box<[i32; HEIGHT_MAP_LEN]>>::try_from(height_map.into_boxed_slice())
            .map_err(|_| DataError::BadArrayLength {
                expected: HEIGHT_MAP_LEN,
                actual,
            })?;
        Ok(self)
    }

    pub fn build(self) -> Result<Chunk, DataBuildError> {
        if self.sections.is_empty() {
            return Err(DataBuildError::MissingChunkField);
        }
        let (Some(x_pos), Some(z_pos)) = (self.x_pos, self.z_pos) else {
            return Err(DataBuildError::MissingChunkField);
        };
        Ok(Chunk {
            sections: self.sections,
            x_pos,
            z_pos,
            last_update: self.last_update,
            light_populated: self.light_populated,
            terrain_populated: self.terrain_populated,
            inhabited_time: self.inhabited_time,
            biomes: self.biomes,
            height_map: self.height_map,
        })
    }
}
