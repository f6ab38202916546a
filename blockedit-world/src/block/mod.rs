use std::path::PathBuf;

use crate::error::{DataBuildError, DataError};

pub mod registry;
pub mod storage;

pub use registry::{BlockRegistry, BlockType};
pub use storage::{read_block, read_block_file, write_block, write_block_file};

/// Ids below this limit belong to the vanilla block range; everything else
/// is a modded block.
pub const VANILLA_ID_LIMIT: i32 = 197;

/// One per-data-value sub-definition of a block, optionally carrying an
/// image reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockData {
    data_value: i32,
    image: Option<PathBuf>,
}

impl BlockData {
    pub fn builder() -> BlockDataBuilder {
        BlockDataBuilder::default()
    }

    pub fn data_value(&self) -> i32 {
        self.data_value
    }

    pub fn image(&self) -> Option<&PathBuf> {
        self.image.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct BlockDataBuilder {
    data_value: i32,
    image: Option<PathBuf>,
}

impl BlockDataBuilder {
    pub fn data_value(mut self, value: i32) -> Self {
        self.data_value = value;
        self
    }

    pub fn image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn build(self) -> Result<BlockData, DataError> {
        if self.data_value < 0 {
            return Err(DataError::NegativeDataValue(self.data_value));
        }
        Ok(BlockData {
            data_value: self.data_value,
            image: self.image,
        })
    }
}

/// One placeable block definition.
///
/// `modded` is derived from the id at build time and is not settable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    id: i32,
    name: String,
    display_name: String,
    modded: bool,
    data_values: Vec<BlockData>,
}

impl Block {
    pub fn builder() -> BlockBuilder {
        BlockBuilder::default()
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_modded(&self) -> bool {
        self.modded
    }

    pub fn data_values(&self) -> &[BlockData] {
        &self.data_values
    }

    /// Canonical file stem for a stored block definition, `<id>-<name>`.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.id, self.name)
    }
}

#[derive(Debug, Default)]
pub struct BlockBuilder {
    id: i32,
    name: Option<String>,
    display_name: Option<String>,
    data_values: Vec<BlockData>,
}

impl BlockBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn data_values(mut self, data_values: Vec<BlockData>) -> Self {
        self.data_values = data_values;
        self
    }

    pub fn build(self) -> Result<Block, DataBuildError> {
        let (Some(name), Some(display_name)) = (self.name, self.display_name) else {
            return Err(DataBuildError::MissingBlockNames);
        };
        Ok(Block {
            id: self.id,
            name,
            display_name,
            modded: !(0..VANILLA_ID_LIMIT).contains(&self.id),
            data_values: self.data_values,
        })
    }
}
