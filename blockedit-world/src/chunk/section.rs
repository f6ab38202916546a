use crate::error::DataError;
use crate::{SECTION_NIBBLE_VOLUME, SECTION_VOLUME};

/// Light value meaning "fully lit", the fill for freshly made sections.
pub const FULLY_LIT: u8 = 0xFF;

/// One 16x16x16 slab of a chunk column.
///
/// `blocks` holds one byte per block; `add` is the optional high-nibble
/// extension for block ids above 255; `data`, `block_light` and
/// `sky_light` are nibble-packed, half a byte per block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    y: u8,
    blocks: Box<[u8; SECTION_VOLUME]>,
    add: Option<Box<[u8; SECTION_VOLUME]>>,
    data: Box<[u8; SECTION_NIBBLE_VOLUME]>,
    block_light: Box<[u8; SECTION_NIBBLE_VOLUME]>,
    sky_light: Box<[u8; SECTION_NIBBLE_VOLUME]>,
}

impl Section {
    pub fn builder() -> SectionBuilder {
        SectionBuilder::default()
    }

    /// An air-filled section: zero blocks and data, light at [`FULLY_LIT`].
    pub fn empty(y: u8) -> Section {
        Section {
            y,
            blocks: Box::new([0; SECTION_VOLUME]),
            add: None,
            data: Box::new([0; SECTION_NIBBLE_VOLUME]),
            block_light: Box::new([FULLY_LIT; SECTION_NIBBLE_VOLUME]),
            sky_light: Box::new([FULLY_LIT; SECTION_NIBBLE_VOLUME]),
        }
    }

    /// A section with every block and data byte set to `id`.
    pub fn filled(y: u8, id: u8) -> Section {
        Section {
            y,
            blocks: Box::new([id; SECTION_VOLUME]),
            add: None,
            data: Box::new([id; SECTION_NIBBLE_VOLUME]),
            block_light: Box::new([FULLY_LIT; SECTION_NIBBLE_VOLUME]),
            sky_light: Box::new([FULLY_LIT; SECTION_NIBBLE_VOLUME]),
        }
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn blocks(&self) -> &[u8; SECTION_VOLUME] {
        &self.blocks
    }

    pub fn additional_block_data(&self) -> Option<&[u8; SECTION_VOLUME]> {
        self.add.as_deref()
    }

    pub fn data(&self) -> &[u8; SECTION_NIBBLE_VOLUME] {
        &self.data
    }

    pub fn block_light(&self) -> &[u8; SECTION_NIBBLE_VOLUME] {
        &self.block_light
    }

    pub fn sky_light(&self) -> &[u8; SECTION_NIBBLE_VOLUME] {
        &self.sky_light
    }
}

#[derive(Debug, Default)]
pub struct SectionBuilder {
    y: u8,
    blocks: Option<Box<[u8; SECTION_VOLUME]>>,
    add: Option<Box<[u8; SECTION_VOLUME]>>,
    data: Option<Box<[u8; SECTION_NIBBLE_VOLUME]>>,
    block_light: Option<Box<[u8; SECTION_NIBBLE_VOLUME]>>,
    sky_light: Option<Box<[u8; SECTION_NIBBLE_VOLUME]>>,
}

fn sized<const N: usize>(bytes: Vec<u8>) -> Result<Box<[u8; N]>, DataError> {
    let actual = bytes.len();
    <Box<[u8; N]>>::try_from(bytes.into_boxed_slice()).map_err(|_| DataError::BadArrayLength {
        expected: N,
        actual,
    })
}

impl SectionBuilder {
    pub fn y(mut self, y: u8) -> Self {
        self.y = y;
        self
    }

    pub fn blocks(mut self, blocks: Vec<u8>) -> Result<Self, DataError> {
        self.blocks = Some(sized(blocks)?);
        Ok(self)
    }

    pub fn add(mut self, add: Vec<u8>) -> Result<Self, DataError> {
        self.add = Some(sized(add)?);
        Ok(self)
    }

    pub fn data(mut self, data: Vec<u8>) -> Result<Self, DataError> {
        self.data = Some(sized(data)?);
        Ok(self)
    }

    pub fn block_light(mut self, block_light: Vec<u8>) -> Result<Self, DataError> {
        self.block_light = Some(sized(block_light)?);
        Ok(self)
    }

    pub fn sky_light(mut self, sky_light: Vec<u8>) -> Result<Self, DataError> {
        self.sky_light = Some(sized(sky_light)?);
        Ok(self)
    }

    pub fn build(self) -> Section {
        Section {
            y: self.y,
            blocks: self.blocks.unwrap_or_else(|| Box::new([0; SECTION_VOLUME])),
            add: self.add,
            data: self
                .data
                .unwrap_or_else(|| Box::new([0; SECTION_NIBBLE_VOLUME])),
            block_light: self
                .block_light
                .unwrap_or_else(|| Box::new([0; SECTION_NIBBLE_VOLUME])),
            sky_light: self
                .sky_light
                .unwrap_or_else(|| Box::new([0; SECTION_NIBBLE_VOLUME])),
        }
    }
}
