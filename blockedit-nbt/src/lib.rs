use std::io::{self, Read, Write};
use std::ops::Deref;

use bytes::Bytes;
use thiserror::Error;

pub mod compound;
pub mod compress;
pub mod reader;
pub mod tag;
pub mod writer;

pub use compound::NbtCompound;
pub use compress::{read_gzip_nbt, write_gzip_nbt};
pub use reader::ReadAdaptor;
pub use tag::NbtTag;
pub use writer::WriteAdaptor;

pub const END_ID: u8 = 0x00;
pub const BYTE_ID: u8 = 0x01;
pub const SHORT_ID: u8 = 0x02;
pub const INT_ID: u8 = 0x03;
pub const LONG_ID: u8 = 0x04;
pub const FLOAT_ID: u8 = 0x05;
pub const DOUBLE_ID: u8 = 0x06;
pub const BYTE_ARRAY_ID: u8 = 0x07;
pub const STRING_ID: u8 = 0x08;
pub const LIST_ID: u8 = 0x09;
pub const COMPOUND_ID: u8 = 0x0A;
pub const INT_ARRAY_ID: u8 = 0x0B;
pub const LONG_ARRAY_ID: u8 = 0x0C;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The root tag of the stream is not a compound tag. Received tag id: {0}")]
    NoRootCompound(u8),
    #[error("Encountered an unknown tag id {0}.")]
    UnknownTagId(u8),
    #[error("Tag id {0} is outside the supported subset")]
    UnsupportedTag(u8),
    #[error("Failed to decode a modified UTF-8 string")]
    Cesu8Decoding,
    #[error("Reading was cut short: {0}")]
    Incomplete(io::Error),
    #[error("Negative length {0}")]
    NegativeLength(i32),
    #[error("Length too large {0}")]
    LargeLength(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A named root compound, the outermost shape of every level stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Nbt {
    pub name: String,
    pub root_tag: NbtCompound,
}

impl Nbt {
    pub fn new(name: impl Into<String>, tag: NbtCompound) -> Self {
        Nbt {
            name: name.into(),
            root_tag: tag,
        }
    }

    pub fn read<R>(reader: &mut ReadAdaptor<R>) -> Result<Nbt>
    where
        R: Read,
    {
        let tag_type_id = reader.get_u8_be()?;
        if tag_type_id != COMPOUND_ID {
            return Err(Error::NoRootCompound(tag_type_id));
        }

        Ok(Nbt {
            name: get_nbt_string(reader)?,
            root_tag: NbtCompound::deserialize_content(reader)?,
        })
    }

    pub fn write(&self) -> Result<Bytes> {
        let mut bytes = Vec::new();
        let mut writer = WriteAdaptor::new(&mut bytes);
        writer.write_u8_be(COMPOUND_ID)?;
        NbtTag::String(self.name.clone()).serialize_data(&mut writer)?;
        self.root_tag.serialize_content(&mut writer)?;
        Ok(bytes.into())
    }

    pub fn write_to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.write()?).map_err(Error::Incomplete)
    }
}

impl Deref for Nbt {
    type Target = NbtCompound;

    fn deref(&self) -> &Self::Target {
        &self.root_tag
    }
}

impl From<NbtCompound> for Nbt {
    fn from(value: NbtCompound) -> Self {
        Nbt::new(String::new(), value)
    }
}

/// Reads a length-prefixed modified UTF-8 string, the encoding Java's
/// `DataOutput` writes for every tag name and string payload.
pub fn get_nbt_string<R: Read>(bytes: &mut ReadAdaptor<R>) -> Result<String> {
    let len = bytes.get_u16_be()? as usize;
    let string_bytes = bytes.read_boxed_slice(len)?;
    let string = cesu8::from_java_cesu8(&string_bytes).map_err(|_| Error::Cesu8Decoding)?;
    Ok(string.to_string())
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::compound::NbtCompound;
    use crate::reader::ReadAdaptor;
    use crate::tag::NbtTag;
    use crate::{Error, Nbt, BYTE_ID};

    #[test]
    fn named_root_round_trip() {
        let mut compound = NbtCompound::new();
        compound.put_byte("hardcore", 1);
        compound.put_int("SpawnX", -128);
        compound.put_long("Time", 1_234_567_890);
        compound.put_string("LevelName", "New World");

        let nbt = Nbt::new("Data", compound);
        let bytes = nbt.write().unwrap();

        let read = Nbt::read(&mut ReadAdaptor::new(Cursor::new(&bytes[..]))).unwrap();
        assert_eq!(read.name, "Data");
        assert_eq!(read.root_tag, nbt.root_tag);
    }

    #[test]
    fn root_must_be_compound() {
        // A byte tag where the root compound should be.
        let bytes = [BYTE_ID, 0x00, 0x00, 0x7F];
        let err = Nbt::read(&mut ReadAdaptor::new(Cursor::new(&bytes[..]))).unwrap_err();
        assert!(matches!(err, Error::NoRootCompound(id) if id == BYTE_ID));
    }

    #[test]
    fn nested_compound_round_trip() {
        let mut rules = NbtCompound::new();
        rules.put_string("doFireTick", "true");
        rules.put_string("randomTickSpeed", "3");

        let mut root = NbtCompound::new();
        root.put_compound("GameRules", rules.clone());
        root.put_byte_array("UnknownBlob", vec![1, 2, 3].into_boxed_slice());
        root.put_int_array("Positions", vec![i32::MIN, 0, i32::MAX].into_boxed_slice());

        let nbt = Nbt::new("Data", root);
        let read = Nbt::read(&mut ReadAdaptor::new(Cursor::new(&nbt.write().unwrap()[..]))).unwrap();
        assert_eq!(read.get_compound("GameRules"), Some(&rules));
        assert_eq!(
            read.get_int_array("Positions"),
            Some(&[i32::MIN, 0, i32::MAX][..])
        );
    }

    #[test]
    fn truncated_stream_is_incomplete() {
        let mut compound = NbtCompound::new();
        compound.put_long("Time", 42);
        let bytes = Nbt::new("Data", compound).write().unwrap();

        let truncated = &bytes[..bytes.len() - 4];
        let err = Nbt::read(&mut ReadAdaptor::new(Cursor::new(truncated))).unwrap_err();
        assert!(matches!(err, Error::Incomplete(_)));
    }

    #[test]
    fn list_tag_is_rejected() {
        // Compound containing a List tag header; the subset reader must
        // refuse it rather than guessing at the payload.
        let bytes = [
            crate::COMPOUND_ID,
            0x00,
            0x00, // empty root name
            crate::LIST_ID,
            0x00,
            0x01,
            b'l',
        ];
        let err = Nbt::read(&mut ReadAdaptor::new(Cursor::new(&bytes[..]))).unwrap_err();
        assert!(matches!(err, Error::UnsupportedTag(crate::LIST_ID)));
    }

    #[test]
    fn tag_equality_survives_modified_utf8() {
        let mut compound = NbtCompound::new();
        compound.put_string("LevelName", "Mundo nuevo \u{00e9}\u{4e16}\u{754c}");
        let nbt = Nbt::new("Data", compound);
        let read = Nbt::read(&mut ReadAdaptor::new(Cursor::new(&nbt.write().unwrap()[..]))).unwrap();
        assert_eq!(
            read.get_string("LevelName").map(String::as_str),
            Some("Mundo nuevo \u{00e9}\u{4e16}\u{754c}")
        );
    }

    #[test]
    fn unknown_tag_id_is_reported() {
        let bytes = [crate::COMPOUND_ID, 0x00, 0x00, 0x3F, 0x00, 0x01, b'x'];
        let err = Nbt::read(&mut ReadAdaptor::new(Cursor::new(&bytes[..]))).unwrap_err();
        assert!(matches!(err, Error::UnknownTagId(0x3F)));
    }
}
