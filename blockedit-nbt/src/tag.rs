use std::io::{Read, Write};

use crate::compound::NbtCompound;
use crate::reader::ReadAdaptor;
use crate::writer::WriteAdaptor;
use crate::{
    get_nbt_string, Error, Result, BYTE_ARRAY_ID, BYTE_ID, COMPOUND_ID, DOUBLE_ID, END_ID,
    FLOAT_ID, INT_ARRAY_ID, INT_ID, LIST_ID, LONG_ARRAY_ID, LONG_ID, SHORT_ID, STRING_ID,
};

/// One typed datum of the level format.
///
/// This is the application subset of the tag family: list and long-array
/// payloads are not representable and their wire ids are refused on read.
#[derive(Clone, Debug, PartialEq)]
pub enum NbtTag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Box<[u8]>),
    String(String),
    IntArray(Box<[i32]>),
    Compound(NbtCompound),
}

impl NbtTag {
    /// Returns the wire id associated with the payload type.
    pub const fn get_type_id(&self) -> u8 {
        match self {
            NbtTag::End => END_ID,
            NbtTag::Byte(_) => BYTE_ID,
            NbtTag::Short(_) => SHORT_ID,
            NbtTag::Int(_) => INT_ID,
            NbtTag::Long(_) => LONG_ID,
            NbtTag::Float(_) => FLOAT_ID,
            NbtTag::Double(_) => DOUBLE_ID,
            NbtTag::ByteArray(_) => BYTE_ARRAY_ID,
            NbtTag::String(_) => STRING_ID,
            NbtTag::IntArray(_) => INT_ARRAY_ID,
            NbtTag::Compound(_) => COMPOUND_ID,
        }
    }

    pub fn serialize<W>(&self, w: &mut WriteAdaptor<W>) -> Result<()>
    where
        W: Write,
    {
        w.write_u8_be(self.get_type_id())?;
        self.serialize_data(w)
    }

    pub fn serialize_data<W>(&self, w: &mut WriteAdaptor<W>) -> Result<()>
    where
        W: Write,
    {
        match self {
            NbtTag::End => {}
            NbtTag::Byte(byte) => w.write_i8_be(*byte)?,
            NbtTag::Short(short) => w.write_i16_be(*short)?,
            NbtTag::Int(int) => w.write_i32_be(*int)?,
            NbtTag::Long(long) => w.write_i64_be(*long)?,
            NbtTag::Float(float) => w.write_f32_be(*float)?,
            NbtTag::Double(double) => w.write_f64_be(*double)?,
            NbtTag::ByteArray(byte_array) => {
                let len = byte_array.len();
                if len > i32::MAX as usize {
                    return Err(Error::LargeLength(len));
                }
                w.write_i32_be(len as i32)?;
                w.write_slice(byte_array)?;
            }
            NbtTag::String(string) => {
                let java_string = cesu8::to_java_cesu8(string);
                let len = java_string.len();
                if len > u16::MAX as usize {
                    return Err(Error::LargeLength(len));
                }
                w.write_u16_be(len as u16)?;
                w.write_slice(&java_string)?;
            }
            NbtTag::IntArray(int_array) => {
                let len = int_array.len();
                if len > i32::MAX as usize {
                    return Err(Error::LargeLength(len));
                }
                w.write_i32_be(len as i32)?;
                for int in int_array {
                    w.write_i32_be(*int)?;
                }
            }
            NbtTag::Compound(compound) => {
                compound.serialize_content(w)?;
            }
        }
        Ok(())
    }

    pub fn deserialize<R>(reader: &mut ReadAdaptor<R>) -> Result<NbtTag>
    where
        R: Read,
    {
        let tag_id = reader.get_u8_be()?;
        Self::deserialize_data(reader, tag_id)
    }

    pub fn deserialize_data<R>(reader: &mut ReadAdaptor<R>, tag_id: u8) -> Result<NbtTag>
    where
        R: Read,
    {
        match tag_id {
            END_ID => Ok(NbtTag::End),
            BYTE_ID => Ok(NbtTag::Byte(reader.get_i8_be()?)),
            SHORT_ID => Ok(NbtTag::Short(reader.get_i16_be()?)),
            INT_ID => Ok(NbtTag::Int(reader.get_i32_be()?)),
            LONG_ID => Ok(NbtTag::Long(reader.get_i64_be()?)),
            FLOAT_ID => Ok(NbtTag::Float(reader.get_f32_be()?)),
            DOUBLE_ID => Ok(NbtTag::Double(reader.get_f64_be()?)),
            BYTE_ARRAY_ID => {
                let len = reader.get_i32_be()?;
                if len < 0 {
                    return Err(Error::NegativeLength(len));
                }
                let byte_array = reader.read_boxed_slice(len as usize)?;
                Ok(NbtTag::ByteArray(byte_array))
            }
            STRING_ID => Ok(NbtTag::String(get_nbt_string(reader)?)),
            INT_ARRAY_ID => {
                let len = reader.get_i32_be()?;
                if len < 0 {
                    return Err(Error::NegativeLength(len));
                }
                let len = len as usize;
                let mut int_array = Vec::with_capacity(len);
                for _ in 0..len {
                    int_array.push(reader.get_i32_be()?);
                }
                Ok(NbtTag::IntArray(int_array.into_boxed_slice()))
            }
            COMPOUND_ID => Ok(NbtTag::Compound(NbtCompound::deserialize_content(reader)?)),
            LIST_ID | LONG_ARRAY_ID => Err(Error::UnsupportedTag(tag_id)),
            _ => Err(Error::UnknownTagId(tag_id)),
        }
    }

    /// Skips over one payload without materializing it.
    pub fn skip_data<R>(reader: &mut ReadAdaptor<R>, tag_id: u8) -> Result<()>
    where
        R: Read,
    {
        match tag_id {
            END_ID => Ok(()),
            BYTE_ID => reader.skip_bytes(1),
            SHORT_ID => reader.skip_bytes(2),
            INT_ID | FLOAT_ID => reader.skip_bytes(4),
            LONG_ID | DOUBLE_ID => reader.skip_bytes(8),
            BYTE_ARRAY_ID => {
                let len = reader.get_i32_be()?;
                if len < 0 {
                    return Err(Error::NegativeLength(len));
                }
                reader.skip_bytes(len as u64)
            }
            STRING_ID => {
                let len = reader.get_u16_be()?;
                reader.skip_bytes(len as u64)
            }
            INT_ARRAY_ID => {
                let len = reader.get_i32_be()?;
                if len < 0 {
                    return Err(Error::NegativeLength(len));
                }
                reader.skip_bytes(len as u64 * 4)
            }
            COMPOUND_ID => NbtCompound::skip_content(reader),
            LIST_ID | LONG_ARRAY_ID => Err(Error::UnsupportedTag(tag_id)),
            _ => Err(Error::UnknownTagId(tag_id)),
        }
    }

    pub fn extract_byte(&self) -> Option<i8> {
        match self {
            NbtTag::Byte(byte) => Some(*byte),
            _ => None,
        }
    }

    pub fn extract_short(&self) -> Option<i16> {
        match self {
            NbtTag::Short(short) => Some(*short),
            _ => None,
        }
    }

    pub fn extract_int(&self) -> Option<i32> {
        match self {
            NbtTag::Int(int) => Some(*int),
            _ => None,
        }
    }

    pub fn extract_long(&self) -> Option<i64> {
        match self {
            NbtTag::Long(long) => Some(*long),
            _ => None,
        }
    }

    pub fn extract_float(&self) -> Option<f32> {
        match self {
            NbtTag::Float(float) => Some(*float),
            _ => None,
        }
    }

    pub fn extract_double(&self) -> Option<f64> {
        match self {
            NbtTag::Double(double) => Some(*double),
            _ => None,
        }
    }

    pub fn extract_bool(&self) -> Option<bool> {
        match self {
            NbtTag::Byte(byte) => Some(*byte != 0),
            _ => None,
        }
    }

    pub fn extract_byte_array(&self) -> Option<&[u8]> {
        match self {
            NbtTag::ByteArray(byte_array) => Some(byte_array),
            _ => None,
        }
    }

    pub fn extract_string(&self) -> Option<&String> {
        match self {
            NbtTag::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn extract_int_array(&self) -> Option<&[i32]> {
        match self {
            NbtTag::IntArray(int_array) => Some(int_array),
            _ => None,
        }
    }

    pub fn extract_compound(&self) -> Option<&NbtCompound> {
        match self {
            NbtTag::Compound(compound) => Some(compound),
            _ => None,
        }
    }
}

impl From<i8> for NbtTag {
    fn from(value: i8) -> Self {
        NbtTag::Byte(value)
    }
}

impl From<i16> for NbtTag {
    fn from(value: i16) -> Self {
        NbtTag::Short(value)
    }
}

impl From<i32> for NbtTag {
    fn from(value: i32) -> Self {
        NbtTag::Int(value)
    }
}

impl From<i64> for NbtTag {
    fn from(value: i64) -> Self {
        NbtTag::Long(value)
    }
}

impl From<f32> for NbtTag {
    fn from(value: f32) -> Self {
        NbtTag::Float(value)
    }
}

impl From<f64> for NbtTag {
    fn from(value: f64) -> Self {
        NbtTag::Double(value)
    }
}

impl From<bool> for NbtTag {
    fn from(value: bool) -> Self {
        NbtTag::Byte(value as i8)
    }
}

impl From<&str> for NbtTag {
    fn from(value: &str) -> Self {
        NbtTag::String(value.to_string())
    }
}

impl From<String> for NbtTag {
    fn from(value: String) -> Self {
        NbtTag::String(value)
    }
}

impl From<NbtCompound> for NbtTag {
    fn from(value: NbtCompound) -> Self {
        NbtTag::Compound(value)
    }
}
