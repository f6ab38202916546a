use std::io::Write;

use crate::{Error, Result};

/// Big-endian primitive writer over any [`Write`], mirroring the byte order
/// of Java's `DataOutputStream`.
#[derive(Debug)]
pub struct WriteAdaptor<W: Write> {
    writer: W,
}

macro_rules! write_be {
    ($name:ident, $ty:ty) => {
        pub fn $name(&mut self, value: $ty) -> Result<()> {
            self.writer
                .write_all(&value.to_be_bytes())
                .map_err(Error::Incomplete)
        }
    };
}

impl<W: Write> WriteAdaptor<W> {
    pub fn new(w: W) -> Self {
        Self { writer: w }
    }

    write_be!(write_u8_be, u8);
    write_be!(write_i8_be, i8);
    write_be!(write_u16_be, u16);
    write_be!(write_i16_be, i16);
    write_be!(write_i32_be, i32);
    write_be!(write_i64_be, i64);
    write_be!(write_f32_be, f32);
    write_be!(write_f64_be, f64);

    pub fn write_slice(&mut self, value: &[u8]) -> Result<()> {
        self.writer.write_all(value).map_err(Error::Incomplete)
    }
}
