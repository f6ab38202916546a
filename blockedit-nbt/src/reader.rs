use std::io::{self, Read};

use crate::{Error, Result};

/// Big-endian primitive reader over any [`Read`].
#[derive(Debug)]
pub struct ReadAdaptor<R: Read> {
    reader: R,
}

macro_rules! get_be {
    ($name:ident, $ty:ty, $len:expr) => {
        pub fn $name(&mut self) -> Result<$ty> {
            let mut buf = [0u8; $len];
            self.reader
                .read_exact(&mut buf)
                .map_err(Error::Incomplete)?;
            Ok(<$ty>::from_be_bytes(buf))
        }
    };
}

impl<R: Read> ReadAdaptor<R> {
    pub fn new(r: R) -> Self {
        Self { reader: r }
    }

    get_be!(get_u8_be, u8, 1);
    get_be!(get_i8_be, i8, 1);
    get_be!(get_u16_be, u16, 2);
    get_be!(get_i16_be, i16, 2);
    get_be!(get_i32_be, i32, 4);
    get_be!(get_i64_be, i64, 8);
    get_be!(get_f32_be, f32, 4);
    get_be!(get_f64_be, f64, 8);

    pub fn skip_bytes(&mut self, count: u64) -> Result<()> {
        io::copy(&mut self.reader.by_ref().take(count), &mut io::sink())
            .map_err(Error::Incomplete)?;
        Ok(())
    }

    pub fn read_boxed_slice(&mut self, count: usize) -> Result<Box<[u8]>> {
        let mut buf = vec![0u8; count];
        self.reader
            .read_exact(&mut buf)
            .map_err(Error::Incomplete)?;
        Ok(buf.into())
    }
}
