use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::reader::ReadAdaptor;
use crate::{Nbt, Result};

/// Reads a gzip-compressed named root compound from any reader.
pub fn read_gzip_nbt(input: impl Read) -> Result<Nbt> {
    let decoder = GzDecoder::new(input);
    let mut reader = ReadAdaptor::new(decoder);
    Nbt::read(&mut reader)
}

/// Writes a named root compound with gzip compression.
pub fn write_gzip_nbt(nbt: &Nbt, output: impl Write) -> Result<()> {
    let mut encoder = GzEncoder::new(output, Compression::default());
    nbt.write_to_writer(&mut encoder)?;
    encoder.finish().map_err(crate::Error::Incomplete)?;
    Ok(())
}
