use thiserror::Error;

/// Validation and format errors raised by the world data model and its
/// storage codecs.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Corrupt level file")]
    CorruptLevel,
    #[error("Value {key}: {kind} Tags are not allowed!")]
    DisallowedTag { key: String, kind: &'static str },
    #[error("Invalid Snapshot flag {0:?}, expected \"0\" or \"1\"")]
    InvalidSnapshotFlag(String),
    #[error("Data cannot be a negative value!")]
    NegativeDataValue(i32),
    #[error("The array length can only be {expected}, got {actual}")]
    BadArrayLength { expected: usize, actual: usize },
    #[error("Tag error: {0}")]
    Nbt(#[from] blockedit_nbt::Error),
    #[error("Invalid block XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Invalid integer field: {0}")]
    IntField(#[from] std::num::ParseIntError),
    #[error(transparent)]
    Build(#[from] DataBuildError),
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A builder was finalized with a mandatory field unset.
#[derive(Error, Debug)]
pub enum DataBuildError {
    #[error("name and displayName were left unset!")]
    MissingBlockNames,
    #[error("The version has not been specified")]
    MissingVersion,
    #[error("Build failed: A value was unset.")]
    MissingChunkField,
}
