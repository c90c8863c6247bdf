//! Error types for FRU encoding and decoding

use crate::types::AreaKind;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::io;

/// Errors raised while building a FRU blob from a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A setting the encoder cannot default is missing
    MissingRequiredField { field: &'static str },
    /// Header plus areas do not fit the declared blob size
    BlobTooLarge { required: usize, available: usize },
    /// A string is longer than a type/length byte can describe
    FieldTooLong {
        area: AreaKind,
        field: String,
        length: usize,
    },
    /// A string contains bytes outside 7-bit ASCII
    NonAsciiField { area: AreaKind, field: String },
    /// A one-character string, whose type/length byte equals the end marker
    SingleCharField { area: AreaKind, field: String },
    /// Board date does not fit in 24 bits
    DateOutOfRange { date: u32 },
    /// Area length in 8-byte units does not fit its length byte
    AreaTooLarge { area: AreaKind, length: usize },
    /// Area would start past the last offset the header can express
    OffsetOutOfRange { area: AreaKind, units: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::MissingRequiredField { field } => {
                write!(f, "\"{}\" missing in [common]", field)
            }
            EncodeError::BlobTooLarge {
                required,
                available,
            } => write!(
                f,
                "Too much content, does not fit: {} bytes required, {} available",
                required, available
            ),
            EncodeError::FieldTooLong {
                area,
                field,
                length,
            } => write!(
                f,
                "{}.{} is {} bytes long, at most 63 are allowed",
                area, field, length
            ),
            EncodeError::NonAsciiField { area, field } => {
                write!(f, "{}.{} contains non-ASCII characters", area, field)
            }
            EncodeError::SingleCharField { area, field } => write!(
                f,
                "{}.{} is a single character, which cannot be encoded",
                area, field
            ),
            EncodeError::DateOutOfRange { date } => {
                write!(f, "board date 0x{:X} does not fit in 24 bits", date)
            }
            EncodeError::AreaTooLarge { area, length } => {
                write!(f, "{} area is too large: {} bytes", area, length)
            }
            EncodeError::OffsetOutOfRange { area, units } => write!(
                f,
                "{} area would start at unit {}, past the header's range",
                area, units
            ),
        }
    }
}

impl Error for EncodeError {}

impl From<EncodeError> for io::Error {
    fn from(e: EncodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, e)
    }
}

/// Errors raised while parsing a FRU blob
#[derive(Debug)]
pub enum DecodeError {
    /// Header or area bytes do not sum to zero
    ChecksumMismatch { area: AreaKind, offset: usize },
    /// Area is truncated, unterminated or otherwise inconsistent with the blob
    MalformedArea {
        area: AreaKind,
        reason: Cow<'static, str>,
    },
    /// Neither or both of a path and a blob were supplied to `load`
    InvalidArgument(&'static str),
    /// Reading the blob from disk failed
    Io(io::Error),
}

impl DecodeError {
    pub(crate) fn malformed(area: AreaKind, reason: impl Into<Cow<'static, str>>) -> Self {
        DecodeError::MalformedArea {
            area,
            reason: reason.into(),
        }
    }

    /// Area the error was detected in, if any
    pub fn area(&self) -> Option<AreaKind> {
        match self {
            DecodeError::ChecksumMismatch { area, .. } | DecodeError::MalformedArea { area, .. } => {
                Some(*area)
            }
            DecodeError::InvalidArgument(_) | DecodeError::Io(_) => None,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::ChecksumMismatch { area, offset } => write!(
                f,
                "The {} data at offset {} does not match its checksum",
                area, offset
            ),
            DecodeError::MalformedArea { area, reason } => {
                write!(f, "Malformed {} area: {}", area, reason)
            }
            DecodeError::InvalidArgument(message) => f.write_str(message),
            DecodeError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DecodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        DecodeError::Io(e)
    }
}

/// A field name that does not exist in the given area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField {
    pub area: AreaKind,
    pub name: String,
}

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field \"{}\" in [{}]", self.name, self.area.name())
    }
}

impl Error for UnknownField {}

/// Errors raised while loading an INI configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the config or an internal data file failed
    Io { path: String, source: io::Error },
    /// A line could not be parsed
    Syntax { line: usize, message: String },
    /// A required section or key is absent
    MissingKey { section: String, key: String },
    /// A numeric value could not be parsed
    InvalidNumber {
        section: String,
        key: String,
        value: String,
    },
    UnknownField(UnknownField),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "{}: {}", path, source),
            ConfigError::Syntax { line, message } => write!(f, "line {}: {}", line, message),
            ConfigError::MissingKey { section, key } if key.is_empty() => {
                write!(f, "[{}] section missing in config", section)
            }
            ConfigError::MissingKey { section, key } => {
                write!(f, "\"{}\" missing in [{}]", key, section)
            }
            ConfigError::InvalidNumber {
                section,
                key,
                value,
            } => write!(f, "[{}] {} = {:?} is not a valid number", section, key, value),
            ConfigError::UnknownField(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::UnknownField(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnknownField> for ConfigError {
    fn from(e: UnknownField) -> Self {
        ConfigError::UnknownField(e)
    }
}
