//! fru - IPMI Field Replaceable Unit inventory blobs
//!
//! Encodes a [`Record`] describing a chassis, board and product into the
//! checksummed binary layout stored in FRU EEPROMs, and parses such blobs
//! back into a [`Record`].
//!
//! # Format
//!
//! - An 8-byte common header holding the format version, the offset of each
//!   area in units of 8 bytes (0 when absent) and a checksum
//! - An optional internal use area: a version byte plus opaque data
//! - Optional chassis, board and product info areas, each a version byte, a
//!   length byte, fixed fields, type/length encoded strings ended by `0xC1`,
//!   zero padding and a checksum
//! - Zero padding up to the declared blob size
//!
//! # Example
//!
//! ```rust
//! use fru::{Chassis, Record};
//!
//! let mut record = Record::with_size(64);
//! record.chassis = Some(Chassis {
//!     chassis_type: 0x17,
//!     serial: Some("SN-0001".into()),
//!     ..Default::default()
//! });
//!
//! let blob = fru::encode(&record).unwrap();
//! assert_eq!(blob.len(), 64);
//! assert_eq!(fru::decode(&blob).unwrap(), record);
//! ```

pub mod checksum;
pub mod config;
pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

use std::fs;
use std::path::Path;

// Re-export common types at crate root
pub use error::{ConfigError, DecodeError, EncodeError, UnknownField};
pub use types::{
    AreaKind, Board, Chassis, Common, CommonHeader, HEADER_SIZE, InfoArea, Internal, OFFSET_UNIT,
    Product, Record,
};

/// Encode a record into a blob of exactly `record.common.size` bytes
pub fn encode(record: &Record) -> Result<Vec<u8>, EncodeError> {
    writer::to_bytes(record)
}

/// Decode a FRU blob, validating the header and every area checksum
pub fn decode(blob: &[u8]) -> Result<Record, DecodeError> {
    parser::parse(blob)
}

/// Decode a FRU blob given either a file path or the bytes themselves
///
/// Exactly one of `path` and `blob` must be provided.
pub fn load(path: Option<&Path>, blob: Option<&[u8]>) -> Result<Record, DecodeError> {
    match (path, blob) {
        (Some(path), None) => {
            let bytes = fs::read(path)?;
            decode(&bytes)
        }
        (None, Some(blob)) => decode(blob),
        (None, None) => Err(DecodeError::InvalidArgument(
            "You must specify *path* or *blob*.",
        )),
        (Some(_), Some(_)) => Err(DecodeError::InvalidArgument(
            "You must specify *path* or *blob*, but not both.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_requires_one_source() {
        assert!(matches!(
            load(None, None),
            Err(DecodeError::InvalidArgument(_))
        ));
        assert!(matches!(
            load(Some(Path::new("fru.bin")), Some(&[0u8; 8][..])),
            Err(DecodeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_load_blob() {
        let record = load(None, Some(&[0u8; 8][..])).unwrap();
        assert_eq!(record.common.size, Some(8));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load(Some(Path::new("/nonexistent/fru.bin")), None);
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }
}
