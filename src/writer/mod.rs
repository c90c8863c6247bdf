//! Serialization of FRU records

mod area;
mod fields;

pub use area::{build_board, build_chassis, build_internal, build_product};
pub use fields::{write_field, write_fields};

use crate::error::EncodeError;
use crate::types::{AreaKind, CommonHeader, HEADER_SIZE, MAX_UNITS, OFFSET_UNIT, Record};
use std::io::{self, Write};

/// Encode a record into a blob of exactly `common.size` bytes
///
/// Content that does not fit `common.size` is always reported as
/// [`EncodeError::BlobTooLarge`], ahead of the per-area and offset limits.
pub fn to_bytes(record: &Record) -> Result<Vec<u8>, EncodeError> {
    let size = record
        .common
        .size
        .ok_or(EncodeError::MissingRequiredField { field: "size" })? as usize;
    let version = record.common.version;

    let built = [
        (
            AreaKind::Internal,
            Ok(record
                .internal
                .as_ref()
                .map(|a| build_internal(version, a))
                .unwrap_or_default()),
        ),
        (
            AreaKind::Chassis,
            record
                .chassis
                .as_ref()
                .map_or(Ok(Vec::new()), |a| build_chassis(version, a)),
        ),
        (
            AreaKind::Board,
            record
                .board
                .as_ref()
                .map_or(Ok(Vec::new()), |a| build_board(version, a)),
        ),
        (
            AreaKind::Product,
            record
                .product
                .as_ref()
                .map_or(Ok(Vec::new()), |a| build_product(version, a)),
        ),
    ];

    // An oversized area still counts towards the total before it is reported.
    let mut areas = Vec::with_capacity(built.len());
    let mut too_large = None;
    let mut required = HEADER_SIZE;
    for (kind, result) in built {
        match result {
            Ok(bytes) => {
                required += bytes.len();
                areas.push((kind, bytes));
            }
            Err(EncodeError::AreaTooLarge { area, length }) => {
                required += length;
                too_large.get_or_insert(EncodeError::AreaTooLarge { area, length });
            }
            Err(e) => return Err(e),
        }
    }
    if required > size {
        return Err(EncodeError::BlobTooLarge {
            required,
            available: size,
        });
    }
    if let Some(e) = too_large {
        return Err(e);
    }

    // Unit 0 is the common header.
    let mut header = CommonHeader {
        version,
        ..Default::default()
    };
    let mut cursor = 1;
    for (kind, bytes) in &areas {
        if bytes.is_empty() {
            continue;
        }
        if cursor > MAX_UNITS {
            return Err(EncodeError::OffsetOutOfRange {
                area: *kind,
                units: cursor,
            });
        }
        header.set_offset_units(*kind, cursor as u8);
        cursor += bytes.len() / OFFSET_UNIT;
    }

    let mut out = Vec::with_capacity(size);
    out.extend_from_slice(&header.to_bytes());
    for (_, bytes) in &areas {
        out.extend_from_slice(bytes);
    }
    out.resize(size, 0x00);
    Ok(out)
}

/// Encode a record and write the blob to `writer`
///
/// Encoding failures are reported as [`io::ErrorKind::InvalidInput`].
pub fn write<W: Write>(writer: &mut W, record: &Record) -> io::Result<()> {
    let blob = to_bytes(record)?;
    writer.write_all(&blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Chassis, Internal, Product};

    #[test]
    fn test_header_only() {
        let bytes = to_bytes(&Record::with_size(8)).unwrap();
        assert_eq!(bytes, vec![0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn test_missing_size() {
        let record = Record::default();
        assert_eq!(
            to_bytes(&record),
            Err(EncodeError::MissingRequiredField { field: "size" })
        );
    }

    #[test]
    fn test_padded_to_size() {
        let mut record = Record::with_size(64);
        record.chassis = Some(Chassis::default());
        let bytes = to_bytes(&record).unwrap();
        assert_eq!(bytes.len(), 64);
        assert_eq!(bytes[2], 1);
        assert!(bytes[16..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_offsets_follow_layout_order() {
        let mut record = Record::with_size(128);
        record.internal = Some(Internal::new(vec![0xAA; 10]));
        record.chassis = Some(Chassis::default());
        record.product = Some(Product::default());
        let bytes = to_bytes(&record).unwrap();

        // internal: 1 + 10 bytes padded to 16 -> units 1..3
        assert_eq!(bytes[1], 1);
        assert_eq!(bytes[2], 3);
        assert_eq!(bytes[3], 0);
        assert_eq!(bytes[4], 4);
        assert_eq!(bytes[5], 0);
        assert_eq!(bytes[6], 0);
    }

    #[test]
    fn test_too_large() {
        let mut record = Record::with_size(16);
        record.board = Some(Board {
            manufacturer: Some("Manufacturer".into()),
            ..Default::default()
        });
        assert!(matches!(
            to_bytes(&record),
            Err(EncodeError::BlobTooLarge {
                available: 16,
                ..
            })
        ));
    }

    #[test]
    fn test_exact_fit() {
        let mut record = Record::with_size(16);
        record.chassis = Some(Chassis::default());
        assert_eq!(to_bytes(&record).unwrap().len(), 16);
    }

    #[test]
    fn test_version_in_every_area() {
        let mut record = Record::with_size(64);
        record.common.version = 2;
        record.chassis = Some(Chassis::default());
        let bytes = to_bytes(&record).unwrap();
        assert_eq!(bytes[0], 2);
        assert_eq!(bytes[8], 2);
    }

    #[test]
    fn test_write_reports_invalid_input() {
        let mut sink = Vec::new();
        let err = write(&mut sink, &Record::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(sink.is_empty());

        write(&mut sink, &Record::with_size(8)).unwrap();
        assert_eq!(sink.len(), 8);
    }

    #[test]
    fn test_oversize_reported_before_offset_limit() {
        let mut record = Record::with_size(64);
        record.internal = Some(Internal::new(vec![0xAA; 2100]));
        record.chassis = Some(Chassis::default());
        assert_eq!(
            to_bytes(&record),
            Err(EncodeError::BlobTooLarge {
                required: 8 + 2104 + 8,
                available: 64,
            })
        );
    }

    #[test]
    fn test_offset_limit_when_size_allows() {
        let mut record = Record::with_size(4096);
        record.internal = Some(Internal::new(vec![0xAA; 2100]));
        record.chassis = Some(Chassis::default());
        assert_eq!(
            to_bytes(&record),
            Err(EncodeError::OffsetOutOfRange {
                area: AreaKind::Chassis,
                units: 264,
            })
        );
    }

    #[test]
    fn test_area_too_large_counts_towards_size() {
        let extra: Vec<_> = (0..40).map(|_| Some("x".repeat(63))).collect();
        let mut record = Record::with_size(64);
        record.product = Some(Product {
            extra,
            ..Default::default()
        });
        assert!(matches!(
            to_bytes(&record),
            Err(EncodeError::BlobTooLarge { available: 64, .. })
        ));

        record.common.size = Some(8192);
        assert!(matches!(
            to_bytes(&record),
            Err(EncodeError::AreaTooLarge {
                area: AreaKind::Product,
                ..
            })
        ));
    }
}
