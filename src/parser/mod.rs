//! Binary parser for FRU blobs
//!
//! Every read is bounds-checked; a truncated or corrupt blob produces a
//! [`DecodeError`] and never a partially populated record.

mod area;
mod fields;

pub use area::{parse_board, parse_chassis, parse_internal, parse_product};
pub use fields::Fields;

use crate::checksum;
use crate::error::DecodeError;
use crate::types::{AreaKind, Common, CommonHeader, HEADER_SIZE, Record};
use scroll::Pread;

/// Parse and checksum the 8-byte common header
pub fn parse_header(blob: &[u8]) -> Result<CommonHeader, DecodeError> {
    let bytes: &[u8] = blob.pread_with(0, HEADER_SIZE).map_err(|_| {
        DecodeError::malformed(
            AreaKind::Header,
            format!(
                "blob is {} bytes, the common header needs {}",
                blob.len(),
                HEADER_SIZE
            ),
        )
    })?;
    checksum::validate(bytes, 0, HEADER_SIZE, AreaKind::Header)?;

    Ok(CommonHeader {
        version: bytes[0],
        internal: bytes[1],
        chassis: bytes[2],
        board: bytes[3],
        product: bytes[4],
        multirecord: bytes[5],
    })
}

/// Parse a FRU blob into a record
///
/// `common.size` is set to the length of `blob`. Areas whose offset is zero
/// are left as `None`, and a multirecord offset is ignored.
pub fn parse(blob: &[u8]) -> Result<Record, DecodeError> {
    let header = parse_header(blob)?;

    let size = u32::try_from(blob.len()).map_err(|_| {
        DecodeError::malformed(AreaKind::Header, "blob is larger than 4 GiB")
    })?;
    let mut record = Record {
        common: Common {
            version: header.version,
            size: Some(size),
        },
        ..Default::default()
    };

    if let Some(offset) = header.offset(AreaKind::Internal) {
        // First present area in declaration order, not necessarily the nearest.
        let end = [AreaKind::Chassis, AreaKind::Board, AreaKind::Product]
            .into_iter()
            .find_map(|a| header.offset(a))
            .unwrap_or(blob.len());
        record.internal = Some(parse_internal(blob, offset, end)?);
    }
    if let Some(offset) = header.offset(AreaKind::Chassis) {
        record.chassis = Some(parse_chassis(blob, offset)?);
    }
    if let Some(offset) = header.offset(AreaKind::Board) {
        record.board = Some(parse_board(blob, offset)?);
    }
    if let Some(offset) = header.offset(AreaKind::Product) {
        record.product = Some(parse_product(blob, offset)?);
    }

    Ok(record)
}
