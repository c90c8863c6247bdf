//! Decoding of individual info areas

use super::fields::Fields;
use crate::checksum;
use crate::error::DecodeError;
use crate::types::{AreaKind, Board, Chassis, InfoArea, Internal, OFFSET_UNIT, Product};
use scroll::{LE, Pread};

/// Validate the area at `offset` and return its bytes, checksum included
fn area_bytes(blob: &[u8], offset: usize, area: AreaKind) -> Result<&[u8], DecodeError> {
    let units: u8 = blob.pread_with(offset + 1, LE).map_err(|_| {
        DecodeError::malformed(area, format!("offset {} is past the blob", offset))
    })?;
    if units == 0 {
        return Err(DecodeError::malformed(area, "declared length is zero"));
    }
    let length = units as usize * OFFSET_UNIT;
    checksum::validate(blob, offset, length, area)?;
    Ok(&blob[offset..offset + length])
}

/// Decode the fields of `bytes[start..len - 1]` into `target`
fn read_fields<A: InfoArea>(
    bytes: &[u8],
    start: usize,
    target: &mut A,
) -> Result<(), DecodeError> {
    let body = bytes
        .get(start..bytes.len() - 1)
        .ok_or_else(|| DecodeError::malformed(A::KIND, "area too short for its fixed fields"))?;
    for (position, value) in Fields::new(body, A::KIND).enumerate() {
        target.push_field(position, Some(value?.to_string()));
    }
    Ok(())
}

fn read_u8(bytes: &[u8], offset: usize, area: AreaKind) -> Result<u8, DecodeError> {
    bytes
        .pread_with(offset, LE)
        .map_err(|_| DecodeError::malformed(area, format!("missing byte at offset {}", offset)))
}

pub fn parse_chassis(blob: &[u8], offset: usize) -> Result<Chassis, DecodeError> {
    let bytes = area_bytes(blob, offset, AreaKind::Chassis)?;
    let mut chassis = Chassis {
        chassis_type: read_u8(bytes, 2, AreaKind::Chassis)?,
        ..Default::default()
    };
    read_fields(bytes, 3, &mut chassis)?;
    Ok(chassis)
}

pub fn parse_board(blob: &[u8], offset: usize) -> Result<Board, DecodeError> {
    let bytes = area_bytes(blob, offset, AreaKind::Board)?;
    let date: &[u8] = bytes
        .pread_with(3, 3)
        .map_err(|_| DecodeError::malformed(AreaKind::Board, "truncated manufacturing date"))?;
    let mut board = Board {
        language: read_u8(bytes, 2, AreaKind::Board)?,
        date: u32::from_le_bytes([date[0], date[1], date[2], 0]),
        ..Default::default()
    };
    read_fields(bytes, 6, &mut board)?;
    Ok(board)
}

pub fn parse_product(blob: &[u8], offset: usize) -> Result<Product, DecodeError> {
    let bytes = area_bytes(blob, offset, AreaKind::Product)?;
    let mut product = Product {
        language: read_u8(bytes, 2, AreaKind::Product)?,
        ..Default::default()
    };
    read_fields(bytes, 3, &mut product)?;
    Ok(product)
}

/// The internal area has no length byte: its payload runs from after the
/// version byte to `end`
pub fn parse_internal(blob: &[u8], offset: usize, end: usize) -> Result<Internal, DecodeError> {
    let start = offset + 1;
    let data = blob.get(start..end).ok_or_else(|| {
        DecodeError::malformed(
            AreaKind::Internal,
            format!(
                "payload {}..{} does not fit the {}-byte blob",
                start,
                end,
                blob.len()
            ),
        )
    })?;
    Ok(Internal::new(data))
}
