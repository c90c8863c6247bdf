//! Assembly of individual info areas

use super::fields::write_fields;
use crate::checksum;
use crate::error::EncodeError;
use crate::types::{
    AreaKind, Board, Chassis, InfoArea, Internal, MAX_DATE, MAX_UNITS, OFFSET_UNIT, Product,
};

/// Pad `body`, prepend the version/length header and append the checksum
///
/// Padding stops when the body length is 5 mod 8, so the 2-byte header and
/// the checksum bring the area to a multiple of 8.
fn finish_area(version: u8, area: AreaKind, mut body: Vec<u8>) -> Result<Vec<u8>, EncodeError> {
    while body.len() % OFFSET_UNIT != 5 {
        body.push(0x00);
    }

    let units = (body.len() + 3) / OFFSET_UNIT;
    if units > MAX_UNITS {
        return Err(EncodeError::AreaTooLarge {
            area,
            length: body.len() + 3,
        });
    }

    let mut out = Vec::with_capacity(body.len() + 3);
    out.push(version);
    out.push(units as u8);
    out.extend_from_slice(&body);
    out.push(checksum::compute(&out));
    Ok(out)
}

/// Encode `prefix` followed by the area's fields into a finished area
fn build_info_area<A: InfoArea>(
    version: u8,
    prefix: &[u8],
    area: &A,
) -> Result<Vec<u8>, EncodeError> {
    let mut body = prefix.to_vec();
    write_fields(&mut body, A::KIND, &area.fields())?;
    finish_area(version, A::KIND, body)
}

pub fn build_chassis(version: u8, chassis: &Chassis) -> Result<Vec<u8>, EncodeError> {
    build_info_area(version, &[chassis.chassis_type], chassis)
}

pub fn build_board(version: u8, board: &Board) -> Result<Vec<u8>, EncodeError> {
    if board.date > MAX_DATE {
        return Err(EncodeError::DateOutOfRange { date: board.date });
    }
    let [d0, d1, d2, _] = board.date.to_le_bytes();
    build_info_area(version, &[board.language, d0, d1, d2], board)
}

pub fn build_product(version: u8, product: &Product) -> Result<Vec<u8>, EncodeError> {
    build_info_area(version, &[product.language], product)
}

/// Version byte plus the raw payload, zero-padded to a whole number of units
///
/// No length byte and no checksum. Empty data produces an empty area.
pub fn build_internal(version: u8, internal: &Internal) -> Vec<u8> {
    if internal.data.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(internal.data.len() + OFFSET_UNIT);
    out.push(version);
    out.extend_from_slice(&internal.data);
    while out.len() % OFFSET_UNIT != 0 {
        out.push(0x00);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chassis() {
        let area = build_chassis(1, &Chassis::default()).unwrap();
        // type, part, serial, end marker, padding to 5, then header and checksum
        assert_eq!(area, vec![0x01, 0x01, 0x00, 0x00, 0x00, 0xC1, 0x00, 0x3D]);
    }

    #[test]
    fn test_board_layout() {
        let board = Board {
            language: 0x19,
            date: 0x123456,
            manufacturer: Some("AB".into()),
            ..Default::default()
        };
        let area = build_board(1, &board).unwrap();
        assert_eq!(area.len(), 16);
        assert_eq!(area[1], 2);
        assert_eq!(&area[2..6], &[0x19, 0x56, 0x34, 0x12]);
        assert_eq!(&area[6..9], &[0xC2, b'A', b'B']);
        assert_eq!(&area[9..13], &[0x00, 0x00, 0x00, 0x00]);
        assert_eq!(area[13], 0xC1);
        assert_eq!(area.iter().fold(0u8, |a, b| a.wrapping_add(*b)), 0);
    }

    #[test]
    fn test_board_date_out_of_range() {
        let board = Board {
            date: 0x0100_0000,
            ..Default::default()
        };
        assert_eq!(
            build_board(1, &board),
            Err(EncodeError::DateOutOfRange { date: 0x0100_0000 })
        );
    }

    #[test]
    fn test_padding_invariant() {
        for len in (0..40).filter(|len| *len != 1) {
            let product = Product {
                serial: Some("s".repeat(len)),
                ..Default::default()
            };
            let area = build_product(1, &product).unwrap();
            assert_eq!(area.len() % 8, 0, "serial of {} bytes", len);
            assert_eq!(area[1] as usize * 8, area.len());
        }
    }

    #[test]
    fn test_area_too_large() {
        let extra = (0..40).map(|_| Some("x".repeat(63))).collect();
        let product = Product {
            extra,
            ..Default::default()
        };
        assert!(matches!(
            build_product(1, &product),
            Err(EncodeError::AreaTooLarge {
                area: AreaKind::Product,
                ..
            })
        ));
    }

    #[test]
    fn test_internal() {
        assert!(build_internal(1, &Internal::default()).is_empty());
        assert_eq!(
            build_internal(1, &Internal::new(b"abc".to_vec())),
            vec![0x01, b'a', b'b', b'c', 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(build_internal(2, &Internal::new(vec![7; 7])).len(), 8);
    }
}
