//! Format constants and the common header

use super::AreaKind;

/// Size of the common header in bytes, checksum included
pub const HEADER_SIZE: usize = 8;

/// Header offsets and area lengths are counted in units of this many bytes
pub const OFFSET_UNIT: usize = 8;

/// Format version written when none is configured
pub const DEFAULT_VERSION: u8 = 1;

/// Type/length byte that terminates an area's field list
pub const END_OF_FIELDS: u8 = 0xC1;

/// Encoding bits for 8-bit ASCII + Latin-1 fields
pub const TYPE_ASCII: u8 = 0xC0;

/// Low six bits of a type/length byte hold the field length
pub const LENGTH_MASK: u8 = 0x3F;

/// Longest string a type/length byte can describe
pub const MAX_FIELD_LEN: usize = LENGTH_MASK as usize;

/// Largest value that fits the 3-byte board manufacturing date
pub const MAX_DATE: u32 = 0xFF_FFFF;

/// Largest offset or length expressible in one header byte, in units
pub const MAX_UNITS: usize = u8::MAX as usize;

/// Decoded form of the 8-byte common header
///
/// Offsets are kept in units of [`OFFSET_UNIT`]; zero means the area is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommonHeader {
    pub version: u8,
    pub internal: u8,
    pub chassis: u8,
    pub board: u8,
    pub product: u8,
    pub multirecord: u8,
}

impl CommonHeader {
    /// Offset of `area` in units, or 0 when absent
    pub fn offset_units(&self, area: AreaKind) -> u8 {
        match area {
            AreaKind::Header => 0,
            AreaKind::Internal => self.internal,
            AreaKind::Chassis => self.chassis,
            AreaKind::Board => self.board,
            AreaKind::Product => self.product,
        }
    }

    /// Byte offset of `area` from the start of the blob, if present
    pub fn offset(&self, area: AreaKind) -> Option<usize> {
        match self.offset_units(area) {
            0 => None,
            units => Some(units as usize * OFFSET_UNIT),
        }
    }

    pub(crate) fn set_offset_units(&mut self, area: AreaKind, units: u8) {
        match area {
            AreaKind::Header => {}
            AreaKind::Internal => self.internal = units,
            AreaKind::Chassis => self.chassis = units,
            AreaKind::Board => self.board = units,
            AreaKind::Product => self.product = units,
        }
    }

    /// Serialize with the reserved byte and trailing checksum
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [
            self.version,
            self.internal,
            self.chassis,
            self.board,
            self.product,
            self.multirecord,
            0x00,
            0x00,
        ];
        out[HEADER_SIZE - 1] = crate::checksum::compute(&out[..HEADER_SIZE - 1]);
        out
    }
}
