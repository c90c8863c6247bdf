//! Area kinds and their fixed field layouts

use std::fmt;

/// Field names of the chassis info area, in wire order
const CHASSIS_FIELDS: &[&str] = &["part", "serial"];

/// Field names of the board info area, in wire order
const BOARD_FIELDS: &[&str] = &["manufacturer", "product", "serial", "part", "fileid"];

/// Field names of the product info area, in wire order
const PRODUCT_FIELDS: &[&str] = &[
    "manufacturer",
    "product",
    "part",
    "version",
    "serial",
    "asset",
    "fileid",
];

/// The regions of a FRU blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// The 8-byte common header
    Header,
    /// Internal use area (opaque payload)
    Internal,
    Chassis,
    Board,
    Product,
}

impl AreaKind {
    /// Lower-case name, also used as the config section name
    pub fn name(self) -> &'static str {
        match self {
            AreaKind::Header => "common",
            AreaKind::Internal => "internal",
            AreaKind::Chassis => "chassis",
            AreaKind::Board => "board",
            AreaKind::Product => "product",
        }
    }

    /// Names of the TLV fields that precede any extras
    ///
    /// Empty for the header and the internal area, which carry no fields.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            AreaKind::Header | AreaKind::Internal => &[],
            AreaKind::Chassis => CHASSIS_FIELDS,
            AreaKind::Board => BOARD_FIELDS,
            AreaKind::Product => PRODUCT_FIELDS,
        }
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaKind::Header => f.write_str("header"),
            other => f.write_str(other.name()),
        }
    }
}
