//! Core types for FRU records

mod area;
mod header;
mod record;

pub use area::AreaKind;
pub use header::{
    CommonHeader, DEFAULT_VERSION, END_OF_FIELDS, HEADER_SIZE, LENGTH_MASK, MAX_DATE,
    MAX_FIELD_LEN, MAX_UNITS, OFFSET_UNIT, TYPE_ASCII,
};
pub use record::{Board, Chassis, Common, InfoArea, Internal, Product, Record};
