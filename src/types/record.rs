//! Normalized FRU record - the model shared by the encoder and parser

use super::{AreaKind, DEFAULT_VERSION};
use crate::error::UnknownField;
use std::borrow::Cow;

/// A complete FRU inventory record
///
/// Areas that are `None` are absent from the blob entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub common: Common,
    pub internal: Option<Internal>,
    pub chassis: Option<Chassis>,
    pub board: Option<Board>,
    pub product: Option<Product>,
}

impl Record {
    /// Create an empty record that encodes to a blob of `size` bytes
    pub fn with_size(size: u32) -> Self {
        Self {
            common: Common {
                version: DEFAULT_VERSION,
                size: Some(size),
            },
            ..Default::default()
        }
    }
}

/// Settings shared by the whole blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Common {
    /// Format version, written to the common header and every area header
    pub version: u8,
    /// Total blob size in bytes; required for encoding
    pub size: Option<u32>,
}

impl Default for Common {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            size: None,
        }
    }
}

/// Internal use area - an opaque payload with no length, fields or checksum
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Internal {
    pub data: Vec<u8>,
}

impl Internal {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

/// Chassis info area
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chassis {
    pub chassis_type: u8,
    pub part: Option<String>,
    pub serial: Option<String>,
    /// `extra1..extraN`, positionally
    pub extra: Vec<Option<String>>,
}

/// Board info area
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub language: u8,
    /// Manufacturing date, 24 bits, stored little-endian
    pub date: u32,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial: Option<String>,
    pub part: Option<String>,
    pub fileid: Option<String>,
    pub extra: Vec<Option<String>>,
}

/// Product info area
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub language: u8,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub part: Option<String>,
    pub version: Option<String>,
    pub serial: Option<String>,
    pub asset: Option<String>,
    pub fileid: Option<String>,
    pub extra: Vec<Option<String>>,
}

/// An area made of a fixed prefix followed by type/length encoded fields
///
/// Named fields come first, in the order given by `KIND.field_names()`,
/// then `extra1..extraN`.
pub trait InfoArea: Default {
    const KIND: AreaKind;

    /// Slot of the named field at `index` in wire order
    fn named_slot(&self, index: usize) -> Option<&Option<String>>;

    fn named_slot_mut(&mut self, index: usize) -> Option<&mut Option<String>>;

    fn extra(&self) -> &[Option<String>];

    fn extra_mut(&mut self) -> &mut Vec<Option<String>>;

    /// All field values in wire order, named fields first
    fn fields(&self) -> Vec<(Cow<'static, str>, Option<&str>)> {
        let names = Self::KIND.field_names();
        let named = names.iter().enumerate().map(|(i, name)| {
            let value = self.named_slot(i).and_then(|v| v.as_deref());
            (Cow::Borrowed(*name), value)
        });
        let extras = self
            .extra()
            .iter()
            .enumerate()
            .map(|(i, v)| (Cow::Owned(format!("extra{}", i + 1)), v.as_deref()));
        named.chain(extras).collect()
    }

    /// Look up a field by its config name (`serial`, `extra3`, ...)
    fn field(&self, name: &str) -> Option<&str> {
        if let Some(i) = Self::KIND.field_names().iter().position(|n| *n == name) {
            return self.named_slot(i).and_then(|v| v.as_deref());
        }
        let index = extra_index(name)?;
        self.extra().get(index).and_then(|v| v.as_deref())
    }

    /// Set a field by its config name; empty values are stored as `None`
    ///
    /// Setting `extraN` beyond the current extras fills the gap with `None`.
    fn set_field(&mut self, name: &str, value: Option<String>) -> Result<(), UnknownField> {
        let value = value.filter(|v| !v.is_empty());
        if let Some(i) = Self::KIND.field_names().iter().position(|n| *n == name) {
            if let Some(slot) = self.named_slot_mut(i) {
                *slot = value;
                return Ok(());
            }
        }
        let index = extra_index(name).ok_or_else(|| UnknownField {
            area: Self::KIND,
            name: name.to_string(),
        })?;
        let extra = self.extra_mut();
        if extra.len() <= index {
            extra.resize(index + 1, None);
        }
        extra[index] = value;
        Ok(())
    }

    /// Store the next decoded field, named slots first, then extras
    fn push_field(&mut self, position: usize, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match self.named_slot_mut(position) {
            Some(slot) => *slot = value,
            None => self.extra_mut().push(value),
        }
    }
}

/// Zero-based index of an `extraN` key; `extra0` and malformed keys are `None`
fn extra_index(name: &str) -> Option<usize> {
    let n: usize = name.strip_prefix("extra")?.parse().ok()?;
    n.checked_sub(1)
}

macro_rules! info_area {
    ($ty:ty, $kind:expr, [$($field:ident),+]) => {
        impl InfoArea for $ty {
            const KIND: AreaKind = $kind;

            fn named_slot(&self, index: usize) -> Option<&Option<String>> {
                [$(&self.$field),+].get(index).copied()
            }

            fn named_slot_mut(&mut self, index: usize) -> Option<&mut Option<String>> {
                [$(&mut self.$field),+].into_iter().nth(index)
            }

            fn extra(&self) -> &[Option<String>] {
                &self.extra
            }

            fn extra_mut(&mut self) -> &mut Vec<Option<String>> {
                &mut self.extra
            }
        }
    };
}

info_area!(Chassis, AreaKind::Chassis, [part, serial]);
info_area!(
    Board,
    AreaKind::Board,
    [manufacturer, product, serial, part, fileid]
);
info_area!(
    Product,
    AreaKind::Product,
    [manufacturer, product, part, version, serial, asset, fileid]
);
