//! Type/length field encoding

use crate::error::EncodeError;
use crate::types::{AreaKind, END_OF_FIELDS, MAX_FIELD_LEN, TYPE_ASCII};
use std::borrow::Cow;

/// Append one field: `0x00` when absent or empty, otherwise a type/length
/// byte followed by the ASCII bytes
///
/// One-character values are rejected since their type/length byte would
/// read back as the end-of-fields marker.
pub fn write_field(
    out: &mut Vec<u8>,
    area: AreaKind,
    name: &str,
    value: Option<&str>,
) -> Result<(), EncodeError> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            out.push(0x00);
            return Ok(());
        }
    };

    if !value.is_ascii() {
        return Err(EncodeError::NonAsciiField {
            area,
            field: name.to_string(),
        });
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(EncodeError::FieldTooLong {
            area,
            field: name.to_string(),
            length: value.len(),
        });
    }

    // 0xC1 is reserved for the end-of-fields marker
    if value.len() == 1 {
        return Err(EncodeError::SingleCharField {
            area,
            field: name.to_string(),
        });
    }

    out.push(value.len() as u8 | TYPE_ASCII);
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Append every field in order followed by the end-of-fields marker
pub fn write_fields(
    out: &mut Vec<u8>,
    area: AreaKind,
    fields: &[(Cow<'static, str>, Option<&str>)],
) -> Result<(), EncodeError> {
    for (name, value) in fields {
        write_field(out, area, name, *value)?;
    }
    out.push(END_OF_FIELDS);
    Ok(())
}
