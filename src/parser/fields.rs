//! Type/length field decoding

use crate::error::DecodeError;
use crate::types::{AreaKind, END_OF_FIELDS, LENGTH_MASK};
use scroll::{LE, Pread};

/// Iterator over the type/length encoded fields of one area
///
/// Bounded by the area body: running off the end before reaching the
/// end-of-fields marker yields a single `MalformedArea` error. Absent fields
/// come back as empty strings.
pub struct Fields<'a> {
    body: &'a [u8],
    position: usize,
    area: AreaKind,
    done: bool,
}

impl<'a> Fields<'a> {
    /// `body` spans from the first type/length byte to just before the
    /// area checksum
    pub fn new(body: &'a [u8], area: AreaKind) -> Self {
        Self {
            body,
            position: 0,
            area,
            done: false,
        }
    }

    fn fail(&mut self, reason: String) -> Option<Result<&'a str, DecodeError>> {
        self.done = true;
        Some(Err(DecodeError::malformed(self.area, reason)))
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = Result<&'a str, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let type_length: u8 = match self.body.pread_with(self.position, LE) {
            Ok(b) => b,
            Err(_) => return self.fail("field list is not terminated".to_string()),
        };
        if type_length == END_OF_FIELDS {
            self.done = true;
            return None;
        }

        // Encoding bits are not interpreted, only the length.
        let length = (type_length & LENGTH_MASK) as usize;
        let start = self.position + 1;
        let bytes: &'a [u8] = match self.body.pread_with(start, length) {
            Ok(bytes) => bytes,
            Err(_) => {
                return self.fail(format!(
                    "{}-byte field at offset {} overruns the area",
                    length, self.position
                ));
            }
        };
        match std::str::from_utf8(bytes) {
            Ok(s) if s.is_ascii() => {
                self.position = start + length;
                Some(Ok(s))
            }
            _ => self.fail(format!("field at offset {} is not ASCII", self.position)),
        }
    }
}
