//! Two's-complement checksums over header and area bytes

use crate::error::DecodeError;
use crate::types::AreaKind;
use scroll::Pread;

/// Checksum byte that makes `bytes` plus the result sum to zero mod 256
pub fn compute(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |acc, b| acc.wrapping_add(*b))
        .wrapping_neg()
}

/// Check that `blob[offset..offset + length]`, trailing checksum included,
/// sums to zero mod 256
pub fn validate(
    blob: &[u8],
    offset: usize,
    length: usize,
    area: AreaKind,
) -> Result<(), DecodeError> {
    let region: &[u8] = blob.pread_with(offset, length).map_err(|_| {
        DecodeError::malformed(
            area,
            format!(
                "{} bytes at offset {} exceed the {}-byte blob",
                length,
                offset,
                blob.len()
            ),
        )
    })?;

    let sum = region.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != 0 {
        return Err(DecodeError::ChecksumMismatch { area, offset });
    }
    Ok(())
}
