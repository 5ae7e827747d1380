//! Pixel-image convenience layer.
//!
//! Images stored in chowimg form decode to 8-bit RGBA. The decoder itself
//! does not know the image dimensions; this module checks the decoded length
//! against them.

use crate::buffer::ByteBuffer;
use crate::decompress::decode;
use crate::error::DecodeError;
use alloc::vec::Vec;

/// Bytes per decoded pixel (R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// Decoded size of a `width` x `height` RGBA image.
///
/// Computed in `u64` so the largest image size is representable on every
/// target.
#[must_use]
pub const fn rgba_len(width: u16, height: u16) -> u64 {
    width as u64 * height as u64 * BYTES_PER_PIXEL as u64
}

/// Decodes a complete hunk stream holding a `width` x `height` RGBA image.
///
/// Fails with [`DecodeError::ImageSizeMismatch`] if the stream decodes to a
/// different number of bytes. The output starts at the compressed size and
/// grows with the decoded data, never at the claimed image size.
pub fn decode_rgba(compressed: &[u8], width: u16, height: u16) -> Result<Vec<u8>, DecodeError> {
    let expected = rgba_len(width, height);
    let initial = usize::try_from(expected).map_or(compressed.len(), |len| {
        len.min(compressed.len())
    });

    let mut input = ByteBuffer::from_source(compressed);
    let mut output = ByteBuffer::with_capacity(initial);
    decode(&mut output, &mut input, compressed.len())?;

    let actual = output.len() as u64;
    if actual != expected {
        return Err(DecodeError::ImageSizeMismatch { expected, actual });
    }

    Ok(output.into_vec())
}
