//! # Chowimg Decompression
//!
//! `chowimg` is a safe, pure-Rust decoder for the hunk-based run-length and
//! back-reference compression used for image pixel data in some game asset
//! archives.
//!
//! A stream is a sequence of hunks. Each hunk is a little-endian `u32`
//! compressed length followed by segments of a control byte, a literal run,
//! and an optional back-reference into the bytes the hunk already produced.
//!
//! ## Example
//!
//! ```rust
//! use chowimg::{ByteBuffer, decode};
//!
//! // One hunk of 9 bytes:
//! // Control 0x31: 3 literals ("abc"), back-reference count 1 + 4
//! // Distance 3: copy 5 bytes starting 3 bytes behind the cursor
//! // Control 0x20: 2 literals ("!!"), end of hunk
//! let compressed = [
//!     0x09, 0x00, 0x00, 0x00,
//!     0x31, b'a', b'b', b'c', 0x03, 0x00,
//!     0x20, b'!', b'!',
//! ];
//!
//! let mut input = ByteBuffer::from_source(&compressed);
//! let mut output = ByteBuffer::with_capacity(0xFFFF);
//! decode(&mut output, &mut input, compressed.len()).expect("Decompression failed");
//! assert_eq!(output.filled(), b"abcabcab!!");
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod buffer;
pub mod decompress;
pub mod error;
pub mod rgba;

pub use buffer::{ByteBuffer, Whence};
pub use decompress::{decode, decode_hunk};
pub use error::{BufferError, DecodeError};
pub use rgba::decode_rgba;
