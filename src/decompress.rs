use crate::buffer::ByteBuffer;
use crate::error::DecodeError;

type Result<T> = core::result::Result<T, DecodeError>;

// --- Constants ---

/// Nibble value announcing that continuation bytes extend the count.
const NIBBLE_EXTENDED: u8 = 0x0F;

/// Continuation byte value announcing that another continuation byte follows.
const BYTE_EXTENDED: u8 = 0xFF;

/// Every back-reference copies at least this many bytes.
const MIN_BACKREF_LEN: usize = 4;

/// Decodes a sequence of hunks from `input` into `output`.
///
/// Hunks are consumed from the input cursor until it reaches `input_end`.
/// Decoded bytes are appended at the output cursor, growing the buffer as
/// needed. On failure the bytes already written stay in `output`.
pub fn decode(output: &mut ByteBuffer, input: &mut ByteBuffer, input_end: usize) -> Result<()> {
    let out_start = output.tell();
    let mut hunk = 0;

    while input.tell() < input_end {
        read_hunk(output, input, hunk)?;
        hunk += 1;
    }

    log::debug!(
        "Decoded {hunk} hunks into {} bytes",
        output.tell() - out_start
    );
    Ok(())
}

/// Decodes a single hunk at the input cursor.
pub fn decode_hunk(output: &mut ByteBuffer, input: &mut ByteBuffer) -> Result<()> {
    read_hunk(output, input, 0).map(|_| ())
}

/// Reads a nibble-seeded count.
///
/// A nibble below 15 is the count itself. A nibble of 15 is followed by
/// continuation bytes that are summed into the count; reading stops after the
/// first byte that is not 255.
pub fn read_variable_length_size(input: &mut ByteBuffer, nibble: u8) -> Result<usize> {
    let mut size = usize::from(nibble);

    if nibble == NIBBLE_EXTENDED {
        loop {
            let byte = input.read_u8()?;
            size += usize::from(byte);
            if byte != BYTE_EXTENDED {
                break;
            }
        }
    }

    Ok(size)
}

/// Decodes one hunk and returns the number of bytes it produced.
///
/// `hunk` only labels diagnostics.
fn read_hunk(output: &mut ByteBuffer, input: &mut ByteBuffer, hunk: usize) -> Result<usize> {
    let compressed_size = input.read_u32()? as usize;
    let hunk_end = input.tell().saturating_add(compressed_size);

    // Output is never smaller than the compressed payload; the reservation is
    // capped by the input that remains.
    output.ensure_writable(compressed_size.min(input.remaining()))?;

    // Back-references may only reach bytes produced by this hunk.
    let mut produced = 0;

    while input.tell() < hunk_end {
        // 1. Control byte: literal count nibble, back-reference count nibble
        let control = input.read_u8()?;
        let literal_nibble = control >> 4;
        let backref_nibble = control & 0x0F;

        // 2. Literal run
        let literal_count = read_variable_length_size(input, literal_nibble)?;
        output.ensure_writable(literal_count)?;
        output.write(input.read_slice(literal_count)?)?;
        produced += literal_count;

        // A hunk may end right after a literal run.
        if input.tell() >= hunk_end {
            break;
        }

        // 3. Back-reference
        let distance = input.read_u16()?;
        if usize::from(distance) > produced {
            return Err(DecodeError::BackReferenceUnderflow {
                hunk,
                distance,
                produced,
            });
        }
        let rewind_start = output.tell() - usize::from(distance);

        let backref_len = read_variable_length_size(input, backref_nibble)? + MIN_BACKREF_LEN;
        output.ensure_writable(backref_len)?;

        log::trace!(
            "hunk {hunk}: copy from {rewind_start} to {} x{backref_len}",
            output.tell()
        );
        output.copy_from_self(rewind_start, backref_len)?;
        produced += backref_len;
    }

    log::debug!("hunk {hunk}: {compressed_size} compressed bytes -> {produced} bytes");
    Ok(produced)
}
