//! TGA run-length decoding.
//!
//! Each packet starts with a control byte. High bit set: a run packet, one
//! pixel unit repeated `(control & 0x7F) + 1` times. High bit clear: a raw
//! packet, `control + 1` literal pixel units. Packets may span scan lines.

use alloc::vec::Vec;

use enough::{Stop, Unstoppable};

use crate::error::{StreamFault, TgaError};

const RUN_FLAG: u8 = 0x80;
const MAX_PACKET_UNITS: usize = 128;
const STOP_CHECK_PACKETS: usize = 4096;

/// Expand `compressed` into exactly `expected_len` bytes of pixel units.
///
/// Bytes inside each unit are copied verbatim. Running out of input or a
/// packet that would overshoot `expected_len` is a [`TgaError::TruncatedStream`].
pub fn decode_rle(
    compressed: &[u8],
    pixel_size: usize,
    expected_len: usize,
) -> Result<Vec<u8>, TgaError> {
    decode_rle_with_stop(compressed, pixel_size, expected_len, &Unstoppable)
}

pub(crate) fn decode_rle_with_stop(
    compressed: &[u8],
    pixel_size: usize,
    expected_len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, TgaError> {
    let truncated = |fault: StreamFault, produced: usize| TgaError::TruncatedStream {
        expected: expected_len,
        produced,
        fault,
    };

    // Every packet costs at least `1 + pixel_size` input bytes and yields at
    // most 128 units, so the output can never outgrow this.
    let max_output = (compressed.len() / pixel_size.saturating_add(1))
        .saturating_mul(MAX_PACKET_UNITS)
        .saturating_mul(pixel_size);
    if expected_len > max_output {
        return Err(truncated(StreamFault::InputExhausted, 0));
    }

    let mut out = Vec::with_capacity(expected_len);
    let mut rest = compressed;
    let mut packets = 0usize;

    while out.len() < expected_len {
        let (&control, tail) = rest
            .split_first()
            .ok_or_else(|| truncated(StreamFault::InputExhausted, out.len()))?;
        rest = tail;

        let count = usize::from(control & !RUN_FLAG) + 1;
        let packet_bytes = count * pixel_size;
        if out.len() + packet_bytes > expected_len {
            return Err(truncated(StreamFault::OutputOverrun, out.len()));
        }

        let body_len = if control & RUN_FLAG != 0 {
            pixel_size
        } else {
            packet_bytes
        };
        let (body, tail) = rest
            .split_at_checked(body_len)
            .ok_or_else(|| truncated(StreamFault::InputExhausted, out.len()))?;
        rest = tail;

        if control & RUN_FLAG != 0 {
            for _ in 0..count {
                out.extend_from_slice(body);
            }
        } else {
            out.extend_from_slice(body);
        }

        packets += 1;
        if packets % STOP_CHECK_PACKETS == 0 {
            stop.check()?;
        }
    }

    log::trace!(
        "rle: {packets} packets, {} of {} input bytes consumed",
        compressed.len() - rest.len(),
        compressed.len()
    );
    Ok(out)
}
