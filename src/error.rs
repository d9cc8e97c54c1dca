use alloc::string::String;
use enough::StopReason;

use crate::tga::ImageType;

/// Errors from TGA decoding.
///
/// Every variant is fatal: the decode call returns no pixels.
/// Recoverable problems are reported as [`TgaWarning`] instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TgaError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unsupported color map type {0} (expected 0 or 1)")]
    UnsupportedColorMapType(u8),

    #[error("unsupported image type {0}")]
    UnsupportedImageType(u8),

    #[error(
        "unsupported pixel depth {pixel_depth} for {image_type:?} (color map entry depth {color_map_depth})"
    )]
    UnsupportedPixelDepth {
        image_type: ImageType,
        pixel_depth: u8,
        color_map_depth: u8,
    },

    #[error("color-mapped image without a color map")]
    MissingColorMap,

    #[error("truncated RLE stream: {fault} after {produced} of {expected} bytes")]
    TruncatedStream {
        expected: usize,
        produced: usize,
        fault: StreamFault,
    },

    #[error("palette index {index} points outside the input")]
    PaletteIndexOutOfRange { index: u16 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for TgaError {
    fn from(r: StopReason) -> Self {
        TgaError::Cancelled(r)
    }
}

/// What went wrong inside an RLE stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamFault {
    /// The compressed input ended before the image was filled.
    InputExhausted,
    /// A packet would write past the end of the image.
    OutputOverrun,
}

impl core::fmt::Display for StreamFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StreamFault::InputExhausted => f.write_str("input exhausted"),
            StreamFault::OutputOverrun => f.write_str("output overrun"),
        }
    }
}

/// Non-fatal problems found while decoding. Pixel data is still produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TgaWarning {
    /// The extension record declares a size other than 495; it was ignored.
    #[error("malformed extension area: declared size {declared_size}, expected 495")]
    MalformedExtension { declared_size: u16 },

    /// The extension offset points past the end of the file; it was ignored.
    #[error("extension area at offset {offset} runs past end of file")]
    ExtensionOutOfBounds { offset: u32 },
}
