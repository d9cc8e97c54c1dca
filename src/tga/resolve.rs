//! Pixel format resolution: raw pixel units (or palette entries) to RGBA.
//!
//! The conversion is chosen once per image as a plain function pointer, so
//! the per-pixel loop never re-branches on depth or image type.

use crate::error::TgaError;

use super::extension::AttributesType;
use super::header::{FileHeader, ImageType};
use super::utils::split_555;

/// Converts one stored unit to RGBA. The slice is exactly one unit long.
pub type Converter = fn(&[u8]) -> [u8; 4];

/// Layout of one stored color value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// One intensity byte.
    Gray8,
    /// Intensity then alpha; only alpha reaches the output, over black.
    Gray16Alpha,
    /// Little-endian A1R5G5B5; the attribute bit is ignored.
    HighColor15,
    /// B, G, R.
    TrueColor24,
    /// B, G, R, A. `keep_alpha` false forces A to 255.
    TrueColor32 { keep_alpha: bool },
}

impl PixelFormat {
    /// Pick the format for a unit of `size_bytes`.
    ///
    /// `gray` only matters for 2-byte units, which are otherwise 15-bit color.
    pub fn select(size_bytes: usize, gray: bool, keep_alpha: bool) -> Option<Self> {
        Some(match size_bytes {
            1 => Self::Gray8,
            2 if gray => Self::Gray16Alpha,
            2 => Self::HighColor15,
            3 => Self::TrueColor24,
            4 => Self::TrueColor32 { keep_alpha },
            _ => return None,
        })
    }

    pub fn size_bytes(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Gray16Alpha | Self::HighColor15 => 2,
            Self::TrueColor24 => 3,
            Self::TrueColor32 { .. } => 4,
        }
    }

    pub fn converter(self) -> Converter {
        match self {
            Self::Gray8 => gray8,
            Self::Gray16Alpha => gray16_alpha,
            Self::HighColor15 => high_color15,
            Self::TrueColor24 => true_color24,
            Self::TrueColor32 { keep_alpha: true } => true_color32,
            Self::TrueColor32 { keep_alpha: false } => true_color32_opaque,
        }
    }

    /// Convert a single unit. Panics if `unit` is shorter than [`Self::size_bytes`].
    pub fn resolve(self, unit: &[u8]) -> [u8; 4] {
        (self.converter())(unit)
    }
}

fn gray8(u: &[u8]) -> [u8; 4] {
    [u[0], u[0], u[0], 255]
}

fn gray16_alpha(u: &[u8]) -> [u8; 4] {
    [0, 0, 0, u[1]]
}

fn high_color15(u: &[u8]) -> [u8; 4] {
    let [r, g, b] = split_555(u16::from_le_bytes([u[0], u[1]]));
    [r, g, b, 255]
}

fn true_color24(u: &[u8]) -> [u8; 4] {
    [u[2], u[1], u[0], 255]
}

fn true_color32(u: &[u8]) -> [u8; 4] {
    [u[2], u[1], u[0], u[3]]
}

fn true_color32_opaque(u: &[u8]) -> [u8; 4] {
    [u[2], u[1], u[0], 255]
}

fn index8(u: &[u8]) -> u16 {
    u16::from(u[0])
}

fn index16(u: &[u8]) -> u16 {
    u16::from_le_bytes([u[0], u[1]])
}

/// How an image's stored units become RGBA.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelDispatch {
    /// Units are colors.
    Direct(PixelFormat),
    /// Units are palette indices of `index_size` bytes; entries use `entry`.
    Indexed { index_size: usize, entry: PixelFormat },
}

impl PixelDispatch {
    /// Choose the dispatch for an image, validating its depths.
    pub fn for_header(
        header: &FileHeader,
        attributes: Option<AttributesType>,
    ) -> Result<Self, TgaError> {
        let keep_alpha = attributes.is_none_or(AttributesType::keeps_alpha);
        let unsupported = || TgaError::UnsupportedPixelDepth {
            image_type: header.image_type,
            pixel_depth: header.pixel_depth,
            color_map_depth: header.color_map_depth,
        };

        match header.image_type {
            ImageType::NoData => Err(unsupported()),
            ImageType::ColorMapped | ImageType::RleColorMapped => {
                if !header.has_color_map() {
                    return Err(TgaError::MissingColorMap);
                }
                let index_size = match header.pixel_depth {
                    8 => 1,
                    16 => 2,
                    _ => return Err(unsupported()),
                };
                if !is_color_depth(header.color_map_depth) {
                    return Err(unsupported());
                }
                let entry =
                    PixelFormat::select(header.color_map_entry_size_bytes(), false, keep_alpha)
                        .ok_or_else(unsupported)?;
                Ok(Self::Indexed { index_size, entry })
            }
            _ => {
                if !is_color_depth(header.pixel_depth) {
                    return Err(unsupported());
                }
                PixelFormat::select(
                    header.pixel_size_bytes(),
                    header.image_type.is_gray(),
                    keep_alpha,
                )
                .map(Self::Direct)
                .ok_or_else(unsupported)
            }
        }
    }

    /// Bytes per stored unit in the image data.
    pub fn unit_size(self) -> usize {
        match self {
            Self::Direct(format) => format.size_bytes(),
            Self::Indexed { index_size, .. } => index_size,
        }
    }

    /// The format that finally produces RGBA.
    pub fn output_format(self) -> PixelFormat {
        match self {
            Self::Direct(format) | Self::Indexed { entry: format, .. } => format,
        }
    }

    pub(crate) fn index_reader(index_size: usize) -> fn(&[u8]) -> u16 {
        if index_size == 1 { index8 } else { index16 }
    }
}

fn is_color_depth(bits: u8) -> bool {
    matches!(bits, 8 | 15 | 16 | 24 | 32)
}

/// Read-only view of the color map inside the input buffer.
#[derive(Clone, Copy, Debug)]
pub struct Palette<'a> {
    data: &'a [u8],
    base: usize,
    entry_size: usize,
}

impl<'a> Palette<'a> {
    /// Entries are read at `base + index * entry_size` within `data`.
    pub fn new(data: &'a [u8], base: usize, entry_size: usize) -> Self {
        Self {
            data,
            base,
            entry_size,
        }
    }

    pub fn for_header(header: &FileHeader, data: &'a [u8]) -> Self {
        Self::new(data, header.palette_base(), header.color_map_entry_size_bytes())
    }

    /// The raw bytes of entry `index`, or `None` past the end of the buffer.
    #[inline]
    pub fn entry(&self, index: u16) -> Option<&'a [u8]> {
        let start = self.base + usize::from(index) * self.entry_size;
        self.data.get(start..start + self.entry_size)
    }
}

/// Resolve one raw unit of an image to RGBA.
///
/// For indexed images `raw_unit` is the palette index and `palette` must be
/// given; direct images ignore it.
pub fn resolve_pixel(
    raw_unit: &[u8],
    dispatch: PixelDispatch,
    palette: Option<&Palette<'_>>,
) -> Result<[u8; 4], TgaError> {
    match dispatch {
        PixelDispatch::Direct(format) => Ok(format.resolve(raw_unit)),
        PixelDispatch::Indexed { index_size, entry } => {
            let index = PixelDispatch::index_reader(index_size)(raw_unit);
            palette
                .and_then(|p| p.entry(index))
                .map(|bytes| entry.resolve(bytes))
                .ok_or(TgaError::PaletteIndexOutOfRange { index })
        }
    }
}
