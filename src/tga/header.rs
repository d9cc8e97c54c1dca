//! Fixed 18-byte TGA header and v2 footer probing.

use crate::error::TgaError;

use super::utils::{depth_to_bytes, u32_le};

/// Size of the fixed header at the start of every TGA file.
pub const HEADER_SIZE: usize = 18;

/// Size of the v2 footer at the end of the file.
pub const FOOTER_SIZE: usize = 26;

/// Trailing signature of a v2 file: `TRUEVISION-XFILE` + `.` + NUL.
pub const V2_SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";

/// Image descriptor bit selecting top-to-bottom row order.
const TOP_TO_BOTTOM: u8 = 0x20;

/// Image type, header byte 2. Values above 8 are RLE-encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageType {
    NoData,
    ColorMapped,
    TrueColor,
    GrayScale,
    RleColorMapped,
    RleTrueColor,
    RleGrayScale,
}

impl ImageType {
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::NoData,
            1 => Self::ColorMapped,
            2 => Self::TrueColor,
            3 => Self::GrayScale,
            9 => Self::RleColorMapped,
            10 => Self::RleTrueColor,
            11 => Self::RleGrayScale,
            _ => return None,
        })
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::NoData => 0,
            Self::ColorMapped => 1,
            Self::TrueColor => 2,
            Self::GrayScale => 3,
            Self::RleColorMapped => 9,
            Self::RleTrueColor => 10,
            Self::RleGrayScale => 11,
        }
    }

    pub fn is_rle(self) -> bool {
        self.to_u8() > 8
    }

    pub fn is_color_mapped(self) -> bool {
        matches!(self, Self::ColorMapped | Self::RleColorMapped)
    }

    pub fn is_gray(self) -> bool {
        matches!(self, Self::GrayScale | Self::RleGrayScale)
    }
}

/// File layout revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    /// v1 layout: header, id, color map, image data.
    V1,
    /// Adds the optional extension area and the 26-byte footer.
    V2,
}

/// Everything the fixed header and the v2 footer say about a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub id_length: u8,
    /// 0 = no color map, 1 = color map present.
    pub color_map_type: u8,
    pub image_type: ImageType,
    /// First color map entry, as stored.
    pub color_map_origin: u16,
    /// Number of color map entries.
    pub color_map_length: u16,
    /// Bits per color map entry.
    pub color_map_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    /// Bits per pixel (or per palette index for color-mapped images).
    pub pixel_depth: u8,
    /// Row order, alpha depth and interleave bits.
    pub image_descriptor: u8,
    pub version: Version,
    /// Offset of the extension area; 0 when absent or for v1 files.
    pub extension_offset: u32,
    /// Offset of the developer directory; 0 when absent or for v1 files.
    pub developer_directory_offset: u32,
}

impl FileHeader {
    /// Bytes per stored pixel or palette index.
    pub fn pixel_size_bytes(&self) -> usize {
        depth_to_bytes(self.pixel_depth)
    }

    /// Bytes per color map entry.
    pub fn color_map_entry_size_bytes(&self) -> usize {
        depth_to_bytes(self.color_map_depth)
    }

    pub fn has_color_map(&self) -> bool {
        self.color_map_type == 1
    }

    pub fn is_rle(&self) -> bool {
        self.image_type.is_rle()
    }

    /// Where the image data field starts, after the id field and color map.
    pub fn image_data_offset(&self) -> usize {
        let color_map_bytes = if self.has_color_map() {
            usize::from(self.color_map_length) * self.color_map_entry_size_bytes()
        } else {
            0
        };
        HEADER_SIZE + usize::from(self.id_length) + color_map_bytes
    }

    /// Byte offset that palette index 0 is resolved against.
    pub fn palette_base(&self) -> usize {
        HEADER_SIZE + usize::from(self.id_length) + usize::from(self.color_map_origin)
    }

    pub fn is_top_to_bottom(&self) -> bool {
        self.image_descriptor & TOP_TO_BOTTOM != 0
    }

    /// Alpha channel bits declared in the image descriptor (not interpreted here).
    pub fn alpha_bits(&self) -> u8 {
        self.image_descriptor & 0x0F
    }

    /// Whether the decoded image can contain non-opaque pixels.
    pub fn has_transparency(&self) -> bool {
        let pixel_size = self.pixel_size_bytes();
        pixel_size == 4
            || (self.has_color_map() && self.color_map_entry_size_bytes() == 4)
            || (pixel_size == 2 && self.image_type.is_gray())
    }
}

/// Parse the fixed header and probe the footer.
pub fn parse_header(data: &[u8]) -> Result<FileHeader, TgaError> {
    let h = data.get(..HEADER_SIZE).ok_or(TgaError::UnexpectedEof)?;

    let color_map_type = h[1];
    if color_map_type > 1 {
        return Err(TgaError::UnsupportedColorMapType(color_map_type));
    }
    let image_type = ImageType::from_u8(h[2]).ok_or(TgaError::UnsupportedImageType(h[2]))?;
    let word = |offset: usize| u16::from_le_bytes([h[offset], h[offset + 1]]);

    let version = detect_version(data);
    let (extension_offset, developer_directory_offset) = match version {
        Version::V2 if data.len() >= FOOTER_SIZE => {
            let footer = data.len() - FOOTER_SIZE;
            (
                u32_le(data, footer).unwrap_or(0),
                u32_le(data, footer + 4).unwrap_or(0),
            )
        }
        _ => (0, 0),
    };

    Ok(FileHeader {
        id_length: h[0],
        color_map_type,
        image_type,
        color_map_origin: word(3),
        color_map_length: word(5),
        color_map_depth: h[7],
        x_origin: word(8),
        y_origin: word(10),
        width: word(12),
        height: word(14),
        pixel_depth: h[16],
        image_descriptor: h[17],
        version,
        extension_offset,
        developer_directory_offset,
    })
}

/// A file is v2 exactly when its last 18 bytes are the signature.
pub fn detect_version(data: &[u8]) -> Version {
    match data.len().checked_sub(V2_SIGNATURE.len()) {
        Some(start) if &data[start..] == V2_SIGNATURE => Version::V2,
        _ => Version::V1,
    }
}

/// End of the image data field: excludes the v2 extension area and footer.
pub fn footer_offset(header: &FileHeader, total_len: usize) -> usize {
    match header.version {
        Version::V1 => total_len,
        Version::V2 if header.extension_offset != 0 => header.extension_offset as usize,
        Version::V2 => total_len.saturating_sub(FOOTER_SIZE),
    }
}
