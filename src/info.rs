use crate::error::TgaError;
use crate::tga::{self, ImageType, Version};

/// Image properties read from the header and footer, without decoding pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u16,
    pub height: u16,
    pub image_type: ImageType,
    /// Bits per stored pixel or palette index.
    pub pixel_depth: u8,
    pub version: Version,
    pub rle: bool,
    pub top_to_bottom: bool,
    /// Whether the pixel format can carry alpha.
    pub has_transparency: bool,
}

impl ImageInfo {
    /// Probe a TGA file. Only the fixed header and the footer are read.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TgaError> {
        let header = tga::parse_header(data)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            image_type: header.image_type,
            pixel_depth: header.pixel_depth,
            version: header.version,
            rle: header.is_rle(),
            top_to_bottom: header.is_top_to_bottom(),
            has_transparency: header.has_transparency(),
        })
    }
}
