use alloc::vec::Vec;

use enough::Stop;
#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::{TgaError, TgaWarning};
use crate::limits::Limits;
use crate::tga::{ExtensionMetadata, FileHeader};

/// Decoded image: RGBA8 pixels, row-major, first row at the top.
///
/// `pixels().len()` is always `width * height * 4`.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u16,
    pub height: u16,
    /// Header and footer fields of the source file.
    pub header: FileHeader,
    /// v2 extension metadata, when present and well-formed.
    pub extension: Option<ExtensionMetadata>,
    /// Recoverable problems met while decoding.
    pub warnings: Vec<TgaWarning>,
}

impl DecodeOutput {
    pub(crate) fn new(
        pixels: Vec<u8>,
        header: FileHeader,
        extension: Option<ExtensionMetadata>,
        warnings: Vec<TgaWarning>,
    ) -> Self {
        debug_assert_eq!(
            pixels.len(),
            usize::from(header.width) * usize::from(header.height) * 4
        );
        Self {
            pixels,
            width: header.width,
            height: header.height,
            header,
            extension,
            warnings,
        }
    }

    /// Access the RGBA8 pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the RGBA8 pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Whether any pixel is not fully opaque.
    pub fn has_transparent_pixels(&self) -> bool {
        self.pixels.chunks_exact(4).any(|px| px[3] != 255)
    }

    /// View the pixel data as typed RGBA8 pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgba(&self) -> &[rgb::RGBA8] {
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(
            self.as_rgba(),
            usize::from(self.width),
            usize::from(self.height),
        )
    }

    /// Convert to an [`imgref::ImgVec`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.as_rgba().to_vec(),
            usize::from(self.width),
            usize::from(self.height),
        )
    }
}

/// Builder for a single decode call.
///
/// ```no_run
/// use zentga::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your TGA bytes
/// let limits = Limits { max_pixels: Some(64 * 1024 * 1024), ..Default::default() };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{}", image.width, image.height);
/// # Ok::<(), zentga::TgaError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images whose dimensions or allocations exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode to RGBA8. `stop` is polled between rows and RLE packets.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, TgaError> {
        crate::tga::decode(self.data, self.limits, &stop)
    }
}
