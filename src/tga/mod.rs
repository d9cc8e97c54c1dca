//! TGA (Truevision Targa) decoding.
//!
//! Supports color-mapped, true-color and grayscale images, raw and RLE
//! storage, 8/15/16/24/32-bit pixels, and both the v1 layout and the v2
//! layout with its footer and extension area.
//!
//! Most callers want the top-level [`crate::decode`]; the pieces here are
//! public for tools that need the header, the RLE stream, or single pixels.

pub mod extension;
pub mod header;
pub mod resolve;
pub mod rle;
mod utils;

pub use extension::{
    AttributesType, ExtensionMetadata, JobTime, KeyColor, Ratio, SoftwareVersion, Timestamp,
    parse_extension,
};
pub use header::{FileHeader, ImageType, Version, detect_version, footer_offset, parse_header};
pub use resolve::{Palette, PixelDispatch, PixelFormat, resolve_pixel};
pub use rle::decode_rle;
pub use utils::expand_5_to_8;

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;
use enough::Stop;

use crate::decode::DecodeOutput;
use crate::error::{TgaError, TgaWarning};
use crate::limits::Limits;

/// Parse the extension area of a v2 file, if it has one.
///
/// Problems with the record are returned as warnings and logged, never as errors.
pub(crate) fn read_extension(
    header: &FileHeader,
    data: &[u8],
) -> (Option<ExtensionMetadata>, Option<TgaWarning>) {
    if header.version != Version::V2 || header.extension_offset == 0 {
        return (None, None);
    }
    match parse_extension(data, header.extension_offset) {
        Ok(ext) => (Some(ext), None),
        Err(warning) => {
            log::warn!("tga: ignoring extension area: {warning}");
            (None, Some(warning))
        }
    }
}

/// Source rows of the raw pixel units, and the direction they run in.
#[derive(Clone, Copy)]
struct Rows {
    width: usize,
    height: usize,
    unit: usize,
    top_to_bottom: bool,
}

impl Rows {
    /// Source row that feeds destination row `dst`.
    #[inline]
    fn source_row(&self, dst: usize) -> usize {
        if self.top_to_bottom {
            dst
        } else {
            self.height - 1 - dst
        }
    }
}

/// Walk every destination pixel, feeding it the matching source unit.
fn fill_rows<F>(
    raw: &[u8],
    out: &mut [u8],
    rows: Rows,
    stop: &dyn Stop,
    mut resolve: F,
) -> Result<(), TgaError>
where
    F: FnMut(&[u8]) -> Result<[u8; 4], TgaError>,
{
    let src_stride = rows.width * rows.unit;
    let dst_stride = rows.width * 4;

    for dst_row in 0..rows.height {
        if dst_row % 16 == 0 {
            stop.check()?;
        }
        let src_start = rows.source_row(dst_row) * src_stride;
        let src = &raw[src_start..src_start + src_stride];
        let dst = &mut out[dst_row * dst_stride..(dst_row + 1) * dst_stride];

        for (unit, px) in src.chunks_exact(rows.unit).zip(dst.chunks_exact_mut(4)) {
            px.copy_from_slice(&resolve(unit)?);
        }
    }
    Ok(())
}

/// Decode a whole TGA file to RGBA8.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, TgaError> {
    let header = parse_header(data)?;
    if let Some(limits) = limits {
        limits.check_dimensions(header.width, header.height)?;
    }

    let (extension, warning) = read_extension(&header, data);
    let warnings: Vec<TgaWarning> = warning.into_iter().collect();

    let width = usize::from(header.width);
    let height = usize::from(header.height);
    let too_large = || TgaError::DimensionsTooLarge {
        width: u32::from(header.width),
        height: u32::from(header.height),
    };
    let pixel_count = width.checked_mul(height).ok_or_else(too_large)?;
    let out_len = pixel_count.checked_mul(4).ok_or_else(too_large)?;

    if header.image_type == ImageType::NoData {
        if let Some(limits) = limits {
            limits.check_memory(out_len)?;
        }
        log::debug!("tga: {width}x{height} with no image data");
        return Ok(DecodeOutput::new(vec![0xFF; out_len], header, extension, warnings));
    }

    let attributes = extension.as_ref().and_then(|ext| ext.attributes_type);
    let dispatch = PixelDispatch::for_header(&header, attributes)?;
    let unit = dispatch.unit_size();
    let raw_len = pixel_count.checked_mul(unit).ok_or_else(too_large)?;

    if let Some(limits) = limits {
        let scratch = if header.is_rle() { raw_len } else { 0 };
        limits.check_memory(out_len.saturating_add(scratch))?;
    }
    stop.check()?;

    let start = header.image_data_offset();
    let end = footer_offset(&header, data.len()).min(data.len());
    let region = data.get(start..).ok_or(TgaError::UnexpectedEof)?;
    let region = &region[..end.saturating_sub(start)];

    let raw: Cow<'_, [u8]> = if header.is_rle() {
        Cow::Owned(rle::decode_rle_with_stop(region, unit, raw_len, stop)?)
    } else {
        Cow::Borrowed(region.get(..raw_len).ok_or(TgaError::UnexpectedEof)?)
    };

    let rows = Rows {
        width,
        height,
        unit,
        top_to_bottom: header.is_top_to_bottom(),
    };
    let mut pixels = vec![0u8; out_len];

    match dispatch {
        PixelDispatch::Direct(format) => {
            let convert = format.converter();
            fill_rows(&raw, &mut pixels, rows, stop, |src| Ok(convert(src)))?;
        }
        PixelDispatch::Indexed { index_size, entry } => {
            let palette = Palette::for_header(&header, data);
            let read_index = PixelDispatch::index_reader(index_size);
            let convert = entry.converter();
            // Runs of one index resolve through the palette once.
            let mut last: Option<(u16, [u8; 4])> = None;
            fill_rows(&raw, &mut pixels, rows, stop, |src| {
                let index = read_index(src);
                if let Some((prev, rgba)) = last {
                    if prev == index {
                        return Ok(rgba);
                    }
                }
                let rgba = palette
                    .entry(index)
                    .map(convert)
                    .ok_or(TgaError::PaletteIndexOutOfRange { index })?;
                last = Some((index, rgba));
                Ok(rgba)
            })?;
        }
    }

    let stored_alpha = PixelFormat::TrueColor32 { keep_alpha: true };
    if attributes.is_none() && dispatch.output_format() == stored_alpha {
        opaque_if_alpha_unused(&mut pixels);
    }

    log::debug!(
        "tga: decoded {width}x{height} {:?} ({:?}, {}-bit, {})",
        header.image_type,
        header.version,
        header.pixel_depth,
        if rows.top_to_bottom { "top-down" } else { "bottom-up" },
    );

    Ok(DecodeOutput::new(pixels, header, extension, warnings))
}

/// A 32-bit image whose alpha is zero everywhere never meant to use it.
fn opaque_if_alpha_unused(pixels: &mut [u8]) {
    if pixels.chunks_exact(4).all(|px| px[3] == 0) {
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
    }
}
