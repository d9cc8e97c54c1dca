use crate::error::TgaError;

/// Resource limits for decoding.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the RGBA output plus any RLE scratch buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header dimensions before any pixel work starts.
    pub(crate) fn check_dimensions(&self, width: u16, height: u16) -> Result<(), TgaError> {
        let (w, h) = (u64::from(width), u64::from(height));
        exceeds("width", w, self.max_width)?;
        exceeds("height", h, self.max_height)?;
        exceeds("pixel count", w * h, self.max_pixels)
    }

    /// Check the total allocation a decode will need.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), TgaError> {
        exceeds("allocation", bytes as u64, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), TgaError> {
    match limit {
        Some(max) if value > max => Err(TgaError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
