//! # zentga
//!
//! Truevision TGA (Targa) image decoder producing RGBA8.
//!
//! ## Supported Files
//!
//! - Color-mapped, true-color and grayscale images
//! - Raw and run-length-encoded (RLE) image data
//! - 8, 15, 16, 24 and 32-bit pixels; 8 and 16-bit palette indices
//! - v1 files, and v2 files with the footer and the 495-byte extension area
//!   (author, timestamps, software version, gamma, alpha attributes, ...)
//!
//! Bottom-up files are reordered while decoding, so the output always has
//! its first row at the top.
//!
//! ## Non-Goals
//!
//! - Encoding
//! - Postage stamps, color correction tables and scan-line tables (their
//!   offsets are reported, their contents are not read)
//! - Display concerns: compositing, transparency grids, metadata formatting
//!
//! ## Usage
//!
//! ```no_run
//! use zentga::{DecodeRequest, ImageInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your TGA bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.image_type);
//!
//! let image = DecodeRequest::new(data).decode(Unstoppable)?;
//! assert_eq!(image.pixels().len(), image.width as usize * image.height as usize * 4);
//! if let Some(ext) = &image.extension {
//!     println!("made by {}", ext.author_name);
//! }
//! # Ok::<(), zentga::TgaError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod info;
mod limits;

pub mod tga;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::{StreamFault, TgaError, TgaWarning};
pub use info::ImageInfo;
pub use limits::Limits;

/// Decode a TGA file to RGBA8 with no resource limits.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, TgaError> {
    DecodeRequest::new(data).decode(stop)
}
