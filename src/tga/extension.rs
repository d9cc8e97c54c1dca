//! TGA 2.0 extension area: a fixed 495-byte metadata record.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::TgaWarning;

use super::utils::{fixed_str, u16_le, u32_le};

/// Size of the extension record; also the value of its first field.
pub const EXTENSION_SIZE: usize = 495;

const COMMENT_LINE: usize = 81;

/// How the alpha channel of 32-bit data should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributesType {
    NoAlphaData,
    UndefinedIgnored,
    UndefinedRetained,
    UsefulAlphaChannel,
    PremultipliedAlpha,
}

impl AttributesType {
    /// Values outside 0..=4 have no meaning and yield `None`.
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::NoAlphaData,
            1 => Self::UndefinedIgnored,
            2 => Self::UndefinedRetained,
            3 => Self::UsefulAlphaChannel,
            4 => Self::PremultipliedAlpha,
            _ => return None,
        })
    }

    /// Whether stored alpha values should reach the output.
    pub fn keeps_alpha(self) -> bool {
        matches!(self, Self::UsefulAlphaChannel | Self::PremultipliedAlpha)
    }
}

/// Creation date and time, as stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    pub month: u16,
    pub day: u16,
    pub year: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Time spent on the job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JobTime {
    pub hours: u16,
    pub minutes: u16,
    pub seconds: u16,
}

impl fmt::Display for JobTime {
    /// Renders like `2 hours 1 minute`; zero components are left out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            (self.hours, "hour"),
            (self.minutes, "minute"),
            (self.seconds, "second"),
        ];
        let mut first = true;
        for (value, unit) in parts {
            if value == 0 {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            let plural = if value > 1 { "s" } else { "" };
            write!(f, "{value} {unit}{plural}")?;
        }
        Ok(())
    }
}

/// Software version: a number scaled by 100 plus a release letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoftwareVersion {
    /// Version × 100, so 213 means 2.13.
    pub number: u16,
    /// Release letter; a space or NUL when unused.
    pub letter: u8,
}

impl fmt::Display for SoftwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.number / 100, self.number % 100)?;
        if self.letter.is_ascii_graphic() {
            write!(f, "{}", char::from(self.letter))?;
        }
        Ok(())
    }
}

/// A numerator/denominator pair (pixel aspect ratio, gamma).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ratio {
    pub numerator: u16,
    pub denominator: u16,
}

impl Ratio {
    /// `None` when the denominator is 0, which marks the field unset.
    fn new(numerator: u16, denominator: u16) -> Option<Self> {
        (denominator != 0).then_some(Self {
            numerator,
            denominator,
        })
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Key (background) color, stored B, G, R, A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// Parsed extension area. Unset fields are `None` or empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionMetadata {
    pub author_name: String,
    /// Up to four comment lines joined with `\n`.
    pub author_comments: String,
    pub timestamp: Option<Timestamp>,
    pub job_name: String,
    pub job_time: JobTime,
    pub software_id: String,
    pub software_version: Option<SoftwareVersion>,
    pub key_color: KeyColor,
    pub aspect_ratio: Option<Ratio>,
    pub gamma: Option<Ratio>,
    pub color_correction_offset: u32,
    pub postage_stamp_offset: u32,
    pub scan_line_offset: u32,
    pub attributes_type: Option<AttributesType>,
}

/// Parse the extension record at `offset`.
///
/// Errors are warnings: the caller keeps decoding pixels without metadata.
pub fn parse_extension(data: &[u8], offset: u32) -> Result<ExtensionMetadata, TgaWarning> {
    let start = offset as usize;
    let rec = start
        .checked_add(EXTENSION_SIZE)
        .and_then(|end| data.get(start..end))
        .ok_or(TgaWarning::ExtensionOutOfBounds { offset })?;

    // Every read below is inside the 495-byte record.
    let word = |at: usize| u16_le(rec, at).unwrap_or(0);
    let dword = |at: usize| u32_le(rec, at).unwrap_or(0);

    let declared_size = word(0);
    if usize::from(declared_size) != EXTENSION_SIZE {
        return Err(TgaWarning::MalformedExtension { declared_size });
    }

    let comment_lines: Vec<String> = rec[43..367]
        .chunks_exact(COMMENT_LINE)
        .map(fixed_str)
        .filter(|line| !line.is_empty())
        .collect();

    let year = word(371);
    let timestamp = (year != 0).then(|| Timestamp {
        month: word(367),
        day: word(369),
        year,
        hour: word(373),
        minute: word(375),
        second: word(377),
    });

    let number = word(467);
    let letter = rec[469];
    let software_version =
        (!(number == 0 && letter == b' ')).then_some(SoftwareVersion { number, letter });

    Ok(ExtensionMetadata {
        author_name: fixed_str(&rec[2..43]),
        author_comments: comment_lines.join("\n"),
        timestamp,
        job_name: fixed_str(&rec[379..420]),
        job_time: JobTime {
            hours: word(420),
            minutes: word(422),
            seconds: word(424),
        },
        software_id: fixed_str(&rec[426..467]),
        software_version,
        key_color: KeyColor {
            blue: rec[470],
            green: rec[471],
            red: rec[472],
            alpha: rec[473],
        },
        aspect_ratio: Ratio::new(word(474), word(476)),
        gamma: Ratio::new(word(478), word(480)),
        color_correction_offset: dword(482),
        postage_stamp_offset: dword(486),
        scan_line_offset: dword(490),
        attributes_type: AttributesType::from_u8(rec[494]),
    })
}
