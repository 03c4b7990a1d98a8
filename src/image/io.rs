//! PGM (`P2` / `P5`) reading and writing for grayscale rasters.
//!
//! - `decode` / `decode_bytes`: parse a tag, an optional single `#` comment
//!   line, `width height max_level`, then ASCII or raw-byte samples.
//! - `encode` / `encode_to_writer`: write a grid back in either family. ASCII
//!   output puts a newline after flat token 0, 17, 34, ... and a space after
//!   every other token.
//! - `with_suffix`: derive `name.G.pgm` style destinations without touching
//!   the caller's path.
use super::{ImageView, Raster, RasterFormat};
use crate::error::{Error, Result};
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// ASCII samples per output line after the first (single-token) line.
pub const ASCII_TOKENS_PER_LINE: usize = 17;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("unrecognized format tag {0:?}, expected P2 or P5")]
    UnknownTag(String),

    #[error("malformed header: {0}")]
    Header(String),

    #[error("sample {index} is not an integer: {token:?}")]
    InvalidSample { index: usize, token: String },

    #[error("sample {index} has value {value}, above max level {max_level}")]
    SampleOutOfRange {
        index: usize,
        value: i64,
        max_level: u16,
    },

    #[error("expected {expected} samples, found {actual}")]
    ShortData { expected: usize, actual: usize },
}

/// Read and decode a PGM file.
pub fn decode(path: &Path) -> Result<Raster> {
    let bytes = fs::read(path).map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        source: DecodeError::Io(e),
    })?;
    let raster = decode_bytes(&bytes).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "decoded {} ({} bytes) as {} {}x{}",
        path.display(),
        bytes.len(),
        raster.format.tag(),
        raster.w,
        raster.h
    );
    Ok(raster)
}

/// Decode a PGM image held in memory.
pub fn decode_bytes(bytes: &[u8]) -> std::result::Result<Raster, DecodeError> {
    let mut cur = Cursor { bytes, pos: 0 };

    let tag = cur.take(2);
    let format = RasterFormat::from_tag(tag)
        .ok_or_else(|| DecodeError::UnknownTag(String::from_utf8_lossy(tag).into_owned()))?;

    cur.skip_whitespace();
    if cur.peek() == Some(b'#') {
        cur.skip_line();
    }

    let width = cur.header_field("width")?;
    let height = cur.header_field("height")?;
    let max_level = cur.header_field("max level")?;

    let w = usize::try_from(width)
        .ok()
        .filter(|_| width <= u64::from(u32::MAX))
        .ok_or_else(|| DecodeError::Header(format!("width {width} out of range")))?;
    let h = usize::try_from(height)
        .ok()
        .filter(|_| height <= u64::from(u32::MAX))
        .ok_or_else(|| DecodeError::Header(format!("height {height} out of range")))?;
    let max_level = u16::try_from(max_level)
        .ok()
        .filter(|&m| m > 0)
        .ok_or_else(|| DecodeError::Header(format!("max level {max_level} out of range")))?;
    let count = w
        .checked_mul(h)
        .ok_or_else(|| DecodeError::Header(format!("{w}x{h} overflows")))?;

    let data = match format {
        RasterFormat::Ascii => cur.ascii_samples(count, max_level)?,
        RasterFormat::Binary => cur.binary_samples(count, max_level)?,
    };

    Ok(Raster::from_samples(format, w, h, max_level, data))
}

/// Write `grid` as a PGM file in the given format family.
///
/// The header carries `max_level` verbatim. Binary samples are clamped to
/// one byte each.
pub fn encode<G>(path: &Path, grid: &G, format: RasterFormat, max_level: u16) -> Result<()>
where
    G: ImageView<Pixel = i32>,
{
    let to_encode_error = |source| Error::Encode {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_encode_error)?;
    let mut writer = BufWriter::new(file);
    encode_to_writer(&mut writer, grid, format, max_level).map_err(to_encode_error)?;
    writer.flush().map_err(to_encode_error)?;
    debug!("wrote {} {}x{} to {}", format.tag(), grid.width(), grid.height(), path.display());
    Ok(())
}

/// Encode `grid` into any writer.
pub fn encode_to_writer<W, G>(
    writer: &mut W,
    grid: &G,
    format: RasterFormat,
    max_level: u16,
) -> io::Result<()>
where
    W: Write,
    G: ImageView<Pixel = i32>,
{
    write!(
        writer,
        "{}\n{} {}\n{}\n",
        format.tag(),
        grid.width(),
        grid.height(),
        max_level
    )?;

    match format {
        RasterFormat::Ascii => {
            let mut k = 0usize;
            for row in grid.rows() {
                for &v in row {
                    let sep = if k % ASCII_TOKENS_PER_LINE == 0 { '\n' } else { ' ' };
                    write!(writer, "{v}{sep}")?;
                    k += 1;
                }
            }
        }
        RasterFormat::Binary => {
            let mut line = Vec::with_capacity(grid.width());
            for row in grid.rows() {
                line.clear();
                line.extend(row.iter().map(|&v| v.clamp(0, 255) as u8));
                writer.write_all(&line)?;
            }
        }
    }
    Ok(())
}

/// Destination for one output: when the file name has an extension, cut it
/// at its first `.` and append `suffix` (e.g. `".G.pgm"`); otherwise return
/// the path unchanged.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return path.to_path_buf();
    };
    match name.char_indices().skip(1).find(|&(_, c)| c == '.') {
        Some((dot, _)) => path.with_file_name(format!("{}{suffix}", &name[..dot])),
        None => path.to_path_buf(),
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn take(&mut self, n: usize) -> &'a [u8] {
        let end = (self.pos + n).min(self.bytes.len());
        let out = &self.bytes[self.pos..end];
        self.pos = end;
        out
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn skip_line(&mut self) {
        while let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'\n' {
                break;
            }
        }
    }

    /// Next whitespace-delimited token, or `None` at end of input.
    fn token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|b| !b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.bytes[start..self.pos])
    }

    fn header_field(&mut self, name: &str) -> std::result::Result<u64, DecodeError> {
        let token = self
            .token()
            .ok_or_else(|| DecodeError::Header(format!("missing {name}")))?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| {
                DecodeError::Header(format!(
                    "{name} is not an unsigned integer: {:?}",
                    String::from_utf8_lossy(token)
                ))
            })
    }

    fn ascii_samples(
        &mut self,
        count: usize,
        max_level: u16,
    ) -> std::result::Result<Vec<i32>, DecodeError> {
        // A sample and its separator take at least two bytes.
        let remaining = self.bytes.len().saturating_sub(self.pos);
        let mut data = Vec::with_capacity(count.min(remaining / 2 + 1));
        for index in 0..count {
            let token = self.token().ok_or(DecodeError::ShortData {
                expected: count,
                actual: index,
            })?;
            let value = std::str::from_utf8(token)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| DecodeError::InvalidSample {
                    index,
                    token: String::from_utf8_lossy(token).into_owned(),
                })?;
            if !(0..=i64::from(max_level)).contains(&value) {
                return Err(DecodeError::SampleOutOfRange {
                    index,
                    value,
                    max_level,
                });
            }
            data.push(value as i32);
        }
        Ok(data)
    }

    fn binary_samples(
        &mut self,
        count: usize,
        max_level: u16,
    ) -> std::result::Result<Vec<i32>, DecodeError> {
        // Exactly one whitespace byte separates the header from the samples.
        match self.peek() {
            Some(b) if b.is_ascii_whitespace() => self.pos += 1,
            Some(_) => {
                return Err(DecodeError::Header(
                    "missing whitespace after max level".to_string(),
                ))
            }
            None if count > 0 => {
                return Err(DecodeError::ShortData {
                    expected: count,
                    actual: 0,
                })
            }
            None => {}
        }

        let raw = self.take(count);
        if raw.len() < count {
            return Err(DecodeError::ShortData {
                expected: count,
                actual: raw.len(),
            });
        }
        let mut data = Vec::with_capacity(count);
        for (index, &b) in raw.iter().enumerate() {
            if u16::from(b) > max_level {
                return Err(DecodeError::SampleOutOfRange {
                    index,
                    value: i64::from(b),
                    max_level,
                });
            }
            data.push(i32::from(b));
        }
        Ok(data)
    }
}
