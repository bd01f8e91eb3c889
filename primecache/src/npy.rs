//! NPY array codec for one-dimensional integer arrays.
//!
//! Layout of a version 1.0 file:
//!
//! ```text
//! ┌──────────┬─────────┬────────────┬──────────────────────────┬──────────────┐
//! │ \x93NUMPY │ 0x01 00 │ u16 LE len │ header dict, space padded │ element data │
//! └──────────┴─────────┴────────────┴──────────────────────────┴──────────────┘
//! ```
//!
//! The header dict is an ASCII Python literal such as
//! `{'descr': '<i8', 'fortran_order': False, 'shape': (1033,), }` terminated
//! by `\n`, padded so the element data starts on a 64-byte boundary.
//!
//! [`encode`] always writes little-endian `i64` (`<i8`). [`decode`] also
//! accepts `<i4` and header versions 2.x/3.x, whose header length is a `u32`.

use std::sync::OnceLock;

use bytes::{Buf, BufMut, BytesMut};
use regex::Regex;
use thiserror::Error;

/// Magic string opening every NPY file.
pub const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// File extension used for cache artifacts.
pub const EXTENSION: &str = "npy";

/// The element data starts on a multiple of this many bytes.
const ALIGNMENT: usize = 64;

/// Magic + version + u16 header length.
const PREAMBLE_LEN_V1: usize = MAGIC.len() + 2 + 2;

/// Errors that can occur while decoding an NPY buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NpyError {
    /// Buffer does not start with the NPY magic string.
    #[error("Not an NPY file: bad magic string")]
    BadMagic,

    /// Header version is not one we can read.
    #[error("Unsupported NPY version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// Buffer ends before the declared header.
    #[error("Truncated NPY data: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// Header dict is missing a field or is not text.
    #[error("Malformed NPY header: {0}")]
    MalformedHeader(String),

    /// Element type other than `<i8` or `<i4`.
    #[error("Unsupported dtype '{0}'")]
    UnsupportedDtype(String),

    /// Shape is not `(N,)`.
    #[error("Expected a one-dimensional array, got shape ({0})")]
    NotOneDimensional(String),

    /// Element data does not match the declared shape.
    #[error("Data length mismatch: expected {expected} bytes, found {actual}")]
    DataLength { expected: usize, actual: usize },
}

/// Supported element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dtype {
    I8,
    I4,
}

impl Dtype {
    fn parse(descr: &str) -> Result<Self, NpyError> {
        match descr {
            "<i8" => Ok(Dtype::I8),
            "<i4" => Ok(Dtype::I4),
            other => Err(NpyError::UnsupportedDtype(other.to_string())),
        }
    }

    fn item_size(self) -> usize {
        match self {
            Dtype::I8 => 8,
            Dtype::I4 => 4,
        }
    }
}

/// Parsed header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    dtype: Dtype,
    len: usize,
}

fn descr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"'descr'\s*:\s*'([^']*)'").unwrap())
}

fn fortran_order_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"'fortran_order'\s*:\s*(True|False)").unwrap())
}

fn shape_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"'shape'\s*:\s*\(([^)]*)\)").unwrap())
}

fn parse_header(text: &str) -> Result<Header, NpyError> {
    let descr = descr_pattern()
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or_else(|| NpyError::MalformedHeader("missing 'descr'".to_string()))?;

    // Irrelevant for a single dimension, but the key must be present.
    if !fortran_order_pattern().is_match(text) {
        return Err(NpyError::MalformedHeader(
            "missing 'fortran_order'".to_string(),
        ));
    }

    let shape = shape_pattern()
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or_else(|| NpyError::MalformedHeader("missing 'shape'".to_string()))?
        .as_str();

    let dims: Vec<&str> = shape
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();
    if dims.len() != 1 {
        return Err(NpyError::NotOneDimensional(shape.trim().to_string()));
    }
    let len = dims[0]
        .parse::<usize>()
        .map_err(|_| NpyError::MalformedHeader(format!("invalid dimension '{}'", dims[0])))?;

    Ok(Header {
        dtype: Dtype::parse(descr.as_str())?,
        len,
    })
}

fn ensure_remaining(buf: &[u8], needed: usize) -> Result<(), NpyError> {
    if buf.remaining() < needed {
        return Err(NpyError::Truncated {
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}

/// Encode a slice of integers as a version 1.0 NPY buffer with dtype `<i8`.
pub fn encode(values: &[i64]) -> Vec<u8> {
    let dict = format!(
        "{{'descr': '<i8', 'fortran_order': False, 'shape': ({},), }}",
        values.len()
    );

    // +1 for the terminating newline
    let unpadded = PREAMBLE_LEN_V1 + dict.len() + 1;
    let padding = (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT;
    let header_len = dict.len() + padding + 1;

    let mut buf = BytesMut::with_capacity(PREAMBLE_LEN_V1 + header_len + values.len() * 8);
    buf.put_slice(MAGIC);
    buf.put_u8(1);
    buf.put_u8(0);
    buf.put_u16_le(header_len as u16);
    buf.put_slice(dict.as_bytes());
    buf.put_bytes(b' ', padding);
    buf.put_u8(b'\n');
    for value in values {
        buf.put_i64_le(*value);
    }

    buf.to_vec()
}

/// Decode an NPY buffer holding a one-dimensional integer array.
pub fn decode(data: &[u8]) -> Result<Vec<i64>, NpyError> {
    let mut buf = data;

    ensure_remaining(buf, MAGIC.len() + 2)?;
    if &buf[..MAGIC.len()] != MAGIC {
        return Err(NpyError::BadMagic);
    }
    buf.advance(MAGIC.len());

    let major = buf.get_u8();
    let minor = buf.get_u8();
    let header_len = match major {
        1 => {
            ensure_remaining(buf, 2)?;
            buf.get_u16_le() as usize
        }
        2 | 3 => {
            ensure_remaining(buf, 4)?;
            buf.get_u32_le() as usize
        }
        _ => return Err(NpyError::UnsupportedVersion { major, minor }),
    };

    ensure_remaining(buf, header_len)?;
    let text = std::str::from_utf8(&buf[..header_len])
        .map_err(|_| NpyError::MalformedHeader("header is not valid text".to_string()))?;
    let header = parse_header(text)?;
    buf.advance(header_len);

    let expected = header
        .len
        .checked_mul(header.dtype.item_size())
        .ok_or_else(|| NpyError::MalformedHeader(format!("shape ({},) too large", header.len)))?;
    if buf.remaining() != expected {
        return Err(NpyError::DataLength {
            expected,
            actual: buf.remaining(),
        });
    }

    let values = match header.dtype {
        Dtype::I8 => (0..header.len).map(|_| buf.get_i64_le()).collect(),
        Dtype::I4 => (0..header.len).map(|_| buf.get_i32_le() as i64).collect(),
    };

    Ok(values)
}

/// Number of elements in an NPY buffer. The whole buffer is validated.
pub fn element_count(data: &[u8]) -> Result<usize, NpyError> {
    decode(data).map(|values| values.len())
}
