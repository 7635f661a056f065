//! Fixed-width hex buffers such as `bytes32` content hashes

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::Limits;
use crate::error::{FormatError, FormatReason};

pub const HEX_PREFIX: &str = "0x";

/// Lowercase `0x`-prefixed hex string of exactly `2 + 2 * width` characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexBuffer(String);

impl HexBuffer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Width in bytes
    pub fn width(&self) -> usize {
        self.0.len().saturating_sub(HEX_PREFIX.len()) / 2
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn from_body(mut body: String, width: usize) -> Self {
        let target = width * 2;
        body.extend(std::iter::repeat_n('0', target - body.len()));
        Self(format!("{HEX_PREFIX}{body}"))
    }
}

impl TryFrom<String> for HexBuffer {
    type Error = FormatError;

    /// Accepts only the codec's own output form
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let valid = value.strip_prefix(HEX_PREFIX).is_some_and(|body| {
            body.len() % 2 == 0 && body.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        });
        if !valid {
            return Err(FormatError::new(&value, FormatReason::InvalidHex));
        }
        Ok(Self(value))
    }
}

impl From<HexBuffer> for String {
    fn from(value: HexBuffer) -> Self {
        value.0
    }
}

impl fmt::Display for HexBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexBuffer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Hex codec bounded by [`Limits::max_buffer_width`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexCodec {
    max_width: usize,
}

impl Default for HexCodec {
    fn default() -> Self {
        Self::new(&Limits::default())
    }
}

impl HexCodec {
    pub fn new(limits: &Limits) -> Self {
        Self {
            max_width: limits.max_buffer_width,
        }
    }

    /// Encode `input` into a `width`-byte buffer, right-padded with zero bytes
    ///
    /// A `0x`-prefixed input is taken as a hex literal; anything else is
    /// encoded as UTF-8 text.
    pub fn to_fixed_hex(&self, input: &str, width: usize) -> Result<HexBuffer, FormatError> {
        self.check_width(width)?;

        match input.strip_prefix(HEX_PREFIX) {
            Some(body) => {
                // Length before charset, so an oversized literal is not scanned
                if body.len() > width.saturating_mul(2) {
                    return Err(FormatError::new(input, FormatReason::HexTooLong { width }));
                }
                if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(FormatError::new(input, FormatReason::InvalidHex));
                }
                Ok(HexBuffer::from_body(body.to_ascii_lowercase(), width))
            }
            None => {
                if input.len() > width {
                    return Err(FormatError::new(input, FormatReason::TextTooLong { width }));
                }
                Ok(HexBuffer::from_body(hex::encode(input.as_bytes()), width))
            }
        }
    }

    /// `width` bytes from the thread-local CSPRNG
    pub fn random_buffer(&self, width: usize) -> Result<HexBuffer, FormatError> {
        self.check_width(width)?;
        let mut bytes = vec![0u8; width];
        rand::rng().fill_bytes(&mut bytes);
        Ok(HexBuffer::from_body(hex::encode(bytes), width))
    }

    fn check_width(&self, width: usize) -> Result<(), FormatError> {
        if width > self.max_width {
            return Err(FormatError::new(
                &width.to_string(),
                FormatReason::OptionOutOfRange {
                    option: "widthBytes",
                    max: u32::try_from(self.max_width).unwrap_or(u32::MAX),
                },
            ));
        }
        Ok(())
    }
}

/// [`HexCodec::to_fixed_hex`] with default limits
pub fn to_fixed_hex(input: &str, width: usize) -> Result<HexBuffer, FormatError> {
    HexCodec::default().to_fixed_hex(input, width)
}

/// 32-byte buffer, the common content-hash width
pub fn to_bytes32(input: &str) -> Result<HexBuffer, FormatError> {
    to_fixed_hex(input, 32)
}

/// Random 32-byte buffer
pub fn random_bytes32() -> HexBuffer {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    HexBuffer::from_body(hex::encode(bytes), 32)
}
