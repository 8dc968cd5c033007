//! Detachable integrity codes: CRC by modulo-2 long division, and even parity
//!
//! Both schemes append a code to the payload so that the combined sequence
//! validates to a zero residue. The decoder never needs to separate the code
//! before checking it; it runs [`IntegrityCheck::validate`] over the whole
//! destuffed frame body.

use crate::constants::{
    BITS_PER_BYTE, CRC16_CCITT_GENERATOR, CRC32_GENERATOR, MAX_GENERATOR_DEGREE,
    PARITY_CODE_SIZE,
};
use crate::error::FrameError;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// An integrity code that can be appended to a payload and checked later
pub trait IntegrityCheck {
    /// Number of code bytes appended to every payload
    fn code_len(&self) -> usize;

    /// Compute the code for `payload`
    fn encode(&self, payload: &[u8]) -> Vec<u8>;

    /// Compute the residue of `payload ‖ code`; zero means intact
    ///
    /// `body` must hold at least [`IntegrityCheck::code_len`] bytes. A shorter
    /// body has no code to check and its residue says nothing; an empty body
    /// divides to zero under every scheme.
    fn validate(&self, body: &[u8]) -> u64;

    /// True if `body` is long enough to carry a code and validates to zero
    fn is_valid(&self, body: &[u8]) -> bool {
        body.len() >= self.code_len() && self.validate(body) == 0
    }
}

/// Cyclic redundancy check over an arbitrary generator polynomial
///
/// Bits are processed most-significant first with a zero initial register and
/// no reflection or final XOR. The remainder is `degree` bits wide and is
/// stored in `ceil(degree / 8)` bytes, left-aligned so any unused low bits of
/// the last byte are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc {
    generator: u64,
    degree: u32,
}

impl Crc {
    /// Create a CRC for `generator`; its highest set bit fixes the degree
    pub fn new(generator: u64) -> Result<Self, FrameError> {
        let degree = match generator.checked_ilog2() {
            Some(d) if (1..=MAX_GENERATOR_DEGREE).contains(&d) => d,
            _ => return Err(FrameError::InvalidGenerator(generator)),
        };
        Ok(Self { generator, degree })
    }

    /// CRC-16/CCITT (2-byte code)
    pub fn crc16() -> Self {
        Self {
            generator: CRC16_CCITT_GENERATOR,
            degree: 16,
        }
    }

    /// CRC-32 (4-byte code)
    pub fn crc32() -> Self {
        Self {
            generator: CRC32_GENERATOR,
            degree: 32,
        }
    }

    /// The generator polynomial as a bitmask
    pub fn generator(&self) -> u64 {
        self.generator
    }

    /// Index of the generator's highest set bit
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Low bits of the last code byte that carry no remainder
    fn unused_bits(&self) -> u32 {
        self.code_len() as u32 * BITS_PER_BYTE - self.degree
    }

    /// Bits of the final byte group that take part in the division
    fn final_bits(&self) -> u32 {
        BITS_PER_BYTE - self.unused_bits()
    }

    /// Long division of `dividend` followed by `padding` zero bytes
    ///
    /// Only [`Crc::final_bits`] of the very last byte are shifted in, so the
    /// division sees exactly `degree` code bits after the message.
    fn remainder(&self, dividend: &[u8], padding: usize) -> u64 {
        let total = dividend.len() + padding;
        let mut register = Register::new(self.generator, self.degree);

        let bytes = dividend.iter().copied().chain(core::iter::repeat(0).take(padding));
        for (i, byte) in bytes.enumerate() {
            let bits = if i + 1 == total {
                self.final_bits()
            } else {
                BITS_PER_BYTE
            };
            register.shift_in(byte, bits);
        }

        register.value
    }

    /// Compute the remainder as an integer, without serializing it
    pub fn checksum(&self, payload: &[u8]) -> u64 {
        self.remainder(payload, self.code_len())
    }
}

impl IntegrityCheck for Crc {
    fn code_len(&self) -> usize {
        self.degree.div_ceil(BITS_PER_BYTE) as usize
    }

    fn encode(&self, payload: &[u8]) -> Vec<u8> {
        let len = self.code_len();
        let aligned = self.checksum(payload) << self.unused_bits();

        (0..len)
            .map(|i| (aligned >> ((len - 1 - i) as u32 * BITS_PER_BYTE)) as u8)
            .collect()
    }

    fn validate(&self, body: &[u8]) -> u64 {
        self.remainder(body, 0)
    }
}

impl Default for Crc {
    fn default() -> Self {
        Self::crc16()
    }
}

/// Running dividend of the long division
struct Register {
    value: u64,
    generator: u64,
    top_bit: u64,
}

impl Register {
    fn new(generator: u64, degree: u32) -> Self {
        Self {
            value: 0,
            generator,
            top_bit: 1 << degree,
        }
    }

    /// Bring down the `bits` most significant bits of `byte`, one at a time
    #[inline]
    fn shift_in(&mut self, byte: u8, bits: u32) {
        for k in (BITS_PER_BYTE - bits..BITS_PER_BYTE).rev() {
            self.value = (self.value << 1) | u64::from((byte >> k) & 1);
            // Register never exceeds degree + 1 bits, so testing the top bit
            // is the same as comparing bit lengths with the generator.
            if self.value & self.top_bit != 0 {
                self.value ^= self.generator;
            }
        }
    }
}

/// Even parity over all bits of the payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parity;

impl IntegrityCheck for Parity {
    fn code_len(&self) -> usize {
        PARITY_CODE_SIZE
    }

    fn encode(&self, payload: &[u8]) -> Vec<u8> {
        vec![frames_parity(payload)]
    }

    fn validate(&self, body: &[u8]) -> u64 {
        u64::from(frames_parity(body))
    }
}

/// Parity of a single byte: 1 if it has an odd number of set bits
#[inline]
pub fn bit_parity(byte: u8) -> u8 {
    (byte.count_ones() & 1) as u8
}

/// Parity of a byte sequence, equal to the parity of its concatenated bits
pub fn frames_parity(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, &b| acc ^ bit_parity(b))
}

/// Integrity scheme chosen at run time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityScheme {
    /// Cyclic redundancy check
    Crc(Crc),
    /// Single cumulative parity bit
    Parity(Parity),
}

impl IntegrityScheme {
    /// CRC scheme for `generator`
    pub fn crc(generator: u64) -> Result<Self, FrameError> {
        Crc::new(generator).map(IntegrityScheme::Crc)
    }

    /// Parity scheme
    pub fn parity() -> Self {
        IntegrityScheme::Parity(Parity)
    }

    /// Short human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            IntegrityScheme::Crc(_) => "crc",
            IntegrityScheme::Parity(_) => "parity",
        }
    }
}

impl Default for IntegrityScheme {
    fn default() -> Self {
        IntegrityScheme::Crc(Crc::default())
    }
}

impl IntegrityCheck for IntegrityScheme {
    fn code_len(&self) -> usize {
        match self {
            IntegrityScheme::Crc(crc) => crc.code_len(),
            IntegrityScheme::Parity(parity) => parity.code_len(),
        }
    }

    fn encode(&self, payload: &[u8]) -> Vec<u8> {
        match self {
            IntegrityScheme::Crc(crc) => crc.encode(payload),
            IntegrityScheme::Parity(parity) => parity.encode(payload),
        }
    }

    fn validate(&self, body: &[u8]) -> u64 {
        match self {
            IntegrityScheme::Crc(crc) => crc.validate(body),
            IntegrityScheme::Parity(parity) => parity.validate(body),
        }
    }
}

/// Serialized form of an [`IntegrityScheme`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeConfig {
    /// CRC over the given generator
    Crc {
        /// Generator polynomial bitmask
        generator: u64,
    },
    /// Even parity
    Parity,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        SchemeConfig::Crc {
            generator: CRC16_CCITT_GENERATOR,
        }
    }
}

impl TryFrom<SchemeConfig> for IntegrityScheme {
    type Error = FrameError;

    fn try_from(config: SchemeConfig) -> Result<Self, Self::Error> {
        match config {
            SchemeConfig::Crc { generator } => IntegrityScheme::crc(generator),
            SchemeConfig::Parity => Ok(IntegrityScheme::parity()),
        }
    }
}

impl From<IntegrityScheme> for SchemeConfig {
    fn from(scheme: IntegrityScheme) -> Self {
        match scheme {
            IntegrityScheme::Crc(crc) => SchemeConfig::Crc {
                generator: crc.generator(),
            },
            IntegrityScheme::Parity(_) => SchemeConfig::Parity,
        }
    }
}
