//! Constants and limits for the linkframe wire format

/// Default start-of-frame tag (`{`)
pub const START_TAG: u8 = b'{';

/// Default end-of-frame tag (`}`)
pub const STOP_TAG: u8 = b'}';

/// Default escape tag (`\`)
pub const ESCAPE_TAG: u8 = b'\\';

/// Largest payload chunk carried by a single frame
pub const MAX_CHUNK_SIZE: usize = 8;

/// Size of the parity code in bytes
pub const PARITY_CODE_SIZE: usize = 1;

/// CRC-16/CCITT generator, x^16 + x^12 + x^5 + 1 (degree 16, 2-byte code)
///
/// With zero initial register and no reflection this is CRC-16/XMODEM.
pub const CRC16_CCITT_GENERATOR: u64 = 0x1_1021;

/// CRC-32 generator from IEEE 802.3 (degree 32, 4-byte code)
///
/// Used unreflected, with zero initial register and no final XOR.
pub const CRC32_GENERATOR: u64 = 0x1_04C1_1DB7;

/// Largest generator degree the 64-bit division register can hold
pub const MAX_GENERATOR_DEGREE: u32 = 63;

/// Number of bits in a byte
pub const BITS_PER_BYTE: u32 = 8;
