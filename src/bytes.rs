//! Byte level helpers: endian aware integer reads and writes, hex rendering.

use byteorder_slice::{BigEndian, ByteOrder, LittleEndian};

use crate::errors::{PcapError, PcapResult};
use crate::Endianness;

/// Maximum number of bytes rendered by [`hex_dump`].
pub const HEX_DUMP_LIMIT: usize = 64;

/// Reads an unsigned integer stored on `slice.len()` bytes (1 to 8).
///
/// # Panics
///
/// Panics if the slice is empty or longer than 8 bytes.
pub fn read_uint(slice: &[u8], endianness: Endianness) -> u64 {
    match endianness {
        Endianness::Native => BigEndian::read_uint(slice, slice.len()),
        Endianness::Swapped => LittleEndian::read_uint(slice, slice.len()),
    }
}

/// Writes `value` on `nbytes` bytes.
///
/// Fails if `nbytes` is not in `1..=8` or if the value doesn't fit.
pub fn write_uint(value: u64, nbytes: usize, endianness: Endianness) -> PcapResult<Vec<u8>> {
    if !(1..=8).contains(&nbytes) {
        return Err(PcapError::consistency("write_uint", format!("can't write an integer on {nbytes} bytes"), &[]));
    }

    if nbytes < 8 && value >> (nbytes * 8) != 0 {
        return Err(PcapError::consistency(
            "write_uint",
            format!("{value} does not fit into {nbytes} bytes"),
            &value.to_be_bytes(),
        ));
    }

    let mut out = vec![0_u8; nbytes];
    match endianness {
        Endianness::Native => BigEndian::write_uint(&mut out, value, nbytes),
        Endianness::Swapped => LittleEndian::write_uint(&mut out, value, nbytes),
    }

    Ok(out)
}

pub(crate) fn read_u16(slice: &[u8], endianness: Endianness) -> u16 {
    read_uint(&slice[..2], endianness) as u16
}

pub(crate) fn read_u32(slice: &[u8], endianness: Endianness) -> u32 {
    read_uint(&slice[..4], endianness) as u32
}

pub(crate) fn read_i32(slice: &[u8], endianness: Endianness) -> i32 {
    read_u32(slice, endianness) as i32
}

pub(crate) fn put_u16(out: &mut Vec<u8>, value: u16, endianness: Endianness) {
    let mut buf = [0_u8; 2];
    match endianness {
        Endianness::Native => BigEndian::write_u16(&mut buf, value),
        Endianness::Swapped => LittleEndian::write_u16(&mut buf, value),
    }
    out.extend_from_slice(&buf);
}

pub(crate) fn put_u32(out: &mut Vec<u8>, value: u32, endianness: Endianness) {
    let mut buf = [0_u8; 4];
    match endianness {
        Endianness::Native => BigEndian::write_u32(&mut buf, value),
        Endianness::Swapped => LittleEndian::write_u32(&mut buf, value),
    }
    out.extend_from_slice(&buf);
}

/// Lowercase hex rendering of `bytes`, cut after [`HEX_DUMP_LIMIT`] bytes with a trailing `..`.
pub fn hex_dump(bytes: &[u8]) -> String {
    if bytes.len() > HEX_DUMP_LIMIT {
        format!("{}..", hex::encode(&bytes[..HEX_DUMP_LIMIT]))
    }
    else {
        hex::encode(bytes)
    }
}
