// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC GlobalId compression and expansion
//!
//! IFC stores a 128-bit GUID as 22 characters of a custom base-64 alphabet:
//! the first 2 characters carry the leading byte, each following group of 4
//! characters carries 3 bytes. The expanded form is 32 lowercase hex digits.

use crate::{ModelError, Result};

/// IFC base-64 alphabet
const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Length of a compressed GlobalId
pub const COMPRESSED_LEN: usize = 22;

/// Length of an expanded GlobalId (hex digits, no separators)
pub const EXPANDED_LEN: usize = 32;

fn decode_char(guid: &str, c: u8) -> Result<u32> {
    ALPHABET
        .iter()
        .position(|&a| a == c)
        .map(|p| p as u32)
        .ok_or_else(|| ModelError::invalid_guid(guid, format!("invalid character '{}'", c as char)))
}

fn decode_chunk(guid: &str, chunk: &[u8]) -> Result<u32> {
    chunk
        .iter()
        .try_fold(0u32, |acc, &c| Ok(acc * 64 + decode_char(guid, c)?))
}

fn encode_chunk(out: &mut String, value: u32, len: usize) {
    for i in (0..len).rev() {
        let digit = (value >> (6 * i)) & 0x3f;
        out.push(ALPHABET[digit as usize] as char);
    }
}

/// Expand a compressed 22-character GlobalId into 32 hex digits
pub fn expand(guid: &str) -> Result<String> {
    let bytes = guid.as_bytes();
    if bytes.len() != COMPRESSED_LEN {
        return Err(ModelError::invalid_guid(
            guid,
            format!("expected {} characters, got {}", COMPRESSED_LEN, guid.chars().count()),
        ));
    }

    let head = decode_chunk(guid, &bytes[0..2])?;
    if head > 0xff {
        return Err(ModelError::invalid_guid(guid, "leading character out of range"));
    }

    let mut out = String::with_capacity(EXPANDED_LEN);
    out.push_str(&format!("{:02x}", head));
    for chunk in bytes[2..].chunks(4) {
        out.push_str(&format!("{:06x}", decode_chunk(guid, chunk)?));
    }
    Ok(out)
}

/// Compress a 32-digit hex GUID (dashes allowed) into the 22-character form
pub fn compress(uuid: &str) -> Result<String> {
    let hex: String = uuid.chars().filter(|c| *c != '-').collect();
    if hex.len() != EXPANDED_LEN || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ModelError::invalid_guid(uuid, "expected 32 hex digits"));
    }

    let mut raw = [0u8; 16];
    for (i, byte) in raw.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|e| ModelError::invalid_guid(uuid, e.to_string()))?;
    }

    let mut out = String::with_capacity(COMPRESSED_LEN);
    encode_chunk(&mut out, raw[0] as u32, 2);
    for triple in raw[1..].chunks(3) {
        let value = (triple[0] as u32) << 16 | (triple[1] as u32) << 8 | triple[2] as u32;
        encode_chunk(&mut out, value, 4);
    }
    Ok(out)
}
