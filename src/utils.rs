use std::num::ParseIntError;

use crate::config::arch_config::{WordType, XLEN};

/// Mask of the `len` lowest bits of a [`WordType`].
pub const fn ones(len: u32) -> WordType {
    if len as usize >= XLEN {
        WordType::MAX
    } else {
        ((1 as WordType) << len) - 1
    }
}

/// Extract `len` bits starting at `low` from a 32-bit instruction word.
#[inline]
pub const fn extract_bits(value: u32, low: u32, len: u32) -> u32 {
    (value >> low) & ((1u32 << len) - 1)
}

#[inline]
pub const fn get_field(value: WordType, low: u32, len: u32) -> WordType {
    (value >> low) & ones(len)
}

/// Replace the field at `low..low + len` by `field`. Bits of `field` above `len` are dropped.
#[inline]
pub const fn set_field(value: WordType, low: u32, len: u32, field: WordType) -> WordType {
    let mask = ones(len) << low;
    (value & !mask) | ((field << low) & mask)
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNumberError {
    #[error("unexpected sign in `{0}`")]
    Sign(String),
    #[error(transparent)]
    Int(#[from] ParseIntError),
}

/// Parse an unsigned literal: decimal by default, `0x` hex or `0b` binary when prefixed.
/// Underscores are accepted as digit separators; signs are not.
pub fn parse_u64(s: &str) -> Result<u64, ParseNumberError> {
    let t = s.trim().replace('_', "");
    let (digits, radix) = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(bin) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        (bin, 2)
    } else {
        (t.as_str(), 10)
    };

    // `from_str_radix` takes a leading `+`.
    if digits.starts_with(['+', '-']) {
        return Err(ParseNumberError::Sign(s.trim().to_string()));
    }

    Ok(u64::from_str_radix(digits, radix)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extract_bits() {
        assert_eq!(extract_bits(0x30029073, 0, 7), 0x73);
        assert_eq!(extract_bits(0x30029073, 12, 3), 0b001);
        assert_eq!(extract_bits(0x30029073, 15, 5), 5);
        assert_eq!(extract_bits(0x30029073, 20, 12), 0x300);
    }

    #[test]
    fn test_fields() {
        assert_eq!(ones(0), 0);
        assert_eq!(ones(5), 0b11111);
        assert_eq!(ones(XLEN as u32), WordType::MAX);

        let v = set_field(0, 11, 2, 0b11);
        assert_eq!(v, 0x1800);
        assert_eq!(get_field(v, 11, 2), 0b11);
        assert_eq!(set_field(v, 11, 2, 0b01), 0x800);
        // Overflowing field bits are dropped.
        assert_eq!(set_field(0, 0, 2, 0b111), 0b11);
    }

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Ok(42));
        assert_eq!(parse_u64("0x300"), Ok(0x300));
        assert_eq!(parse_u64(" 0X3_0029_073 "), Ok(0x30029073));
        assert_eq!(parse_u64("0b101"), Ok(5));
        assert!(parse_u64("mstatus").is_err());
        assert_eq!(parse_u64("+768"), Err(ParseNumberError::Sign("+768".into())));
        assert_eq!(parse_u64("0x+300"), Err(ParseNumberError::Sign("0x+300".into())));
        assert!(parse_u64("-1").is_err());
        assert!(parse_u64("").is_err());
    }
}
