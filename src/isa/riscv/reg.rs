use std::{fmt::Display, str::FromStr};

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::config::arch_config::REG_NAME;

/// Register numbers by ABI name, for use in the encoding macros.
#[rustfmt::skip]
#[allow(non_upper_case_globals, unused)]
pub mod reg_index {
    pub const zero  : u32 = 0;
    pub const ra    : u32 = 1;
    pub const sp    : u32 = 2;
    pub const gp    : u32 = 3;
    pub const tp    : u32 = 4;
    pub const t0    : u32 = 5;
    pub const t1    : u32 = 6;
    pub const t2    : u32 = 7;
    pub const s0    : u32 = 8;
    pub const fp    : u32 = 8;
    pub const s1    : u32 = 9;
    pub const a0    : u32 = 10;
    pub const a1    : u32 = 11;
    pub const a2    : u32 = 12;
    pub const a3    : u32 = 13;
    pub const a4    : u32 = 14;
    pub const a5    : u32 = 15;
    pub const a6    : u32 = 16;
    pub const a7    : u32 = 17;
    pub const s2    : u32 = 18;
    pub const s3    : u32 = 19;
    pub const s4    : u32 = 20;
    pub const s5    : u32 = 21;
    pub const s6    : u32 = 22;
    pub const s7    : u32 = 23;
    pub const s8    : u32 = 24;
    pub const s9    : u32 = 25;
    pub const s10   : u32 = 26;
    pub const s11   : u32 = 27;
    pub const t3    : u32 = 28;
    pub const t4    : u32 = 29;
    pub const t5    : u32 = 30;
    pub const t6    : u32 = 31;

    seq_macro::seq!(N in 0..32 {
        pub const x~N: u32 = N;
    });
}

/// Integer register, numbered as in the standard calling convention.
#[repr(u8)]
#[derive(TryFromPrimitive, IntoPrimitive, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reg {
    Zero = 0,
    Ra,
    Sp,
    Gp,
    Tp,
    T0,
    T1,
    T2,
    S0,
    S1,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
    S9,
    S10,
    S11,
    T3,
    T4,
    T5,
    T6,
}

impl Reg {
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Primary ABI name (`s0` rather than `fp`).
    pub fn abi_name(self) -> &'static str {
        let names = REG_NAME[self as usize];
        names.split('/').next().unwrap_or(names)
    }

    /// Accepts ABI names (including aliases such as `fp`) and `x0`..`x31`.
    pub fn from_name(s: &str) -> Option<Reg> {
        let t = s.trim();
        if let Some(index) = REG_NAME.iter().position(|s| s.split('/').any(|r| r == t)) {
            return Reg::try_from(index as u8).ok();
        }

        // Plain decimal only: no sign, no leading zeros.
        let digits = t.strip_prefix('x')?;
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return None;
        }

        Reg::try_from(digits.parse::<u8>().ok()?).ok()
    }
}

impl Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abi_name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid register: {0}")]
pub struct InvalidRegister(pub String);

impl FromStr for Reg {
    type Err = InvalidRegister;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reg::from_name(s).ok_or_else(|| InvalidRegister(s.to_string()))
    }
}

/// Name of a raw 5-bit register field.
pub fn reg_name(idx: u8) -> &'static str {
    match Reg::try_from(idx) {
        Ok(reg) => reg.abi_name(),
        Err(_) => "<invalid>",
    }
}
