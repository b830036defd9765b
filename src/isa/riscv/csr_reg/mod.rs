pub mod fields;

use std::{fmt::Display, str::FromStr};

use phf::phf_map;

use crate::{config::asm_config::CSR_CNT, utils::parse_u64};

/// Generates the `csr_index` constants and the name <-> address maps from one table.
macro_rules! gen_csr_table {
    ($(($name:ident, $name_str:literal, $addr:literal)),* $(,)?) => {
        /// CSR addresses by name, for use in the encoding macros.
        #[rustfmt::skip]
        #[allow(non_upper_case_globals, unused)]
        pub mod csr_index {
            $(
                pub const $name: u32 = $addr;
            )*
        }

        pub static CSR_ADDRESS: phf::Map<&'static str, u32> = phf_map! {
            $(
                $name_str => $addr
            ),*
        };

        pub static CSR_NAME: phf::Map<u32, &'static str> = phf_map! {
            $(
                $addr => $name_str
            ),*
        };
    };
}

gen_csr_table! {
    // ==================================
    //            U-Mode CSR
    // ==================================
    (fflags,     "fflags",     0x001u32),
    (frm,        "frm",        0x002u32),
    (fcsr,       "fcsr",       0x003u32),
    (cycle,      "cycle",      0xC00u32),
    (time,       "time",       0xC01u32),
    (instret,    "instret",    0xC02u32),

    // ==================================
    //            S-Mode CSR
    // ==================================
    (sstatus,    "sstatus",    0x100u32),
    (sie,        "sie",        0x104u32),
    (stvec,      "stvec",      0x105u32),
    (scounteren, "scounteren", 0x106u32),
    (sscratch,   "sscratch",   0x140u32),
    (sepc,       "sepc",       0x141u32),
    (scause,     "scause",     0x142u32),
    (stval,      "stval",      0x143u32),
    (sip,        "sip",        0x144u32),
    (satp,       "satp",       0x180u32),

    // ==================================
    //            M-Mode CSR
    // ==================================
    (mstatus,    "mstatus",    0x300u32),
    (misa,       "misa",       0x301u32),
    (medeleg,    "medeleg",    0x302u32),
    (mideleg,    "mideleg",    0x303u32),
    (mie,        "mie",        0x304u32),
    (mtvec,      "mtvec",      0x305u32),
    (mcounteren, "mcounteren", 0x306u32),
    (mscratch,   "mscratch",   0x340u32),
    (mepc,       "mepc",       0x341u32),
    (mcause,     "mcause",     0x342u32),
    (mtval,      "mtval",      0x343u32),
    (mip,        "mip",        0x344u32),
    (pmpcfg0,    "pmpcfg0",    0x3A0u32),
    (pmpcfg2,    "pmpcfg2",    0x3A2u32),
    (pmpaddr0,   "pmpaddr0",   0x3B0u32),
    (pmpaddr1,   "pmpaddr1",   0x3B1u32),
    (pmpaddr2,   "pmpaddr2",   0x3B2u32),
    (pmpaddr3,   "pmpaddr3",   0x3B3u32),
    (pmpaddr4,   "pmpaddr4",   0x3B4u32),
    (pmpaddr5,   "pmpaddr5",   0x3B5u32),
    (pmpaddr6,   "pmpaddr6",   0x3B6u32),
    (pmpaddr7,   "pmpaddr7",   0x3B7u32),
    (pmpaddr8,   "pmpaddr8",   0x3B8u32),
    (pmpaddr9,   "pmpaddr9",   0x3B9u32),
    (pmpaddr10,  "pmpaddr10",  0x3BAu32),
    (pmpaddr11,  "pmpaddr11",  0x3BBu32),
    (pmpaddr12,  "pmpaddr12",  0x3BCu32),
    (pmpaddr13,  "pmpaddr13",  0x3BDu32),
    (pmpaddr14,  "pmpaddr14",  0x3BEu32),
    (pmpaddr15,  "pmpaddr15",  0x3BFu32),
    (mcycle,     "mcycle",     0xB00u32),
    (minstret,   "minstret",   0xB02u32),
    (mvendorid,  "mvendorid",  0xF11u32),
    (marchid,    "marchid",    0xF12u32),
    (mimpid,     "mimpid",     0xF13u32),
    (mhartid,    "mhartid",    0xF14u32),
}

#[repr(u8)]
#[derive(Debug, PartialEq, PartialOrd, Ord, Eq, Clone, Copy)]
pub enum PrivilegeLevel {
    U = 0,
    S = 1,
    /// Hypervisor and VS CSRs.
    V = 2,
    M = 3,
}

impl From<u8> for PrivilegeLevel {
    /// Only the two lowest bits are used.
    fn from(value: u8) -> PrivilegeLevel {
        match value & 0b11 {
            0 => PrivilegeLevel::U,
            1 => PrivilegeLevel::S,
            2 => PrivilegeLevel::V,
            _ => PrivilegeLevel::M,
        }
    }
}

/// Lowest privilege level allowed to access `addr` (bits [9:8]).
#[inline]
pub const fn privilege(addr: u32) -> PrivilegeLevel {
    match (addr >> 8) & 0b11 {
        0 => PrivilegeLevel::U,
        1 => PrivilegeLevel::S,
        2 => PrivilegeLevel::V,
        _ => PrivilegeLevel::M,
    }
}

/// CSRs with bits [11:10] set are read-only; writing them raises an illegal instruction.
#[inline]
pub const fn is_read_only(addr: u32) -> bool {
    (addr >> 10) & 0b11 == 0b11
}

/// A 12-bit CSR address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Csr(u16);

impl Csr {
    pub const fn new(addr: u32) -> Option<Csr> {
        if addr < CSR_CNT {
            Some(Csr(addr as u16))
        } else {
            None
        }
    }

    pub fn from_name(name: &str) -> Option<Csr> {
        CSR_ADDRESS.get(name.trim()).and_then(|addr| Csr::new(*addr))
    }

    #[inline]
    pub const fn addr(self) -> u32 {
        self.0 as u32
    }

    pub fn name(self) -> Option<&'static str> {
        CSR_NAME.get(&self.addr()).copied()
    }

    pub const fn privilege(self) -> PrivilegeLevel {
        privilege(self.addr())
    }

    pub const fn is_read_only(self) -> bool {
        is_read_only(self.addr())
    }
}

impl Display for Csr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:03x}", self.0),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid csr: {0}")]
pub struct InvalidCsr(pub String);

impl FromStr for Csr {
    type Err = InvalidCsr;

    /// Accepts a CSR name or a numeric address below 4096.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(csr) = Csr::from_name(s) {
            return Ok(csr);
        }

        parse_u64(s)
            .ok()
            .and_then(|n| u32::try_from(n).ok())
            .and_then(Csr::new)
            .ok_or_else(|| InvalidCsr(s.trim().to_string()))
    }
}
