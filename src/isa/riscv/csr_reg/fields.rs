//! Field views of the CSRs that trap and boot code set up: `mstatus`, `satp` and `mcause`.

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::{Csr, PrivilegeLevel, csr_index};
use crate::{
    config::arch_config::WordType,
    isa::riscv::trap::Trap,
    utils::{get_field, set_field},
};

bitflags! {
    /// Single-bit fields of `mstatus`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MstatusFlags: WordType {
        const SIE  = 1 << 1;
        const MIE  = 1 << 3;
        const SPIE = 1 << 5;
        const UBE  = 1 << 6;
        const MPIE = 1 << 7;
        const SPP  = 1 << 8;
        const MPRV = 1 << 17;
        const SUM  = 1 << 18;
        const MXR  = 1 << 19;
        const TVM  = 1 << 20;
        const TW   = 1 << 21;
        const TSR  = 1 << 22;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mstatus(pub WordType);

impl Mstatus {
    pub const MPP_LOW: u32 = 11;
    pub const FS_LOW: u32 = 13;

    pub fn flags(&self) -> MstatusFlags {
        MstatusFlags::from_bits_truncate(self.0)
    }

    pub fn with_flags(self, flags: MstatusFlags) -> Self {
        Mstatus(self.0 | flags.bits())
    }

    pub fn without_flags(self, flags: MstatusFlags) -> Self {
        Mstatus(self.0 & !flags.bits())
    }

    /// Privilege level `mret` returns to.
    pub fn mpp(&self) -> PrivilegeLevel {
        PrivilegeLevel::from(get_field(self.0, Self::MPP_LOW, 2) as u8)
    }

    pub fn with_mpp(self, level: PrivilegeLevel) -> Self {
        Mstatus(set_field(self.0, Self::MPP_LOW, 2, level as WordType))
    }

    /// Floating-point unit state: 0 off, 1 initial, 2 clean, 3 dirty.
    pub fn fs(&self) -> WordType {
        get_field(self.0, Self::FS_LOW, 2)
    }

    pub fn with_fs(self, fs: WordType) -> Self {
        Mstatus(set_field(self.0, Self::FS_LOW, 2, fs))
    }
}

#[repr(u8)]
#[derive(TryFromPrimitive, IntoPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatpMode {
    Bare = 0,
    Sv32 = 1,
    Sv39 = 8,
    Sv48 = 9,
    Sv57 = 10,
}

struct SatpLayout {
    ppn_len: u32,
    asid_low: u32,
    asid_len: u32,
    mode_low: u32,
    mode_len: u32,
}

#[cfg(feature = "riscv64")]
const SATP_LAYOUT: SatpLayout = SatpLayout {
    ppn_len: 44,
    asid_low: 44,
    asid_len: 16,
    mode_low: 60,
    mode_len: 4,
};

#[cfg(feature = "riscv32")]
const SATP_LAYOUT: SatpLayout = SatpLayout {
    ppn_len: 22,
    asid_low: 22,
    asid_len: 9,
    mode_low: 31,
    mode_len: 1,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Satp(pub WordType);

impl Satp {
    pub fn new(mode: SatpMode, asid: WordType, ppn: WordType) -> Self {
        let mut bits = set_field(0, 0, SATP_LAYOUT.ppn_len, ppn);
        bits = set_field(bits, SATP_LAYOUT.asid_low, SATP_LAYOUT.asid_len, asid);
        bits = set_field(
            bits,
            SATP_LAYOUT.mode_low,
            SATP_LAYOUT.mode_len,
            u8::from(mode) as WordType,
        );

        let satp = Satp(bits);
        debug_assert!(
            satp.mode() == Some(mode),
            "{:?} is not a valid satp mode for this XLEN",
            mode
        );
        satp
    }

    /// `None` for reserved mode encodings.
    pub fn mode(&self) -> Option<SatpMode> {
        let raw = get_field(self.0, SATP_LAYOUT.mode_low, SATP_LAYOUT.mode_len);
        let mode = SatpMode::try_from(raw as u8).ok()?;

        // On RV32 the single mode bit means Sv32; Sv32 does not exist on RV64.
        match (mode, SATP_LAYOUT.mode_len) {
            (SatpMode::Sv32, 4) => None,
            _ => Some(mode),
        }
    }

    pub fn asid(&self) -> WordType {
        get_field(self.0, SATP_LAYOUT.asid_low, SATP_LAYOUT.asid_len)
    }

    pub fn ppn(&self) -> WordType {
        get_field(self.0, 0, SATP_LAYOUT.ppn_len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mcause(pub WordType);

impl Mcause {
    pub fn trap(&self) -> Trap {
        Trap::from_cause(self.0)
    }
}

/// Break a CSR value into named fields. `None` if the CSR has no field view.
pub fn describe(csr: Csr, value: WordType) -> Option<Vec<(&'static str, String)>> {
    match csr.addr() {
        csr_index::mstatus => {
            let mstatus = Mstatus(value);
            let mut fields: Vec<(&'static str, String)> = mstatus
                .flags()
                .iter_names()
                .map(|(name, _)| (name, "1".to_string()))
                .collect();
            fields.push(("MPP", format!("{:?}", mstatus.mpp())));
            fields.push(("FS", mstatus.fs().to_string()));
            Some(fields)
        }
        csr_index::satp => {
            let satp = Satp(value);
            let mode = match satp.mode() {
                Some(mode) => format!("{:?}", mode),
                None => "<reserved>".to_string(),
            };
            Some(vec![
                ("MODE", mode),
                ("ASID", format!("0x{:x}", satp.asid())),
                ("PPN", format!("0x{:x}", satp.ppn())),
            ])
        }
        csr_index::mcause | csr_index::scause => {
            let trap = Mcause(value).trap();
            Some(vec![
                ("INTERRUPT", (trap.is_interrupt() as u8).to_string()),
                ("CODE", trap.code().to_string()),
                ("CAUSE", format!("{:?}", trap)),
            ])
        }
        _ => None,
    }
}
