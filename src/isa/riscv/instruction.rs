use std::fmt::Display;

use crate::{
    define_instr_enum,
    isa::riscv::{
        csr_reg::Csr,
        encoder::{self, EBREAK, ECALL, EncodeError, MRET, SRET, WFI, funct3},
        reg::{Reg, reg_name},
    },
};

define_instr_enum!(SystemInstr,
    CSRRW  => "csrrw",
    CSRRS  => "csrrs",
    CSRRC  => "csrrc",
    CSRRWI => "csrrwi",
    CSRRSI => "csrrsi",
    CSRRCI => "csrrci",
    ECALL  => "ecall",
    EBREAK => "ebreak",
    SRET   => "sret",
    MRET   => "mret",
    WFI    => "wfi",
);

impl SystemInstr {
    /// Function field of the CSR forms, `None` for the fixed words.
    pub fn funct3(&self) -> Option<u32> {
        match self {
            SystemInstr::CSRRW => Some(funct3::CSRRW),
            SystemInstr::CSRRS => Some(funct3::CSRRS),
            SystemInstr::CSRRC => Some(funct3::CSRRC),
            SystemInstr::CSRRWI => Some(funct3::CSRRWI),
            SystemInstr::CSRRSI => Some(funct3::CSRRSI),
            SystemInstr::CSRRCI => Some(funct3::CSRRCI),
            _ => None,
        }
    }

    pub fn fixed_word(&self) -> Option<u32> {
        match self {
            SystemInstr::ECALL => Some(ECALL),
            SystemInstr::EBREAK => Some(EBREAK),
            SystemInstr::SRET => Some(SRET),
            SystemInstr::MRET => Some(MRET),
            SystemInstr::WFI => Some(WFI),
            _ => None,
        }
    }

    /// `rs1` holds a 5-bit zero-extended immediate rather than a register.
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            SystemInstr::CSRRWI | SystemInstr::CSRRSI | SystemInstr::CSRRCI
        )
    }

    pub fn is_csr(&self) -> bool {
        self.funct3().is_some()
    }
}

/// Operands of a SYSTEM instruction. For the immediate forms `rs1` is the `uimm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrInfo {
    None,
    Csr { rd: u8, rs1: u8, csr: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeInstr(pub SystemInstr, pub InstrInfo);

impl DecodeInstr {
    pub fn fixed(instr: SystemInstr) -> Self {
        DecodeInstr(instr, InstrInfo::None)
    }

    /// Register form, e.g. `csrrw rd, csr, rs1`.
    pub fn csr_reg(instr: SystemInstr, rd: Reg, csr: Csr, rs1: Reg) -> Self {
        DecodeInstr(
            instr,
            InstrInfo::Csr {
                rd: rd.into(),
                rs1: rs1.into(),
                csr: csr.addr() as u16,
            },
        )
    }

    /// Immediate form, e.g. `csrrwi rd, csr, uimm`.
    pub fn csr_imm(instr: SystemInstr, rd: Reg, csr: Csr, uimm: u8) -> Self {
        DecodeInstr(
            instr,
            InstrInfo::Csr {
                rd: rd.into(),
                rs1: uimm,
                csr: csr.addr() as u16,
            },
        )
    }

    pub fn encode(&self) -> Result<u32, EncodeError> {
        encoder::encode(self.0, self.1)
    }

    /// Assembler pseudo-instruction for this instruction, if one applies.
    pub fn alias(&self) -> Option<(&'static str, Vec<String>)> {
        let DecodeInstr(instr, InstrInfo::Csr { rd, rs1, csr }) = *self else {
            return None;
        };
        let csr = format_csr(csr);
        let rd_name = reg_name(rd).to_string();
        let rs1_name = reg_name(rs1).to_string();

        match (instr, rd, rs1) {
            (SystemInstr::CSRRS, _, 0) => Some(("csrr", vec![rd_name, csr])),
            (SystemInstr::CSRRW, 0, _) => Some(("csrw", vec![csr, rs1_name])),
            (SystemInstr::CSRRS, 0, _) => Some(("csrs", vec![csr, rs1_name])),
            (SystemInstr::CSRRC, 0, _) => Some(("csrc", vec![csr, rs1_name])),
            (SystemInstr::CSRRWI, 0, _) => Some(("csrwi", vec![csr, rs1.to_string()])),
            (SystemInstr::CSRRSI, 0, _) => Some(("csrsi", vec![csr, rs1.to_string()])),
            (SystemInstr::CSRRCI, 0, _) => Some(("csrci", vec![csr, rs1.to_string()])),
            _ => None,
        }
    }
}

fn format_csr(addr: u16) -> String {
    match Csr::new(addr as u32) {
        Some(csr) => csr.to_string(),
        None => format!("0x{:x}", addr),
    }
}

impl Display for DecodeInstr {
    /// `{}` prints the canonical form (`csrrw zero, mstatus, t0`),
    /// `{:#}` prefers pseudo-instructions (`csrw mstatus, t0`).
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if f.alternate() {
            if let Some((mnemonic, operands)) = self.alias() {
                return write!(f, "{} {}", mnemonic, operands.join(", "));
            }
        }

        let DecodeInstr(instr, info) = *self;
        match info {
            InstrInfo::None => f.write_str(instr.mnemonic()),
            InstrInfo::Csr { rd, rs1, csr } => {
                let src = if instr.is_immediate() {
                    rs1.to_string()
                } else {
                    reg_name(rs1).to_string()
                };
                write!(
                    f,
                    "{} {}, {}, {}",
                    instr.mnemonic(),
                    reg_name(rd),
                    format_csr(csr),
                    src
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::riscv::csr_reg::csr_index;

    fn csr(addr: u32) -> Csr {
        Csr::new(addr).unwrap()
    }

    #[test]
    fn test_instr_names() {
        assert_eq!(SystemInstr::CSRRW.name(), "CSRRW");
        assert_eq!(SystemInstr::CSRRW.mnemonic(), "csrrw");
        assert_eq!(SystemInstr::from_mnemonic("mret"), Some(SystemInstr::MRET));
        assert_eq!(SystemInstr::from_mnemonic("csrw"), None);
        assert_eq!(SystemInstr::ALL.len(), 11);
    }

    #[test]
    fn test_classification() {
        for instr in SystemInstr::ALL {
            assert_ne!(instr.is_csr(), instr.fixed_word().is_some(), "{:?}", instr);
        }
        assert!(SystemInstr::CSRRCI.is_immediate());
        assert!(!SystemInstr::CSRRC.is_immediate());
    }

    #[test]
    fn test_display_canonical() {
        let instr = DecodeInstr::csr_reg(
            SystemInstr::CSRRW,
            Reg::Zero,
            csr(csr_index::mstatus),
            Reg::T0,
        );
        assert_eq!(instr.to_string(), "csrrw zero, mstatus, t0");

        let instr = DecodeInstr::csr_imm(SystemInstr::CSRRSI, Reg::A0, csr(0x7c0), 2);
        assert_eq!(instr.to_string(), "csrrsi a0, 0x7c0, 2");

        assert_eq!(DecodeInstr::fixed(SystemInstr::MRET).to_string(), "mret");
    }

    #[test]
    fn test_display_alias() {
        let fmt = |instr: DecodeInstr| format!("{:#}", instr);
        let mstatus = csr(csr_index::mstatus);

        assert_eq!(
            fmt(DecodeInstr::csr_reg(SystemInstr::CSRRW, Reg::Zero, mstatus, Reg::T0)),
            "csrw mstatus, t0"
        );
        assert_eq!(
            fmt(DecodeInstr::csr_reg(
                SystemInstr::CSRRS,
                Reg::T1,
                csr(csr_index::mepc),
                Reg::Zero
            )),
            "csrr t1, mepc"
        );
        assert_eq!(
            fmt(DecodeInstr::csr_reg(SystemInstr::CSRRC, Reg::Zero, mstatus, Reg::T0)),
            "csrc mstatus, t0"
        );
        assert_eq!(
            fmt(DecodeInstr::csr_imm(SystemInstr::CSRRSI, Reg::Zero, mstatus, 8)),
            "csrsi mstatus, 8"
        );
        // No alias with both a destination and a source.
        assert_eq!(
            fmt(DecodeInstr::csr_reg(SystemInstr::CSRRW, Reg::T1, csr(csr_index::satp), Reg::T0)),
            "csrrw t1, satp, t0"
        );
        assert_eq!(fmt(DecodeInstr::fixed(SystemInstr::WFI)), "wfi");
    }

    #[test]
    fn test_encode() {
        let instr = DecodeInstr::csr_reg(
            SystemInstr::CSRRW,
            Reg::T1,
            csr(csr_index::satp),
            Reg::T0,
        );
        assert_eq!(instr.encode(), Ok(0x18029373));
        assert_eq!(DecodeInstr::fixed(SystemInstr::MRET).encode(), Ok(0x30200073));
    }
}
