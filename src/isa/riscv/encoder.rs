//! Encoders for the SYSTEM major opcode.
//!
//! The `const fn`s take raw operand numbers in the same argument order as the
//! `CSRW(RS,CSR)`-style assembler macros and never fail: out-of-range operands
//! are caught by `debug_assert!` only (a compile error when evaluated in a
//! `const` item). [`encode`] is the validating entry point.

use crate::{
    config::asm_config::{CSR_CNT, REG_CNT, UIMM_CNT},
    isa::riscv::{
        csr_reg::is_read_only,
        instruction::{InstrInfo, SystemInstr},
    },
};

pub const SYSTEM_OPCODE: u32 = 0b111_0011;

#[allow(unused)]
pub mod funct3 {
    pub const PRIV: u32 = 0b000;
    pub const CSRRW: u32 = 0b001;
    pub const CSRRS: u32 = 0b010;
    pub const CSRRC: u32 = 0b011;
    pub const CSRRWI: u32 = 0b101;
    pub const CSRRSI: u32 = 0b110;
    pub const CSRRCI: u32 = 0b111;
}

pub const ECALL: u32 = 0x00000073;
pub const EBREAK: u32 = 0x00100073;
pub const SRET: u32 = 0x10200073;
pub const MRET: u32 = 0x30200073;
pub const WFI: u32 = 0x10500073;

/// `csr[31:20] | rs1[19:15] | funct3[14:12] | rd[11:7] | opcode[6:0]`
///
/// Fields are summed like the `CSRW(RS,CSR)` header macros, so out-of-range
/// operands carry into the next field in release builds exactly as they do there.
#[inline]
pub const fn csr_type(funct3: u32, rd: u32, rs1: u32, csr: u32) -> u32 {
    debug_assert!(rd < REG_CNT, "rd out of range");
    debug_assert!(rs1 < REG_CNT, "rs1/uimm out of range");
    debug_assert!(csr < CSR_CNT, "csr out of range");

    (SYSTEM_OPCODE + (funct3 << 12))
        .wrapping_add(rd << 7)
        .wrapping_add(rs1 << 15)
        .wrapping_add(csr << 20)
}

/// `csrrw x0, csr, rs`
#[inline]
pub const fn csrw(rs: u32, csr: u32) -> u32 {
    csr_type(funct3::CSRRW, 0, rs, csr)
}

/// `csrrs rd, csr, x0`
#[inline]
pub const fn csrr(csr: u32, rd: u32) -> u32 {
    csr_type(funct3::CSRRS, rd, 0, csr)
}

/// `csrrs x0, csr, rs`
#[inline]
pub const fn csrs(rs: u32, csr: u32) -> u32 {
    csr_type(funct3::CSRRS, 0, rs, csr)
}

/// `csrrc x0, csr, rs`
#[inline]
pub const fn csrc(rs: u32, csr: u32) -> u32 {
    csr_type(funct3::CSRRC, 0, rs, csr)
}

/// `csrrw rd, csr, rs`
#[inline]
pub const fn csrrw(rs: u32, csr: u32, rd: u32) -> u32 {
    csr_type(funct3::CSRRW, rd, rs, csr)
}

/// `csrrs rd, csr, rs`
#[inline]
pub const fn csrrs(rs: u32, csr: u32, rd: u32) -> u32 {
    csr_type(funct3::CSRRS, rd, rs, csr)
}

/// `csrrc rd, csr, rs`
#[inline]
pub const fn csrrc(rs: u32, csr: u32, rd: u32) -> u32 {
    csr_type(funct3::CSRRC, rd, rs, csr)
}

#[inline]
pub const fn csrrwi(uimm: u32, csr: u32, rd: u32) -> u32 {
    csr_type(funct3::CSRRWI, rd, uimm, csr)
}

#[inline]
pub const fn csrrsi(uimm: u32, csr: u32, rd: u32) -> u32 {
    csr_type(funct3::CSRRSI, rd, uimm, csr)
}

#[inline]
pub const fn csrrci(uimm: u32, csr: u32, rd: u32) -> u32 {
    csr_type(funct3::CSRRCI, rd, uimm, csr)
}

#[inline]
pub const fn csrwi(uimm: u32, csr: u32) -> u32 {
    csrrwi(uimm, csr, 0)
}

#[inline]
pub const fn csrsi(uimm: u32, csr: u32) -> u32 {
    csrrsi(uimm, csr, 0)
}

#[inline]
pub const fn csrci(uimm: u32, csr: u32) -> u32 {
    csrrci(uimm, csr, 0)
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    #[error("register x{0} out of range")]
    RegisterOutOfRange(u32),
    #[error("immediate {0} does not fit in 5 bits")]
    ImmediateOutOfRange(u32),
    #[error("csr address 0x{0:x} does not fit in 12 bits")]
    CsrOutOfRange(u32),
    #[error("csr 0x{0:03x} is read-only")]
    WriteToReadOnlyCsr(u32),
    #[error("operands do not match `{0}`")]
    OperandMismatch(&'static str),
}

/// Whether the instruction writes its CSR. `csrrs`/`csrrc` with `rs1 = x0`
/// (or `uimm = 0`) only read.
pub fn writes_csr(instr: SystemInstr, rs1: u32) -> bool {
    match instr {
        SystemInstr::CSRRW | SystemInstr::CSRRWI => true,
        SystemInstr::CSRRS | SystemInstr::CSRRC | SystemInstr::CSRRSI | SystemInstr::CSRRCI => {
            rs1 != 0
        }
        _ => false,
    }
}

/// Validate operands and encode.
pub fn encode(instr: SystemInstr, info: InstrInfo) -> Result<u32, EncodeError> {
    let (f3, rd, rs1, csr) = match (instr.funct3(), info, instr.fixed_word()) {
        (Some(f3), InstrInfo::Csr { rd, rs1, csr }, _) => (f3, rd as u32, rs1 as u32, csr as u32),
        (None, InstrInfo::None, Some(word)) => return Ok(word),
        _ => return Err(EncodeError::OperandMismatch(instr.mnemonic())),
    };

    if rd >= REG_CNT {
        return Err(EncodeError::RegisterOutOfRange(rd));
    }
    if instr.is_immediate() {
        if rs1 >= UIMM_CNT {
            return Err(EncodeError::ImmediateOutOfRange(rs1));
        }
    } else if rs1 >= REG_CNT {
        return Err(EncodeError::RegisterOutOfRange(rs1));
    }
    if csr >= CSR_CNT {
        return Err(EncodeError::CsrOutOfRange(csr));
    }
    if is_read_only(csr) && writes_csr(instr, rs1) {
        return Err(EncodeError::WriteToReadOnlyCsr(csr));
    }

    let word = csr_type(f3, rd, rs1, csr);
    log::trace!("encoded {} {:?} -> 0x{:08x}", instr.mnemonic(), info, word);
    Ok(word)
}
