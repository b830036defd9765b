pub mod config;
pub mod emit;
pub mod isa;
pub mod utils;

pub use isa::riscv::{
    asm::{AsmError, ParseError, assemble, assemble_line, parse_line},
    csr_reg::{Csr, csr_index},
    decoder::decode,
    encoder::EncodeError,
    instruction::{DecodeInstr, InstrInfo, SystemInstr},
    reg::{Reg, reg_index},
};
