use crate::isa::{
    ISATypes,
    riscv::{decoder::SystemDesc, instruction::DecodeInstr},
};

pub mod asm;
pub mod csr_reg;
pub mod decoder;
pub mod encoder;
pub mod instruction;
pub mod macros;
pub mod reg;
pub mod trap;

#[derive(Debug)]
pub struct RiscvTypes;

impl ISATypes for RiscvTypes {
    type RawInstr = u32;
    type ISADesc = SystemDesc;
    type DecodeRst = DecodeInstr;
    type Decoder = decoder::Decoder;
}
