pub mod riscv;
pub mod utils;

pub trait DecoderTrait<I: ISATypes> {
    fn from_isa(instrs: &[I::ISADesc]) -> Self;
    fn decode(&self, instr: I::RawInstr) -> Option<I::DecodeRst>;
}

pub trait ISATypes: Sized {
    type RawInstr: Copy;
    type ISADesc;
    type DecodeRst: Clone + Copy;
    type Decoder: DecoderTrait<Self>;
}
