use lazy_static::lazy_static;

use crate::{
    isa::{
        DecoderTrait,
        riscv::{
            RiscvTypes,
            csr_reg::CSR_NAME,
            encoder::SYSTEM_OPCODE,
            instruction::{DecodeInstr, InstrInfo, SystemInstr},
        },
        utils::{DecodeMask, ISABuilder, create_decode_mask},
    },
    utils::extract_bits,
};

mod funct_decoder;
mod mask_decoder;

/// One row of a decode table. Rows with a `mask` match a whole fixed word,
/// the others dispatch on `funct3`.
#[derive(Debug, Clone)]
pub struct SystemDesc {
    pub instr: SystemInstr,
    pub funct3: u8,
    pub mask: Option<DecodeMask>,
}

macro_rules! system_table {
    ($table:ident, { $( $name:ident { funct3: $funct3:literal, } ),* $(,)? }) => {
        pub const $table: &[SystemDesc] = &[
            $(
                SystemDesc {
                    instr: SystemInstr::$name,
                    funct3: $funct3,
                    mask: None,
                }
            ),*
        ];
    };
    ($table:ident, { $( $name:ident { pattern: $pattern:literal, } ),* $(,)? }) => {
        pub const $table: &[SystemDesc] = &[
            $(
                SystemDesc {
                    instr: SystemInstr::$name,
                    funct3: 0b000,
                    mask: Some(create_decode_mask($pattern)),
                }
            ),*
        ];
    };
}

system_table!(TABLE_ZICSR, {
    CSRRW  { funct3: 0b001, },
    CSRRS  { funct3: 0b010, },
    CSRRC  { funct3: 0b011, },
    CSRRWI { funct3: 0b101, },
    CSRRSI { funct3: 0b110, },
    CSRRCI { funct3: 0b111, },
});

system_table!(TABLE_RVSYSTEM, {
    ECALL  { pattern: "000000000000 00000 000 00000 1110011", },
    EBREAK { pattern: "000000000001 00000 000 00000 1110011", },
    SRET   { pattern: "000100000010 00000 000 00000 1110011", },
    MRET   { pattern: "001100000010 00000 000 00000 1110011", },
    WFI    { pattern: "000100000101 00000 000 00000 1110011", },
});

pub struct Decoder {
    funct3_decoder: funct_decoder::Decoder,
    mask_decoder: mask_decoder::MaskDecoder,
}

impl Decoder {
    pub fn new() -> Self {
        let isa = ISABuilder::new()
            .add(TABLE_ZICSR)
            .add(TABLE_RVSYSTEM)
            .build();
        Self::from_isa(&isa)
    }
}

impl DecoderTrait<RiscvTypes> for Decoder {
    fn from_isa(instrs: &[SystemDesc]) -> Self {
        Self {
            funct3_decoder: funct_decoder::Decoder::from_isa(instrs),
            mask_decoder: mask_decoder::MaskDecoder::from_isa(instrs),
        }
    }

    fn decode(&self, instr: u32) -> Option<DecodeInstr> {
        if extract_bits(instr, 0, 7) != SYSTEM_OPCODE {
            return None;
        }

        None.or_else(|| self.mask_decoder.decode(instr))
            .or_else(|| self.funct3_decoder.decode(instr))
    }
}

fn decode_info(raw_instr: u32, instr: SystemInstr) -> InstrInfo {
    if !instr.is_csr() {
        return InstrInfo::None;
    }

    let rd = extract_bits(raw_instr, 7, 5) as u8;
    let rs1 = extract_bits(raw_instr, 15, 5) as u8;
    let csr = extract_bits(raw_instr, 20, 12) as u16;

    InstrInfo::Csr { rd, rs1, csr }
}

lazy_static! {
    static ref DECODER: Decoder = Decoder::new();
}

/// Decode a SYSTEM-opcode word with the shared decoder.
pub fn decode(raw_instr: u32) -> Option<DecodeInstr> {
    let rst = DECODER.decode(raw_instr);

    match rst {
        Some(DecodeInstr(_, InstrInfo::Csr { csr, .. })) if !CSR_NAME.contains_key(&(csr as u32)) => {
            log::warn!("0x{:08x} accesses unnamed csr 0x{:03x}", raw_instr, csr);
        }
        None => {
            log::debug!("0x{:08x} is not a known SYSTEM instruction", raw_instr);
        }
        _ => {}
    }

    rst
}
