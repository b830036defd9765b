use crate::isa::{
    DecoderTrait,
    riscv::{
        RiscvTypes,
        decoder::{SystemDesc, decode_info},
        instruction::{DecodeInstr, SystemInstr},
    },
    utils::DecodeMask,
};

/// Matches the fixed privileged words (`mret`, `wfi`, ...).
pub(super) struct MaskDecoder {
    masks: Vec<(DecodeMask, SystemInstr)>,
}

impl DecoderTrait<RiscvTypes> for MaskDecoder {
    fn decode(&self, raw_instr: u32) -> Option<DecodeInstr> {
        for (mask, instr) in self.masks.iter() {
            if mask.matches(raw_instr) {
                return Some(DecodeInstr(*instr, decode_info(raw_instr, *instr)));
            }
        }

        None
    }

    fn from_isa(instrs: &[SystemDesc]) -> Self {
        let mut masks = vec![];
        for desc in instrs {
            if let Some(mask) = desc.mask {
                masks.push((mask, desc.instr));
            }
        }

        Self { masks }
    }
}
