use smallvec::SmallVec;

use crate::{
    isa::{
        DecoderTrait,
        riscv::{
            RiscvTypes,
            decoder::{SystemDesc, decode_info},
            instruction::{DecodeInstr, SystemInstr},
        },
    },
    utils::extract_bits,
};

const MAP_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct SmallMap<K, V> {
    data: SmallVec<[(K, V); MAP_LENGTH]>,
}

impl<K: Eq + Copy, V> SmallMap<K, V> {
    pub fn new() -> Self {
        SmallMap {
            data: SmallVec::new(),
        }
    }

    /// Later inserts of an existing key replace the value.
    pub fn insert(&mut self, key: K, value: V) {
        match self.data.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.data.push((key, value)),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Dispatches the CSR forms on funct3.
pub(super) struct Decoder {
    decode_table: SmallMap<u8, SystemInstr>,
}

impl DecoderTrait<RiscvTypes> for Decoder {
    fn from_isa(instrs: &[SystemDesc]) -> Self {
        let mut decode_table = SmallMap::new();

        for desc in instrs {
            if desc.mask.is_some() {
                continue;
            }

            decode_table.insert(desc.funct3, desc.instr);
        }

        log::debug!("funct_decoder has {} instructions.", decode_table.len());

        Decoder { decode_table }
    }

    fn decode(&self, instr: u32) -> Option<DecodeInstr> {
        let funct3 = extract_bits(instr, 12, 3) as u8;
        let instr_kind = *self.decode_table.get(&funct3)?;

        Some(DecodeInstr(instr_kind, decode_info(instr, instr_kind)))
    }
}
