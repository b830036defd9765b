//! Rendering of encoded words for different assemblers, and generation of the
//! `#define` header that exposes the encodings to Go assembly.

use std::fmt::Write;

use crate::isa::riscv::{
    csr_reg::{Csr, csr_index},
    encoder::{MRET, SYSTEM_OPCODE, funct3},
    reg::Reg,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "native-cli", derive(clap::ValueEnum))]
pub enum Syntax {
    /// Go assembler: `WORD $0x30029073`
    #[default]
    Go,
    /// GNU as: `.word 0x30029073`
    Gnu,
    /// Bare hex: `0x30029073`
    Hex,
}

pub fn format_word(word: u32, syntax: Syntax) -> String {
    match syntax {
        Syntax::Go => format!("WORD $0x{:08x}", word),
        Syntax::Gnu => format!(".word 0x{:08x}", word),
        Syntax::Hex => format!("0x{:08x}", word),
    }
}

/// Builds the Go assembler header with register and CSR defines and the
/// `CSRW`/`CSRR`/`CSRS`/`CSRC`/`CSRRW`/`CSRRS`/`CSRRC`/`MRET` macros.
pub struct HeaderBuilder {
    regs: Vec<Reg>,
    csrs: Vec<Csr>,
}

impl HeaderBuilder {
    pub fn new() -> Self {
        HeaderBuilder {
            regs: Vec::new(),
            csrs: Vec::new(),
        }
    }

    /// `t0`, `t1` and the CSRs used to enter and leave machine-mode traps.
    pub fn with_defaults() -> Self {
        let csrs = [
            csr_index::satp,
            csr_index::mstatus,
            csr_index::mscratch,
            csr_index::mepc,
            csr_index::mcause,
        ];

        csrs.into_iter()
            .filter_map(Csr::new)
            .fold(Self::new().reg(Reg::T0).reg(Reg::T1), |builder, csr| {
                builder.csr(csr)
            })
    }

    pub fn reg(mut self, reg: Reg) -> Self {
        if !self.regs.contains(&reg) {
            self.regs.push(reg);
        }
        self
    }

    pub fn csr(mut self, csr: Csr) -> Self {
        if !self.csrs.contains(&csr) {
            self.csrs.push(csr);
        }
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "// RISC-V CSR instruction encodings for the Go assembler.")?;
        writeln!(out, "// Generated by csrasm, do not edit.")?;

        if !self.regs.is_empty() {
            writeln!(out)?;
            for reg in &self.regs {
                writeln!(out, "#define {} {}", reg, reg.index())?;
            }
        }

        if !self.csrs.is_empty() {
            writeln!(out)?;
            let names: Vec<String> = self.csrs.iter().map(|csr| csr_define_name(*csr)).collect();
            let width = names.iter().map(String::len).max().unwrap_or(0);
            for (name, csr) in names.iter().zip(&self.csrs) {
                writeln!(out, "#define {:<width$} 0x{:03x}", name, csr.addr(), width = width)?;
            }
        }

        let base = |f3: u32| SYSTEM_OPCODE | (f3 << 12);

        writeln!(out)?;
        writeln!(
            out,
            "#define CSRW(RS,CSR) WORD $(0x{:x} + RS<<15 + CSR<<20)",
            base(funct3::CSRRW)
        )?;
        writeln!(
            out,
            "#define CSRR(CSR,RD) WORD $(0x{:x} + RD<<7 + CSR<<20)",
            base(funct3::CSRRS)
        )?;
        writeln!(
            out,
            "#define CSRS(RS,CSR) WORD $(0x{:x} + RS<<15 + CSR<<20)",
            base(funct3::CSRRS)
        )?;
        writeln!(
            out,
            "#define CSRC(RS,CSR) WORD $(0x{:x} + RS<<15 + CSR<<20)",
            base(funct3::CSRRC)
        )?;
        for (name, f3) in [
            ("CSRRW", funct3::CSRRW),
            ("CSRRS", funct3::CSRRS),
            ("CSRRC", funct3::CSRRC),
        ] {
            writeln!(
                out,
                "#define {}(RS,CSR,RD) WORD $(0x{:x} + RD<<7 + RS<<15 + CSR<<20)",
                name,
                base(f3)
            )?;
        }

        writeln!(out)?;
        writeln!(out, "#define MRET  WORD $0x{:08x}", MRET)?;
        Ok(())
    }
}

fn csr_define_name(csr: Csr) -> String {
    match csr.name() {
        Some(name) => name.to_string(),
        None => format!("csr_{:03x}", csr.addr()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_word() {
        assert_eq!(format_word(0x30029073, Syntax::Go), "WORD $0x30029073");
        assert_eq!(format_word(0x30029073, Syntax::Gnu), ".word 0x30029073");
        assert_eq!(format_word(0x73, Syntax::Hex), "0x00000073");
    }

    #[test]
    fn test_default_header() {
        let header = HeaderBuilder::with_defaults().build();

        assert!(header.contains("#define t0 5\n"));
        assert!(header.contains("#define t1 6\n"));
        assert!(header.contains("#define satp     0x180\n"));
        assert!(header.contains("#define mstatus  0x300\n"));
        assert!(header.contains("#define mscratch 0x340\n"));
        assert!(header.contains("#define mepc     0x341\n"));
        assert!(header.contains("#define mcause   0x342\n"));
        assert!(header.contains("#define CSRW(RS,CSR) WORD $(0x1073 + RS<<15 + CSR<<20)\n"));
        assert!(header.contains("#define CSRR(CSR,RD) WORD $(0x2073 + RD<<7 + CSR<<20)\n"));
        assert!(header.contains("#define CSRS(RS,CSR) WORD $(0x2073 + RS<<15 + CSR<<20)\n"));
        assert!(header.contains("#define CSRC(RS,CSR) WORD $(0x3073 + RS<<15 + CSR<<20)\n"));
        assert!(header.contains(
            "#define CSRRW(RS,CSR,RD) WORD $(0x1073 + RD<<7 + RS<<15 + CSR<<20)\n"
        ));
        assert!(header.ends_with("#define MRET  WORD $0x30200073\n"));
    }

    #[test]
    fn test_custom_header() {
        let header = HeaderBuilder::new()
            .reg(Reg::A0)
            .reg(Reg::A0)
            .csr(Csr::new(0x7c0).unwrap())
            .build();

        assert_eq!(header.matches("#define a0 10").count(), 1);
        assert!(header.contains("#define csr_7c0 0x7c0\n"));
        assert!(!header.contains("#define t0"));
    }
}
