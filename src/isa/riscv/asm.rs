//! One-line assembler for the SYSTEM instructions.
//!
//! Accepts canonical mnemonics (`csrrw t1, satp, t0`), the usual pseudo
//! instructions (`csrw mstatus, t0`) and the header-macro spelling
//! (`CSRW(t0, mstatus)`). Mnemonics are case-insensitive.

use smallvec::SmallVec;

use crate::{
    config::asm_config::{COMMENT_PREFIXES, UIMM_CNT},
    isa::riscv::{
        csr_reg::{Csr, InvalidCsr},
        encoder::EncodeError,
        instruction::{DecodeInstr, SystemInstr},
        reg::{InvalidRegister, Reg},
    },
    utils::parse_u64,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("unknown macro `{0}(..)`")]
    UnknownMacro(String),
    #[error("`{mnemonic}` takes {expected} operands, got {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    #[error("malformed macro call `{0}`")]
    MalformedMacro(String),
    #[error(transparent)]
    InvalidRegister(#[from] InvalidRegister),
    #[error(transparent)]
    InvalidCsr(#[from] InvalidCsr),
    #[error("invalid immediate `{0}`")]
    InvalidImmediate(String),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct AsmError {
    pub line: usize,
    #[source]
    pub source: ParseError,
}

type Operands<'a> = SmallVec<[&'a str; 3]>;

/// Operand layout of a mnemonic, in source order.
#[derive(Debug, Clone, Copy)]
enum Form {
    /// `mret`
    Fixed(SystemInstr),
    /// `csrrw rd, csr, rs1`
    Canonical(SystemInstr),
    /// `csrr rd, csr`
    Read,
    /// `csrw csr, rs1` / `csrwi csr, uimm`
    Write(SystemInstr),
    /// `CSRW(RS, CSR)`
    MacroWrite(SystemInstr),
    /// `CSRR(CSR, RD)`
    MacroRead,
    /// `CSRRW(RS, CSR, RD)`
    MacroFull(SystemInstr),
}

impl Form {
    fn operand_cnt(&self) -> usize {
        match self {
            Form::Fixed(_) => 0,
            Form::Read | Form::Write(_) | Form::MacroWrite(_) | Form::MacroRead => 2,
            Form::Canonical(_) | Form::MacroFull(_) => 3,
        }
    }
}

fn lookup_mnemonic(mnemonic: &str) -> Option<Form> {
    let lower = mnemonic.to_ascii_lowercase();
    if let Some(instr) = SystemInstr::from_mnemonic(&lower) {
        return Some(match instr.is_csr() {
            true => Form::Canonical(instr),
            false => Form::Fixed(instr),
        });
    }

    let form = match lower.as_str() {
        "csrr" => Form::Read,
        "csrw" => Form::Write(SystemInstr::CSRRW),
        "csrs" => Form::Write(SystemInstr::CSRRS),
        "csrc" => Form::Write(SystemInstr::CSRRC),
        "csrwi" => Form::Write(SystemInstr::CSRRWI),
        "csrsi" => Form::Write(SystemInstr::CSRRSI),
        "csrci" => Form::Write(SystemInstr::CSRRCI),
        _ => return None,
    };
    Some(form)
}

fn lookup_macro(name: &str) -> Option<Form> {
    let form = match name.to_ascii_uppercase().as_str() {
        "CSRW" => Form::MacroWrite(SystemInstr::CSRRW),
        "CSRS" => Form::MacroWrite(SystemInstr::CSRRS),
        "CSRC" => Form::MacroWrite(SystemInstr::CSRRC),
        "CSRR" => Form::MacroRead,
        "CSRRW" => Form::MacroFull(SystemInstr::CSRRW),
        "CSRRS" => Form::MacroFull(SystemInstr::CSRRS),
        "CSRRC" => Form::MacroFull(SystemInstr::CSRRC),
        "MRET" => Form::Fixed(SystemInstr::MRET),
        _ => return None,
    };
    Some(form)
}

fn strip_comment(line: &str) -> &str {
    COMMENT_PREFIXES
        .iter()
        .filter_map(|prefix| line.find(prefix))
        .min()
        .map_or(line, |idx| &line[..idx])
}

fn split_operands(s: &str) -> Operands<'_> {
    if s.trim().is_empty() {
        return SmallVec::new();
    }
    s.split(',').map(str::trim).collect()
}

fn parse_uimm(s: &str) -> Result<u8, ParseError> {
    let value = parse_u64(s).map_err(|_| ParseError::InvalidImmediate(s.to_string()))?;
    if value >= UIMM_CNT as u64 {
        let value = u32::try_from(value).unwrap_or(u32::MAX);
        return Err(EncodeError::ImmediateOutOfRange(value).into());
    }
    Ok(value as u8)
}

/// Build a CSR instruction from `rd`, `csr` and the source operand text.
fn csr_instr(instr: SystemInstr, rd: &str, csr: &str, src: &str) -> Result<DecodeInstr, ParseError> {
    let rd: Reg = rd.parse()?;
    let csr: Csr = csr.parse()?;

    if instr.is_immediate() {
        Ok(DecodeInstr::csr_imm(instr, rd, csr, parse_uimm(src)?))
    } else {
        Ok(DecodeInstr::csr_reg(instr, rd, csr, src.parse()?))
    }
}

fn build(form: Form, ops: &[&str]) -> Result<DecodeInstr, ParseError> {
    const ZERO: &str = "zero";

    match form {
        Form::Fixed(instr) => Ok(DecodeInstr::fixed(instr)),
        Form::Canonical(instr) => csr_instr(instr, ops[0], ops[1], ops[2]),
        Form::Read => csr_instr(SystemInstr::CSRRS, ops[0], ops[1], ZERO),
        Form::Write(instr) => csr_instr(instr, ZERO, ops[0], ops[1]),
        Form::MacroWrite(instr) => csr_instr(instr, ZERO, ops[1], ops[0]),
        Form::MacroRead => csr_instr(SystemInstr::CSRRS, ops[1], ops[0], ZERO),
        Form::MacroFull(instr) => csr_instr(instr, ops[2], ops[1], ops[0]),
    }
}

/// Parse and validate one source line. Blank and comment-only lines give `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<DecodeInstr>, ParseError> {
    let line = strip_comment(line).trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (mnemonic, form, ops) = if let Some(open) = line.find('(') {
        let name = line[..open].trim();
        let args = line[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| ParseError::MalformedMacro(line.to_string()))?;
        let form = lookup_macro(name).ok_or_else(|| ParseError::UnknownMacro(name.to_string()))?;
        (name, form, split_operands(args))
    } else {
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let form = lookup_mnemonic(name).ok_or_else(|| ParseError::UnknownMnemonic(name.to_string()))?;
        (name, form, split_operands(rest))
    };

    if ops.len() != form.operand_cnt() {
        return Err(ParseError::OperandCount {
            mnemonic: mnemonic.to_string(),
            expected: form.operand_cnt(),
            found: ops.len(),
        });
    }

    let instr = build(form, &ops)?;
    instr.encode()?;

    log::trace!("parsed `{}` as {}", line, instr);
    Ok(Some(instr))
}

pub fn assemble_line(line: &str) -> Result<Option<u32>, ParseError> {
    match parse_line(line)? {
        Some(instr) => Ok(Some(instr.encode()?)),
        None => Ok(None),
    }
}

/// Assemble a multi-line source. Errors carry the 1-based line number.
pub fn assemble(src: &str) -> Result<Vec<u32>, AsmError> {
    let mut words = Vec::new();

    for (idx, line) in src.lines().enumerate() {
        let word = assemble_line(line).map_err(|source| AsmError {
            line: idx + 1,
            source,
        })?;
        words.extend(word);
    }

    log::debug!("assembled {} words", words.len());
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asm(line: &str) -> u32 {
        assemble_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_macro_syntax() {
        assert_eq!(asm("CSRW(t0, mstatus)"), 0x30029073);
        assert_eq!(asm("CSRR(mepc, t1)"), 0x34102373);
        assert_eq!(asm("CSRS(t0, mscratch)"), 0x3402a073);
        assert_eq!(asm("CSRC(t0, mcause)"), 0x3422b073);
        assert_eq!(asm("CSRRW(t0, satp, t1)"), 0x18029373);
        assert_eq!(asm("MRET"), 0x30200073);
        assert_eq!(asm("MRET()"), 0x30200073);
    }

    #[test]
    fn test_macro_names_ignore_case() {
        assert_eq!(asm("csrw(t0, mstatus)"), 0x30029073);
        assert_eq!(asm("Csrr(mepc, t1)"), 0x34102373);
        assert_eq!(
            parse_line("MRET(t0)"),
            Err(ParseError::OperandCount {
                mnemonic: "MRET".into(),
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn test_equivalent_spellings() {
        let expected = 0x30029073;
        assert_eq!(asm("csrrw zero, mstatus, t0"), expected);
        assert_eq!(asm("csrw mstatus, t0"), expected);
        assert_eq!(asm("CSRW(x5, 0x300)"), expected);
        assert_eq!(asm("  csrw   mstatus ,t0   # set status"), expected);
        assert_eq!(asm("csrrw x0, 768, x5 // numeric operands"), expected);
    }

    #[test]
    fn test_pseudo_instructions() {
        assert_eq!(asm("csrr t1, mepc"), 0x34102373);
        assert_eq!(asm("csrs mscratch, t0"), 0x3402a073);
        assert_eq!(asm("csrc mcause, t0"), 0x3422b073);
        assert_eq!(asm("csrwi mstatus, 2"), 0x30015073);
        assert_eq!(asm("csrsi mstatus, 0x8"), 0x30046073);
        assert_eq!(asm("csrci mstatus, 8"), 0x30047073);
        assert_eq!(asm("csrrwi a0, fflags, 1"), 0x0010d573);
        assert_eq!(asm("wfi"), 0x10500073);
    }

    #[test]
    fn test_display_parses_back() {
        for word in [0x30029073, 0x34102373, 0x0010d573, 0x30200073] {
            let instr = crate::isa::riscv::decoder::decode(word).unwrap();
            assert_eq!(parse_line(&instr.to_string()), Ok(Some(instr)));
            assert_eq!(parse_line(&format!("{:#}", instr)), Ok(Some(instr)));
        }
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# only a comment"), Ok(None));
        assert_eq!(parse_line("// another"), Ok(None));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_line("csrx t0, mstatus"),
            Err(ParseError::UnknownMnemonic("csrx".into()))
        );
        assert_eq!(
            parse_line("CSRX(t0, mstatus)"),
            Err(ParseError::UnknownMacro("CSRX".into()))
        );
        assert_eq!(
            parse_line("CSRW(t0, mstatus"),
            Err(ParseError::MalformedMacro("CSRW(t0, mstatus".into()))
        );
        assert_eq!(
            parse_line("csrw mstatus"),
            Err(ParseError::OperandCount {
                mnemonic: "csrw".into(),
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            parse_line("mret t0"),
            Err(ParseError::OperandCount {
                mnemonic: "mret".into(),
                expected: 0,
                found: 1
            })
        );
        assert_eq!(
            parse_line("csrw mstatus, t9"),
            Err(ParseError::InvalidRegister(InvalidRegister("t9".into())))
        );
        assert_eq!(
            parse_line("csrw mstatuz, t0"),
            Err(ParseError::InvalidCsr(InvalidCsr("mstatuz".into())))
        );
        assert_eq!(
            parse_line("csrwi mstatus, x"),
            Err(ParseError::InvalidImmediate("x".into()))
        );
        assert_eq!(
            parse_line("csrw mstatus, x+5"),
            Err(ParseError::InvalidRegister(InvalidRegister("x+5".into())))
        );
        assert_eq!(
            parse_line("csrw mstatus, x05"),
            Err(ParseError::InvalidRegister(InvalidRegister("x05".into())))
        );
        assert_eq!(
            parse_line("csrw +768, t0"),
            Err(ParseError::InvalidCsr(InvalidCsr("+768".into())))
        );
        assert_eq!(
            parse_line("csrwi mstatus, +1"),
            Err(ParseError::InvalidImmediate("+1".into()))
        );
        assert_eq!(
            parse_line("csrwi mstatus, 32"),
            Err(ParseError::Encode(EncodeError::ImmediateOutOfRange(32)))
        );
        assert_eq!(
            parse_line("csrw mhartid, t0"),
            Err(ParseError::Encode(EncodeError::WriteToReadOnlyCsr(0xF14)))
        );
    }

    #[test]
    fn test_assemble() {
        let src = "\
            # enter supervisor mode
            CSRW(t0, mstatus)
            csrr t1, mepc

            mret
        ";
        assert_eq!(assemble(src), Ok(vec![0x30029073, 0x34102373, 0x30200073]));

        let err = assemble("mret\nbogus\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.to_string(), "line 2: unknown mnemonic `bogus`");
    }
}
