//! End-to-end checks across the encoder macros, the assembler, the decoder and
//! the header emitter.

use riscv_csr_asm::{
    DecodeInstr, EncodeError, InstrInfo, ParseError, SystemInstr, assemble, assemble_line,
    csr_index, csrc, csrr, csrrw, csrs, csrw, decode,
    emit::{HeaderBuilder, Syntax, format_word},
    mret, reg_index,
};

const TRAP_ENTRY: &str = include_str!("../demos/trap_entry.s");

#[test]
fn header_values() {
    assert_eq!(reg_index::t0, 5);
    assert_eq!(reg_index::t1, 6);
    assert_eq!(csr_index::satp, 0x180);
    assert_eq!(csr_index::mstatus, 0x300);
    assert_eq!(csr_index::mscratch, 0x340);
    assert_eq!(csr_index::mepc, 0x341);
    assert_eq!(csr_index::mcause, 0x342);
}

#[test]
fn macro_words_decode_back() {
    let cases = [
        (csrw!(t0, mstatus), 0x30029073, "csrrw zero, mstatus, t0"),
        (csrr!(mepc, t1), 0x34102373, "csrrs t1, mepc, zero"),
        (csrs!(t0, mscratch), 0x3402a073, "csrrs zero, mscratch, t0"),
        (csrc!(t0, mcause), 0x3422b073, "csrrc zero, mcause, t0"),
        (csrrw!(t0, satp, t1), 0x18029373, "csrrw t1, satp, t0"),
        (mret!(), 0x30200073, "mret"),
    ];

    for (word, expected, text) in cases {
        assert_eq!(word, expected, "{}", text);
        let instr = decode(word).unwrap();
        assert_eq!(instr.to_string(), text);
        assert_eq!(instr.encode(), Ok(word));
    }
}

#[test]
fn assembler_matches_macros() {
    let words = assemble(TRAP_ENTRY).unwrap();

    assert_eq!(
        words,
        vec![
            csrw!(t0, mstatus),
            csrr!(mepc, t1),
            csrs!(t0, mscratch),
            csrc!(t0, mcause),
            csrrw!(t0, satp, t1),
            0x30045073,
            0xf1402573,
            mret!(),
        ]
    );

    let go: Vec<String> = words.iter().map(|w| format_word(*w, Syntax::Go)).collect();
    assert_eq!(go[0], "WORD $0x30029073");
    assert_eq!(go[7], "WORD $0x30200073");
}

#[test]
fn disassembly_reassembles() {
    for word in assemble(TRAP_ENTRY).unwrap() {
        let instr = decode(word).unwrap();
        assert_eq!(assemble_line(&instr.to_string()), Ok(Some(word)));
        assert_eq!(assemble_line(&format!("{:#}", instr)), Ok(Some(word)));
    }
}

#[test]
fn invalid_input_is_rejected() {
    assert_eq!(
        assemble_line("csrw cycle, t0"),
        Err(ParseError::Encode(EncodeError::WriteToReadOnlyCsr(0xc00)))
    );
    assert_eq!(
        assemble_line("csrwi mstatus, 32"),
        Err(ParseError::Encode(EncodeError::ImmediateOutOfRange(32)))
    );
    assert!(matches!(
        assemble_line("csrwi mstatus, t0"),
        Err(ParseError::InvalidImmediate(_))
    ));
    assert!(matches!(
        assemble_line("csrr a0, 0x1000"),
        Err(ParseError::InvalidCsr(_))
    ));

    let err = assemble("mret\ncsrw mstatus\n").unwrap_err();
    assert_eq!(err.line, 2);

    let bad = DecodeInstr(
        SystemInstr::CSRRW,
        InstrInfo::Csr {
            rd: 32,
            rs1: 5,
            csr: 0x300,
        },
    );
    assert_eq!(bad.encode(), Err(EncodeError::RegisterOutOfRange(32)));
}

#[test]
fn generated_header() {
    let header = HeaderBuilder::with_defaults().build();

    for line in [
        "#define t0 5",
        "#define t1 6",
        "#define CSRW(RS,CSR) WORD $(0x1073 + RS<<15 + CSR<<20)",
        "#define CSRR(CSR,RD) WORD $(0x2073 + RD<<7 + CSR<<20)",
        "#define CSRS(RS,CSR) WORD $(0x2073 + RS<<15 + CSR<<20)",
        "#define CSRC(RS,CSR) WORD $(0x3073 + RS<<15 + CSR<<20)",
        "#define CSRRW(RS,CSR,RD) WORD $(0x1073 + RD<<7 + RS<<15 + CSR<<20)",
        "#define MRET  WORD $0x30200073",
    ] {
        assert!(header.lines().any(|l| l == line), "missing `{}`", line);
    }
}
