use std::path::PathBuf;

use clap::Subcommand;
use crossterm::style::Stylize;
use lazy_static::lazy_static;
use riscv_csr_asm::{
    AsmError, Csr, ParseError, Reg, assemble, decode,
    config::arch_config::WordType,
    emit::{HeaderBuilder, Syntax, format_word},
    isa::riscv::{csr_reg::InvalidCsr, csr_reg::fields::describe, reg::InvalidRegister},
    parse_line,
    utils::parse_u64,
};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Asm(#[from] AsmError),
    #[error(transparent)]
    InvalidRegister(#[from] InvalidRegister),
    #[error(transparent)]
    InvalidCsr(#[from] InvalidCsr),
    #[error("invalid value `{0}`")]
    InvalidValue(String),
    #[error("{csr} has no field view")]
    NoFieldView { csr: Csr },
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("already in the repl")]
    NestedRepl,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode source text; `;` separates instructions.
    #[command(alias = "e")]
    Encode {
        #[arg(required = true, num_args = 1..)]
        source: Vec<String>,
        #[arg(value_enum, short, long, default_value_t = Syntax::Go)]
        syntax: Syntax,
    },

    /// Disassemble instruction words.
    #[command(alias = "d")]
    Decode {
        /// Words; decimal by default, or hex/binary if prefixed with `0x`/`0b`.
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
        /// Prefer pseudo-instructions such as `csrw`.
        #[arg(short, long, default_value_t = false)]
        aliases: bool,
    },

    /// Assemble a source file.
    Asm {
        path: PathBuf,
        #[arg(value_enum, short, long, default_value_t = Syntax::Go)]
        syntax: Syntax,
    },

    /// Print the Go assembler header.
    Header {
        /// Register to define; `t0` and `t1` when nothing is chosen.
        #[arg(long = "reg")]
        regs: Vec<String>,
        /// CSR to define; the trap-handling CSRs when nothing is chosen.
        #[arg(long = "csr")]
        csrs: Vec<String>,
    },

    /// Break a CSR value into its fields.
    #[command(alias = "f")]
    Fields { csr: String, value: String },

    /// Start the interactive shell.
    Repl,
}

pub fn run(cmd: Command) -> Result<(), CliError> {
    match cmd {
        Command::Encode { source, syntax } => {
            let source = source.join(" ");
            for line in source.split(';') {
                if let Some(instr) = parse_line(line)? {
                    println!("{}", format_word(instr.encode().map_err(ParseError::from)?, syntax));
                }
            }
        }

        Command::Decode { words, aliases } => {
            for word in words {
                let raw = parse_u64(&word)
                    .ok()
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| CliError::InvalidValue(word.clone()))?;
                println!("{}: {}", palette.data(&format!("0x{:08x}", raw)), format_asm(raw, aliases));
            }
        }

        Command::Asm { path, syntax } => {
            let src = std::fs::read_to_string(&path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            for word in assemble(&src)? {
                println!("{}", format_word(word, syntax));
            }
        }

        Command::Header { regs, csrs } => {
            print!("{}", build_header(&regs, &csrs)?);
        }

        Command::Fields { csr, value } => {
            let csr: Csr = csr.parse()?;
            let value = parse_u64(&value)
                .ok()
                .and_then(|v| WordType::try_from(v).ok())
                .ok_or_else(|| CliError::InvalidValue(value.clone()))?;
            let fields = describe(csr, value).ok_or(CliError::NoFieldView { csr })?;

            println!("{} = {}", palette.csr(&csr.to_string()), palette.data(&format!("0x{:x}", value)));
            for (name, field) in fields {
                println!("  {} = {}", palette.field(name, 9), field);
            }
        }

        Command::Repl => return Err(CliError::NestedRepl),
    }

    Ok(())
}

fn build_header(regs: &[String], csrs: &[String]) -> Result<String, CliError> {
    if regs.is_empty() && csrs.is_empty() {
        return Ok(HeaderBuilder::with_defaults().build());
    }

    let mut builder = HeaderBuilder::new();
    for reg in regs {
        builder = builder.reg(reg.parse::<Reg>()?);
    }
    for csr in csrs {
        builder = builder.csr(csr.parse::<Csr>()?);
    }
    Ok(builder.build())
}

fn format_asm(raw: u32, aliases: bool) -> String {
    match decode(raw) {
        Some(instr) if aliases => palette.instr(&format!("{:#}", instr)).to_string(),
        Some(instr) => palette.instr(&instr.to_string()).to_string(),
        None => palette.invalid("<invalid instruction>").to_string(),
    }
}

lazy_static! {
    static ref palette: OutputPalette = OutputPalette {};
}

struct OutputPalette;

impl OutputPalette {
    fn csr(&self, csr: &str) -> impl std::fmt::Display {
        csr.dark_grey()
    }

    fn field(&self, name: &str, padding: usize) -> impl std::fmt::Display {
        format!("{:<width$}", name, width = padding).magenta()
    }

    fn instr(&self, instr: &str) -> impl std::fmt::Display {
        instr.green()
    }

    fn data(&self, value: &str) -> impl std::fmt::Display {
        value.yellow()
    }

    fn invalid(&self, value: &str) -> impl std::fmt::Display {
        value.red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_selection() {
        let header = build_header(&[], &[]).unwrap();
        assert!(header.contains("#define mepc"));

        let header = build_header(&["a0".to_string()], &["mhartid".to_string()]).unwrap();
        assert!(header.contains("#define a0 10"));
        assert!(header.contains("#define mhartid 0xf14"));
        assert!(!header.contains("#define t0"));

        assert!(matches!(
            build_header(&["x32".to_string()], &[]),
            Err(CliError::InvalidRegister(_))
        ));
    }
}
