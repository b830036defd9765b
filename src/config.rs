pub mod asm_config {
    /// Number of integer registers addressable by the 5-bit register fields.
    pub const REG_CNT: u32 = 32;
    /// CSR addresses are 12 bits wide.
    pub const CSR_CNT: u32 = 1 << 12;
    /// `uimm` of the immediate CSR forms is 5 bits wide, zero-extended.
    pub const UIMM_CNT: u32 = 32;

    pub const COMMENT_PREFIXES: [&str; 2] = ["#", "//"];
}

pub mod arch_config {
    macro_rules! arch_config {
        (
            $(
                @item
                $feature:literal => {
                    word: $word:ty,
                }
            ),* $(,)?
        ) => {
            $(
                /// Register width selected by the architecture feature.
                #[cfg(feature = $feature)]
                pub type WordType = $word;
            )*
        };
    }

    #[cfg(all(feature = "riscv32", feature = "riscv64"))]
    compile_error!("features `riscv32` and `riscv64` are mutually exclusive");

    #[cfg(not(any(feature = "riscv32", feature = "riscv64")))]
    compile_error!("one of the features `riscv32` or `riscv64` must be enabled");

    arch_config! {
        @item "riscv32" => {
            word: u32,
        },
        @item "riscv64" => {
            word: u64,
        }
    }

    pub const XLEN: usize = WordType::BITS as usize;

    /// ABI names indexed by register number. Aliases are separated by `/`.
    #[rustfmt::skip]
    pub const REG_NAME: [&str; 32] = [
        "zero", "ra",  "sp",  "gp",  "tp",  "t0",  "t1",  "t2",
        "s0/fp", "s1", "a0",  "a1",  "a2",  "a3",  "a4",  "a5",
        "a6",  "a7",  "s2",  "s3",  "s4",  "s5",  "s6",  "s7",
        "s8",  "s9",  "s10", "s11", "t3",  "t4",  "t5",  "t6",
    ];
}
