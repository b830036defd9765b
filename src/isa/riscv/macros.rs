//! Instruction-word macros with the operand order of the `CSRW(RS,CSR)` family.
//!
//! Operands are register/CSR names (`t0`, `mstatus`) or single-token numeric
//! expressions; the result is a `u32` usable in `const` items:
//!
//! ```ignore
//! const SET_MSTATUS: u32 = csrw!(t0, mstatus);
//! const READ_MEPC: u32 = csrr!(mepc, t1);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __reg {
    ($r:ident) => {
        $crate::isa::riscv::reg::reg_index::$r
    };
    ($r:expr) => {
        $r
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __csr {
    ($c:ident) => {
        $crate::isa::riscv::csr_reg::csr_index::$c
    };
    ($c:expr) => {
        $c
    };
}

/// `csrw!(RS, CSR)`: `csrrw x0, CSR, RS`
#[macro_export]
macro_rules! csrw {
    ($rs:tt, $csr:tt) => {
        $crate::isa::riscv::encoder::csrw($crate::__reg!($rs), $crate::__csr!($csr))
    };
}

/// `csrr!(CSR, RD)`: `csrrs RD, CSR, x0`
#[macro_export]
macro_rules! csrr {
    ($csr:tt, $rd:tt) => {
        $crate::isa::riscv::encoder::csrr($crate::__csr!($csr), $crate::__reg!($rd))
    };
}

/// `csrs!(RS, CSR)`: `csrrs x0, CSR, RS`
#[macro_export]
macro_rules! csrs {
    ($rs:tt, $csr:tt) => {
        $crate::isa::riscv::encoder::csrs($crate::__reg!($rs), $crate::__csr!($csr))
    };
}

/// `csrc!(RS, CSR)`: `csrrc x0, CSR, RS`
#[macro_export]
macro_rules! csrc {
    ($rs:tt, $csr:tt) => {
        $crate::isa::riscv::encoder::csrc($crate::__reg!($rs), $crate::__csr!($csr))
    };
}

/// `csrrw!(RS, CSR, RD)`: `csrrw RD, CSR, RS`
#[macro_export]
macro_rules! csrrw {
    ($rs:tt, $csr:tt, $rd:tt) => {
        $crate::isa::riscv::encoder::csrrw(
            $crate::__reg!($rs),
            $crate::__csr!($csr),
            $crate::__reg!($rd),
        )
    };
}

/// `csrrs!(RS, CSR, RD)`: `csrrs RD, CSR, RS`
#[macro_export]
macro_rules! csrrs {
    ($rs:tt, $csr:tt, $rd:tt) => {
        $crate::isa::riscv::encoder::csrrs(
            $crate::__reg!($rs),
            $crate::__csr!($csr),
            $crate::__reg!($rd),
        )
    };
}

/// `csrrc!(RS, CSR, RD)`: `csrrc RD, CSR, RS`
#[macro_export]
macro_rules! csrrc {
    ($rs:tt, $csr:tt, $rd:tt) => {
        $crate::isa::riscv::encoder::csrrc(
            $crate::__reg!($rs),
            $crate::__csr!($csr),
            $crate::__reg!($rd),
        )
    };
}

#[macro_export]
macro_rules! mret {
    () => {
        $crate::isa::riscv::encoder::MRET
    };
}
