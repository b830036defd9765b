use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::config::arch_config::{WordType, XLEN};

/// Trap cause, as reported by `mcause`/`scause`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    Interrupt(Interrupt),
    Exception(Exception),
    /// Reserved or platform-defined cause code.
    Unknown { interrupt: bool, code: WordType },
}

#[repr(u8)]
#[derive(TryFromPrimitive, IntoPrimitive, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interrupt {
    SupervisorSoft = 1,
    MachineSoft = 3,
    SupervisorTimer = 5,
    MachineTimer = 7,
    SupervisorExternal = 9,
    MachineExternal = 11,
}

#[repr(u8)]
#[derive(TryFromPrimitive, IntoPrimitive, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Exception {
    InstructionMisaligned = 0,
    InstructionFault = 1,
    IllegalInstruction = 2,
    Breakpoint = 3,
    LoadMisaligned = 4,
    LoadFault = 5,
    StoreMisaligned = 6,
    StoreFault = 7,
    UserEnvCall = 8,
    SupervisorEnvCall = 9,
    MachineEnvCall = 11,
    InstructionPageFault = 12,
    LoadPageFault = 13,
    StorePageFault = 15,
}

pub const INTERRUPT_BIT: WordType = 1 << (XLEN - 1);

impl Trap {
    /// Decode a raw cause register value.
    pub fn from_cause(cause: WordType) -> Self {
        let interrupt = cause & INTERRUPT_BIT != 0;
        let code = cause & !INTERRUPT_BIT;

        let known = u8::try_from(code).ok().and_then(|nr| {
            if interrupt {
                Interrupt::try_from(nr).ok().map(Trap::Interrupt)
            } else {
                Exception::try_from(nr).ok().map(Trap::Exception)
            }
        });

        known.unwrap_or(Trap::Unknown { interrupt, code })
    }

    pub fn is_interrupt(&self) -> bool {
        match self {
            Trap::Interrupt(_) => true,
            Trap::Exception(_) => false,
            Trap::Unknown { interrupt, .. } => *interrupt,
        }
    }

    pub fn code(&self) -> WordType {
        match self {
            Trap::Interrupt(nr) => u8::from(*nr) as WordType,
            Trap::Exception(nr) => u8::from(*nr) as WordType,
            Trap::Unknown { code, .. } => *code,
        }
    }
}

impl From<Trap> for WordType {
    fn from(trap: Trap) -> WordType {
        if trap.is_interrupt() {
            trap.code() | INTERRUPT_BIT
        } else {
            trap.code()
        }
    }
}
