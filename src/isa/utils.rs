pub struct ISABuilder<Desc: Clone> {
    instructions: Vec<Desc>,
}

impl<Desc: Clone> ISABuilder<Desc> {
    pub fn new() -> Self {
        ISABuilder {
            instructions: Vec::new(),
        }
    }

    pub fn add(mut self, desc: &[Desc]) -> Self {
        self.instructions.extend_from_slice(desc);
        self
    }

    pub fn build(self) -> Vec<Desc> {
        self.instructions
    }
}

/// Defines a fieldless instruction enum with an upper-case `name()` and a lower-case `mnemonic()`.
#[macro_export]
macro_rules! define_instr_enum {
    ($isa_name:ident, $($name:ident => $mnemonic:literal),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $isa_name {
            $($name),*
        }

        impl $isa_name {
            pub const ALL: &'static [$isa_name] = &[$($isa_name::$name),*];

            pub fn name(&self) -> &'static str {
                match self {
                    $($isa_name::$name => stringify!($name)),*
                }
            }

            pub fn mnemonic(&self) -> &'static str {
                match self {
                    $($isa_name::$name => $mnemonic),*
                }
            }

            pub fn from_mnemonic(s: &str) -> Option<Self> {
                match s {
                    $($mnemonic => Some($isa_name::$name),)*
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeMask {
    pub key: u32,
    pub mask: u32,
}

impl DecodeMask {
    pub const fn matches(&self, instr: u32) -> bool {
        (instr & self.mask) == self.key
    }
}

/// Build a mask from a bit pattern written MSB first, e.g.
/// `"0011000 00010 00000 000 00000 1110011"`. `?` marks a don't-care bit,
/// any other character is ignored.
pub const fn create_decode_mask(pattern: &'static str) -> DecodeMask {
    let bytes = pattern.as_bytes();
    let mut len = 0;
    let mut key = 0u32;
    let mut mask = 0u32;

    let mut i = 0;
    while i < bytes.len() {
        let ch = bytes[i];
        if ch == b'0' || ch == b'1' || ch == b'?' {
            len += 1;
            key = (key << 1) | (ch == b'1') as u32;
            mask = (mask << 1) | (ch != b'?') as u32;
        }
        i += 1;
    }

    assert!(len <= 32, "Pattern length exceeds 32 bits");
    assert!(len % 8 == 0, "Pattern length is not a multiple of 8");

    DecodeMask { key, mask }
}
