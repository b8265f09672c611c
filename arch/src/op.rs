use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Primitive instructions. The discriminant is the machine code byte,
/// which is also the character the program listing shows for it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
pub enum Op {
    // Operand forbidden
    SHL = 0x3C, // '<'
    SHR = 0x3E, // '>'
    DUP = 0x32, // '2'
    XCHG = 0x78, // 'x'
    SLEEP = 0x7A, // 'z'

    // Optional immediate operand, pushed before the opcode
    ADD = 0x2B, // '+'
    SUB = 0x2D, // '-'
    XOR = 0x5E, // '^'
    OR = 0x7C, // '|'
    AND = 0x26, // '&'
    DELAY = 0x2C, // ','
    JMP = 0x3D, // '='
    LOOP = 0x40, // '@'
    READ = 0x72, // 'r'
    WRITE = 0x77, // 'w'
    EREAD = 0x3F, // '?'
    EWRITE = 0x21, // '!'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Optional,
}

impl Op {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Unknown command: {}", s.to_ascii_uppercase())),
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Op::try_from(byte).ok()
    }

    pub fn code(self) -> u8 {
        self.into()
    }

    pub fn token(self) -> char {
        self.code() as char
    }

    pub fn arity(self) -> Arity {
        use Op::*;
        match self {
            SHL | SHR | DUP | XCHG | SLEEP => Arity::None,
            ADD | SUB | XOR | OR | AND | DELAY | JMP | LOOP | READ | WRITE | EREAD | EWRITE => {
                Arity::Optional
            }
        }
    }
}

static RESERVED: Lazy<HashSet<u8>> = Lazy::new(|| Op::iter().map(Op::code).collect());

/// A byte the machine would decode as an opcode.
pub fn is_reserved(byte: u8) -> bool {
    RESERVED.contains(&byte)
}
