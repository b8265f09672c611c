use arch::op::Op;
use std::fmt;

/// Content of one program byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Numeral as written in the source
    Number(String),
    /// Symbol substituted by its value, name kept for the listing
    Symbol { name: String, value: String },
    /// Label reference, resolved when bytes are extracted
    Label(String),
    Op(Op),
    Stop,
    Pad,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Number(text) => write!(f, "{}", text),
            Slot::Symbol { name, value } => write!(f, "{} /* {} */", value, name),
            Slot::Label(key) => write!(f, "{}", key),
            Slot::Op(op) => write!(f, "'{}'", op.token()),
            Slot::Stop => write!(f, "0x{:x}", arch::STOP_BYTE),
            Slot::Pad => write!(f, "0 /* pad */"),
        }
    }
}

/// One line of the assembled program. Only `Byte` occupies memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLine {
    Blank,
    Comment(String),
    /// Label definition, source line kept as written
    Label(String),
    Byte {
        slot: Slot,
        comment: Option<String>,
    },
}

impl CodeLine {
    pub fn is_byte(&self) -> bool {
        matches!(self, CodeLine::Byte { .. })
    }
}

impl fmt::Display for CodeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeLine::Blank => Ok(()),
            CodeLine::Comment(text) | CodeLine::Label(text) => write!(f, "// {}", text),
            CodeLine::Byte { slot, comment } => {
                write!(f, "{},", slot)?;
                if let Some(comment) = comment {
                    write!(f, "       // {}", comment)?;
                }
                Ok(())
            }
        }
    }
}
