//! Assembler for HLSPL, the line oriented assembly language of the SPL
//! stack machine.
//!
//! Every program byte occupies one slot and opcodes are printable
//! characters, so immediates and label addresses that would read as an
//! opcode are rejected. Label references stay symbolic until bytes are
//! extracted, which lets a single pass handle forward references.

pub mod assembler;
pub mod code;
pub mod error;
pub mod extract;
pub mod format;
pub mod ident;
pub mod literal;
pub mod parser;

pub use assembler::{assemble, Assembled, Assembler};
pub use error::{Error, LineError};
pub use extract::{extract_bytes, Decoder};
pub use format::{render_bytes, render_defines, render_hex, render_listing, Format};
