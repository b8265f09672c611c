pub mod op;

/// Byte emitted by `STOP`.
pub const STOP_BYTE: u8 = 0xFF;

/// Base address used until a program sets its own origin.
pub const DEFAULT_ORIGIN: usize = 16;

/// Size of the program memory of the machine.
pub const PROGRAM_SIZE: usize = 256;
