use color_print::ceprintln;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid number of arguments to {0}")]
    ArgumentCount(String),

    #[error("Too many arguments to {0}")]
    TooManyArguments(String),

    #[error("Constant {0} already defined")]
    RedefinedConstant(String),

    #[error("Label {0} already defined")]
    RedefinedLabel(String),

    #[error("Label value {1} translates to an opcode: {0}")]
    LabelOpcode(String, usize),

    #[error("Invalid int value: {0}")]
    InvalidValue(String),

    #[error("PUSH reserved value: {0}")]
    ReservedValue(String),

    #[error("Invalid C-SPL input: {0}")]
    InvalidEncoding(String),
}

/// An assembly failure tagged with its 1-based source line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Line {line}: {kind}")]
pub struct LineError {
    pub line: usize,
    pub kind: Error,
}

impl LineError {
    pub fn new(line: usize, kind: Error) -> Self {
        LineError { line, kind }
    }

    /// Print error with the file location and the offending source line
    pub fn print_diag(&self, file: &str, source: &str) {
        ceprintln!("<red,bold>error</>: {}", self.kind);
        ceprintln!("     <blue>--></> <underline>{}:{}</>", file, self.line);
        ceprintln!("      <blue>|</>");

        let line_content = source.lines().nth(self.line.saturating_sub(1)).unwrap_or("");
        ceprintln!(" <blue>{:>4} |</> {}", self.line, line_content);
        ceprintln!("      <blue>|</>");
    }
}
