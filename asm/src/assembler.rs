use arch::op::{is_reserved, Op};
use arch::{DEFAULT_ORIGIN, PROGRAM_SIZE};

use crate::code::{CodeLine, Slot};
use crate::error::{Error, LineError};
use crate::ident::{label_key, Define, Idents};
use crate::literal::parse_numeral;
use crate::parser::{Line, Stmt};

/// Result of one assembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub origin: usize,
    pub code: Vec<CodeLine>,
    pub defines: Vec<Define>,
}

impl Assembled {
    pub fn code_text(&self) -> Vec<String> {
        self.code.iter().map(|line| line.to_string()).collect()
    }

    /// Number of program bytes, origin padding excluded.
    pub fn size(&self) -> usize {
        self.code.iter().filter(|line| line.is_byte()).count()
    }
}

pub fn assemble(source: &str) -> Result<Assembled, LineError> {
    let mut asm = Assembler::new();
    for raw in source.split('\n') {
        asm.line(raw)?;
    }
    Ok(asm.finish())
}

/// Assembly state threaded through the source lines.
#[derive(Debug)]
pub struct Assembler {
    line_no: usize,
    offset: usize,
    origin: usize,
    idents: Idents,
    code: Vec<CodeLine>,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            line_no: 0,
            offset: 0,
            origin: DEFAULT_ORIGIN,
            idents: Idents::new(),
            code: vec![],
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Assemble the next source line.
    pub fn line(&mut self, raw: &str) -> Result<(), LineError> {
        self.line_no += 1;
        let line_no = self.line_no;
        self.process(&Line::split(raw))
            .map_err(|kind| LineError::new(line_no, kind))
    }

    pub fn finish(self) -> Assembled {
        Assembled {
            origin: self.origin,
            defines: self.idents.defines(),
            code: self.code,
        }
    }

    fn process(&mut self, line: &Line) -> Result<(), Error> {
        let comment = line.comment;
        let stmt = match Stmt::parse(line.body)? {
            Some(stmt) => stmt,
            None => {
                self.code.push(match comment {
                    Some(text) => CodeLine::Comment(text.to_string()),
                    None => CodeLine::Blank,
                });
                return Ok(());
            }
        };

        match stmt {
            Stmt::Label(label) => {
                let addr = self.offset + self.origin;
                if is_reserved((addr & 0xFF) as u8) {
                    return Err(Error::LabelOpcode(label, addr));
                }
                self.idents.define_label(&label, addr)?;
                self.code.push(CodeLine::Label(line.raw.to_string()));
            }
            Stmt::Origin(text) => {
                let origin = parse_numeral(&text)
                    .map(|v| v as usize)
                    .filter(|v| *v < PROGRAM_SIZE)
                    .ok_or(Error::InvalidValue(text))?;
                self.origin = origin;
                self.idents.set_origin(origin);
            }
            Stmt::Const(name, value) => {
                self.idents.define_const(&name, &value)?;
            }
            Stmt::Push(arg) => {
                let slot = self.immediate(&arg)?;
                self.emit(slot, comment);
            }
            Stmt::Stop => self.emit(Slot::Stop, comment),
            Stmt::Call {
                exchange,
                target,
                padding,
            } => self.call(exchange, &target, padding.as_deref(), comment)?,
            Stmt::Op(op, arg) => {
                if let Some(arg) = arg {
                    let slot = self.immediate(&arg)?;
                    self.emit(slot, None);
                }
                self.emit(Slot::Op(op), comment);
            }
        }
        Ok(())
    }

    // [XCHG] return target JMP [pad...]
    fn call(
        &mut self,
        exchange: bool,
        target: &str,
        padding: Option<&str>,
        comment: Option<&str>,
    ) -> Result<(), Error> {
        let padding = match padding {
            Some(text) => parse_numeral(text)
                .map(|v| v as usize)
                .ok_or_else(|| Error::InvalidValue(text.to_string()))?,
            None => 0,
        };
        // Validate everything before emitting anything
        let ret = self.number(self.offset + usize::from(exchange) + 3 + self.origin + padding)?;
        let target = self.immediate(target)?;

        if exchange {
            self.emit(Slot::Op(Op::XCHG), None);
        }

        // The return address goes in front of the byte emitted before it,
        // unless a label marks the start of the call sequence
        self.emit(ret, None);
        let last = self.code.len() - 1;
        let prev = self.code[..last]
            .iter()
            .rposition(|line| !matches!(line, CodeLine::Blank | CodeLine::Comment(_)));
        if let Some(prev) = prev.filter(|idx| self.code[*idx].is_byte()) {
            self.code.swap(prev, last);
        }

        self.emit(target, None);
        self.emit(Slot::Op(Op::JMP), comment);
        for _ in 0..padding {
            self.emit(Slot::Pad, None);
        }
        Ok(())
    }

    fn emit(&mut self, slot: Slot, comment: Option<&str>) {
        self.offset += 1;
        self.code.push(CodeLine::Byte {
            slot,
            comment: comment.map(String::from),
        });
    }

    /// Resolve an operand to the byte it stands for.
    pub fn immediate(&self, token: &str) -> Result<Slot, Error> {
        if let Some(label) = token.strip_prefix('@') {
            return Ok(Slot::Label(label_key(label)));
        }
        if let Some(value) = self.idents.get_value(token) {
            return Ok(Slot::Symbol {
                name: token.to_string(),
                value: value.to_string(),
            });
        }
        let value = parse_numeral(token)
            .filter(|v| *v <= u8::MAX as u32)
            .ok_or_else(|| Error::InvalidValue(token.to_string()))?;
        if is_reserved(value as u8) {
            return Err(Error::ReservedValue(token.to_string()));
        }
        Ok(Slot::Number(token.to_string()))
    }

    fn number(&self, value: usize) -> Result<Slot, Error> {
        let text = value.to_string();
        if value > u8::MAX as usize {
            return Err(Error::InvalidValue(text));
        }
        if is_reserved(value as u8) {
            return Err(Error::ReservedValue(text));
        }
        Ok(Slot::Number(text))
    }
}
