use arch::op::{Arity, Op};
use std::ops::RangeInclusive;

use crate::error::Error;

// ----------------------------------------------------------------------------
// Line

/// One source line with its trailing comment split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub raw: &'a str,
    pub body: &'a str,
    pub comment: Option<&'a str>,
}

impl<'a> Line<'a> {
    pub fn split(raw: &'a str) -> Line<'a> {
        let trimmed = raw.trim();
        let semi = trimmed.find(';').map(|idx| (idx, 1));
        let slash = trimmed.find("//").map(|idx| (idx, 2));
        let marker = match (semi, slash) {
            (Some(a), Some(b)) => Some(if a.0 < b.0 { a } else { b }),
            (a, b) => a.or(b),
        };

        match marker {
            Some((idx, len)) => {
                let comment = trimmed[idx + len..].trim();
                Line {
                    raw: trimmed,
                    body: trimmed[..idx].trim(),
                    comment: (!comment.is_empty()).then_some(comment),
                }
            }
            None => Line {
                raw: trimmed,
                body: trimmed,
                comment: None,
            },
        }
    }
}

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Label(String),
    Origin(String),
    Const(String, String),
    Push(String),
    Stop,
    Call {
        exchange: bool,
        target: String,
        padding: Option<String>,
    },
    Op(Op, Option<String>),
}

impl Stmt {
    /// Parse the comment-free body of a line. Blank bodies give `None`.
    pub fn parse(body: &str) -> Result<Option<Stmt>, Error> {
        let words: Vec<&str> = body.split_whitespace().collect();
        let Some((head, args)) = words.split_first() else {
            return Ok(None);
        };

        // :label
        if let Some(label) = head.strip_prefix(':') {
            if label.is_empty() {
                return Err(Error::UnknownCommand(head.to_string()));
            }
            return Ok(Some(Stmt::Label(label.to_string())));
        }

        let cmd = head.to_ascii_uppercase();
        let arg = |idx: usize| args[idx].to_string();
        let stmt = match cmd.as_str() {
            ".ORIGIN" => {
                expect_args(&cmd, args, 1..=1)?;
                Stmt::Origin(arg(0))
            }
            "CONST" => {
                expect_args(&cmd, args, 2..=2)?;
                Stmt::Const(arg(0), arg(1))
            }
            "PUSH" => {
                expect_args(&cmd, args, 1..=1)?;
                Stmt::Push(arg(0))
            }
            "STOP" => {
                if !args.is_empty() {
                    return Err(Error::TooManyArguments(cmd.clone()));
                }
                Stmt::Stop
            }
            "CALL1" | "CALLX" => {
                expect_args(&cmd, args, 1..=2)?;
                Stmt::Call {
                    exchange: cmd == "CALLX",
                    target: arg(0),
                    padding: args.get(1).map(|s| s.to_string()),
                }
            }
            _ => {
                let op = Op::parse(&cmd).map_err(|_| Error::UnknownCommand(cmd.clone()))?;
                let max = match op.arity() {
                    Arity::None => 0,
                    Arity::Optional => 1,
                };
                if args.len() > max {
                    return Err(Error::TooManyArguments(cmd.clone()));
                }
                Stmt::Op(op, args.first().map(|s| s.to_string()))
            }
        };
        Ok(Some(stmt))
    }
}

fn expect_args(cmd: &str, args: &[&str], count: RangeInclusive<usize>) -> Result<(), Error> {
    if count.contains(&args.len()) {
        Ok(())
    } else {
        Err(Error::ArgumentCount(cmd.to_string()))
    }
}
