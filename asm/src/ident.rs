use indexmap::IndexMap;
use std::fmt;

use crate::error::Error;

/// Name under which the origin is exported.
pub const ORIGIN_SYMBOL: &str = "SPELL_ORIGIN";

/// Prefix separating label names from constants.
pub const LABEL_PREFIX: &str = "LABEL_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    pub name: String,
    pub value: String,
}

impl fmt::Display for Define {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#define {} {}", self.name, self.value)
    }
}

// name -> value as written; constants are not evaluated
#[derive(Debug, Default)]
pub struct Idents(IndexMap<String, String>);

pub fn label_key(label: &str) -> String {
    format!("{}{}", LABEL_PREFIX, label)
}

impl Idents {
    pub fn new() -> Self {
        Idents(IndexMap::new())
    }

    pub fn define_const(&mut self, name: &str, value: &str) -> Result<(), Error> {
        if self.0.contains_key(name) {
            return Err(Error::RedefinedConstant(name.to_string()));
        }
        self.0.insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn define_label(&mut self, label: &str, addr: usize) -> Result<(), Error> {
        let key = label_key(label);
        if self.0.contains_key(&key) {
            return Err(Error::RedefinedLabel(label.to_string()));
        }
        self.0.insert(key, addr.to_string());
        Ok(())
    }

    /// Rebinding keeps the first position in the table.
    pub fn set_origin(&mut self, origin: usize) {
        self.0.insert(ORIGIN_SYMBOL.to_string(), origin.to_string());
    }

    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn defines(&self) -> Vec<Define> {
        self.0
            .iter()
            .map(|(name, value)| Define {
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }
}
