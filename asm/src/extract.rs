use std::collections::HashMap;

use crate::assembler::Assembled;
use crate::code::{CodeLine, Slot};
use crate::error::Error;
use crate::ident::Define;
use crate::literal::{parse_literal, parse_numeral};

/// Materialize the program bytes, resolving label references.
pub fn extract_bytes(result: &Assembled) -> Result<Vec<u8>, Error> {
    let decoder = Decoder::new(&result.defines);
    result
        .code
        .iter()
        .filter_map(|line| match line {
            CodeLine::Byte { slot, .. } => Some((line, slot)),
            _ => None,
        })
        .map(|(line, slot)| {
            let value = match slot {
                Slot::Number(text) => parse_numeral(text),
                Slot::Symbol { value, .. } => decoder.resolve(value),
                Slot::Label(key) => decoder.lookup(key),
                Slot::Op(op) => Some(op.code() as u32),
                Slot::Stop => Some(arch::STOP_BYTE as u32),
                Slot::Pad => Some(0),
            };
            to_byte(value).ok_or_else(|| Error::InvalidEncoding(line.to_string()))
        })
        .collect()
}

fn to_byte(value: Option<u32>) -> Option<u8> {
    value.and_then(|v| u8::try_from(v).ok())
}

/// Reads rendered code lines back into bytes.
#[derive(Debug, Default)]
pub struct Decoder {
    table: HashMap<String, u32>,
}

impl Decoder {
    pub fn new(defines: &[Define]) -> Self {
        let table = defines
            .iter()
            .filter_map(|define| parse_literal(&define.value).map(|v| (define.name.clone(), v)))
            .collect();
        Decoder { table }
    }

    /// Build from the `#define NAME VALUE` lines of a listing.
    pub fn from_header(text: &str) -> Self {
        let defines: Vec<Define> = text
            .lines()
            .filter_map(|line| {
                let mut words = line.split_whitespace();
                match (words.next(), words.next(), words.next()) {
                    (Some("#define"), Some(name), Some(value)) => Some(Define {
                        name: name.to_string(),
                        value: value.to_string(),
                    }),
                    _ => None,
                }
            })
            .collect();
        Decoder::new(&defines)
    }

    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.table.get(name).copied()
    }

    /// A define name, a numeral or a character literal.
    pub fn resolve(&self, text: &str) -> Option<u32> {
        self.lookup(text).or_else(|| parse_literal(text))
    }

    /// Decode one rendered code line. Blank and comment lines give `None`.
    pub fn decode_line(&self, line: &str) -> Result<Option<u8>, Error> {
        let stripped = strip_comments(line);
        let bare = stripped.trim_end();
        let bare = bare.strip_suffix(',').unwrap_or(bare).trim();
        if bare.is_empty() {
            return Ok(None);
        }
        match to_byte(self.resolve(bare)) {
            Some(byte) => Ok(Some(byte)),
            None => Err(Error::InvalidEncoding(line.to_string())),
        }
    }

    /// Decode the array body of a whole listing, origin padding included.
    pub fn decode_listing(text: &str) -> Result<Vec<u8>, Error> {
        let decoder = Decoder::from_header(text);
        let mut bytes = vec![];
        let body = text
            .lines()
            .skip_while(|line| !line.trim_end().ends_with('{'))
            .skip(1)
            .take_while(|line| line.trim() != "};");
        for line in body {
            for element in split_elements(&strip_comments(line)) {
                match to_byte(decoder.resolve(element)) {
                    Some(byte) => bytes.push(byte),
                    None => return Err(Error::InvalidEncoding(line.to_string())),
                }
            }
        }
        Ok(bytes)
    }
}

fn strip_comments(line: &str) -> String {
    let mut out = String::new();
    let mut rest = line;
    loop {
        let block = rest.find("/*");
        let eol = rest.find("//");
        match (block, eol) {
            (Some(b), e) if e.map_or(true, |e| b < e) => {
                out.push_str(&rest[..b]);
                match rest[b + 2..].find("*/") {
                    Some(end) => rest = &rest[b + 2 + end + 2..],
                    None => return out,
                }
            }
            (_, Some(e)) => {
                out.push_str(&rest[..e]);
                return out;
            }
            _ => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

// Split on commas outside character literals
fn split_elements(text: &str) -> Vec<&str> {
    let mut elements = vec![];
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (idx, c) in text.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '\'' => quoted = !quoted,
            ',' if !quoted => {
                elements.push(text[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    elements.push(text[start..].trim());
    elements.into_iter().filter(|e| !e.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;

    fn defines(pairs: &[(&str, &str)]) -> Vec<Define> {
        pairs
            .iter()
            .map(|(name, value)| Define {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect()
    }

    macro_rules! test_decode {
        ($($name:ident: $line:expr => $byte:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let decoder = Decoder::new(&defines(&[("LABEL_Wait", "11"), ("LABEL_Top", "0")]));
                    assert_eq!(decoder.decode_line($line), Ok($byte));
                }
            )*
        }
    }

    test_decode! {
        test_decimal: "  127," => Some(127),
        test_hex_with_name: "0x3A /* DDRA */," => Some(58),
        test_comment_after: "0,       // null terminator" => Some(0),
        test_char: "'w'," => Some(119),
        test_char_comma: "',',   // delay" => Some(44),
        test_escaped_char: "'\\'',"  => Some(39),
        test_binary: "0b1010," => Some(10),
        test_define: "LABEL_Wait," => Some(11),
        test_zero_define: "LABEL_Top," => Some(0),
        test_comment_line: "// :Start" => None,
        test_blank_line: "  " => None,
        test_pad: "0 /* pad */," => Some(0),
    }

    #[test]
    fn test_decode_invalid() {
        let decoder = Decoder::default();
        assert_eq!(
            decoder.decode_line("LABEL_Nowhere,"),
            Err(Error::InvalidEncoding("LABEL_Nowhere,".to_string()))
        );
        assert_eq!(
            decoder.decode_line("300,"),
            Err(Error::InvalidEncoding("300,".to_string()))
        );
        assert_eq!(
            decoder.decode_line("aé,"),
            Err(Error::InvalidEncoding("aé,".to_string()))
        );
    }

    #[test]
    fn test_undefined_label() {
        let result = assemble("JMP @Nowhere").unwrap();
        assert_eq!(
            extract_bytes(&result),
            Err(Error::InvalidEncoding("LABEL_Nowhere,".to_string()))
        );
        assert_eq!(
            extract_bytes(&result).unwrap_err().to_string(),
            "Invalid C-SPL input: LABEL_Nowhere,"
        );
    }

    #[test]
    fn test_label_at_zero() {
        let result = assemble(".ORIGIN 0\n:Top\nDUP\nJMP @Top").unwrap();
        assert_eq!(extract_bytes(&result), Ok(vec![b'2', 0, b'=']));
    }

    #[test]
    fn test_forward_and_backward_reference() {
        let src = ".ORIGIN 0\n:Back\nJMP @Fwd\nJMP @Back\n:Fwd\nSLEEP";
        let bytes = extract_bytes(&assemble(src).unwrap()).unwrap();
        assert_eq!(bytes, vec![4, b'=', 0, b'=', b'z']);
    }

    #[test]
    fn test_constant_alias_and_char() {
        let src = "CONST B 5\nCONST A B\nCONST LETTER 'A'\nPUSH A\nPUSH LETTER";
        let bytes = extract_bytes(&assemble(src).unwrap()).unwrap();
        assert_eq!(bytes, vec![5, 65]);
    }

    #[test]
    fn test_constant_not_a_byte() {
        let result = assemble("CONST BIG 0x100\nPUSH BIG").unwrap();
        assert_eq!(
            extract_bytes(&result),
            Err(Error::InvalidEncoding("0x100 /* BIG */,".to_string()))
        );
    }

    #[test]
    fn test_stop_and_call() {
        let src = ".ORIGIN 0\nCALLX @Sub 1\nSTOP\n:Sub\nDUP";
        let bytes = extract_bytes(&assemble(src).unwrap()).unwrap();
        assert_eq!(bytes, vec![5, b'x', 6, b'=', 0, 0xFF, b'2']);
    }

    #[test]
    fn test_split_elements() {
        assert_eq!(split_elements("  0, 0, 0,"), vec!["0", "0", "0"]);
        assert_eq!(split_elements("',', '\\'',"), vec!["','", "'\\''"]);
    }

    #[test]
    fn test_strip_comments() {
        assert_eq!(strip_comments("0x36 /* A */,  // b"), "0x36 ,  ");
        assert_eq!(strip_comments("1, /* a */ /* b */"), "1,  ");
        assert_eq!(strip_comments("// :Start"), "");
    }
}
