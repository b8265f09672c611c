use arch::PROGRAM_SIZE;

use crate::assembler::Assembled;
use crate::code::CodeLine;
use crate::error::Error;
use crate::extract::extract_bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// JSON array of byte values
    Bytes,
    /// C source with the program array
    #[default]
    C,
    /// Symbol definitions only
    Defines,
    /// Space separated hex bytes
    Hex,
}

impl Format {
    pub fn render(self, result: &Assembled) -> Result<String, Error> {
        match self {
            Format::Bytes => render_bytes(result),
            Format::C => Ok(render_listing(result)),
            Format::Defines => Ok(render_defines(result)),
            Format::Hex => render_hex(result),
        }
    }
}

pub fn render_defines(result: &Assembled) -> String {
    result
        .defines
        .iter()
        .map(|define| define.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_listing(result: &Assembled) -> String {
    let mut lines: Vec<String> = result
        .code
        .iter()
        .map(|line| match line {
            CodeLine::Comment(_) | CodeLine::Label(_) => line.to_string(),
            _ => format!("  {}", line),
        })
        .skip_while(|line| line.trim().is_empty())
        .collect();
    if result.origin > 0 {
        lines.insert(0, format!("  {}", "0, ".repeat(result.origin).trim_end()));
    }

    format!(
        "{}\n\nuint8_t program[{}] = {{\n{}\n}};\n",
        render_defines(result),
        PROGRAM_SIZE,
        lines.join("\n")
    )
}

pub fn render_hex(result: &Assembled) -> Result<String, Error> {
    Ok(extract_bytes(result)?
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(" "))
}

pub fn render_bytes(result: &Assembled) -> Result<String, Error> {
    Ok(serde_json::Value::from(extract_bytes(result)?).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;

    #[test]
    fn test_listing_origin_padding() {
        let result = assemble(".ORIGIN 3\nDUP").unwrap();
        assert_eq!(
            render_listing(&result),
            "#define SPELL_ORIGIN 3\n\nuint8_t program[256] = {\n  0, 0, 0,\n  '2',\n};\n"
        );
    }

    #[test]
    fn test_listing_drops_leading_blanks() {
        let result = assemble(".ORIGIN 0\n\n\n; hello\n\nDUP").unwrap();
        assert_eq!(
            render_listing(&result),
            "#define SPELL_ORIGIN 0\n\nuint8_t program[256] = {\n// hello\n  \n  '2',\n};\n"
        );
    }

    #[test]
    fn test_listing_empty_program() {
        let result = assemble(".ORIGIN 0").unwrap();
        assert_eq!(
            render_listing(&result),
            "#define SPELL_ORIGIN 0\n\nuint8_t program[256] = {\n\n};\n"
        );
    }

    #[test]
    fn test_hex() {
        let result = assemble(".ORIGIN 0\nPUSH 10\nWRITE 0x3A\nSTOP").unwrap();
        assert_eq!(render_hex(&result), Ok("0a 3a 77 ff".to_string()));
    }

    #[test]
    fn test_bytes() {
        let result = assemble("ADD 10").unwrap();
        assert_eq!(render_bytes(&result), Ok("[10,43]".to_string()));
    }

    #[test]
    fn test_format_render() {
        let result = assemble("CONST A 1\nPUSH A").unwrap();
        assert_eq!(Format::Defines.render(&result), Ok("#define A 1".to_string()));
        assert_eq!(Format::Hex.render(&result), Ok("01".to_string()));
        assert_eq!(Format::default(), Format::C);
    }

    #[test]
    fn test_format_propagates_extraction_error() {
        let result = assemble("LOOP @Missing").unwrap();
        assert_eq!(
            Format::Bytes.render(&result),
            Err(Error::InvalidEncoding("LABEL_Missing,".to_string()))
        );
        assert!(Format::C.render(&result).is_ok());
    }
}
