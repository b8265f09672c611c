/// Unsigned numeral: decimal, `0x` hex or `0b` binary.
pub fn parse_numeral(s: &str) -> Option<u32> {
    if let Some(num) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return parse_digits(num, 16);
    }
    if let Some(num) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        return parse_digits(num, 2);
    }
    parse_digits(s, 10)
}

/// Numeral, or a quoted character such as `'w'` or `'\''`.
pub fn parse_literal(s: &str) -> Option<u32> {
    parse_numeral(s).or_else(|| parse_char(s))
}

fn parse_digits(s: &str, radix: u32) -> Option<u32> {
    // from_str_radix alone would also take a leading `+`
    if s.is_empty() || !s.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(s, radix).ok()
}

fn parse_char(s: &str) -> Option<u32> {
    let inner = s.strip_prefix('\'')?.strip_suffix('\'')?;
    let inner = inner.strip_prefix('\\').unwrap_or(inner);
    let mut chars = inner.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c as u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeral() {
        assert_eq!(parse_numeral("0"), Some(0));
        assert_eq!(parse_numeral("250"), Some(250));
        assert_eq!(parse_numeral("0x3A"), Some(0x3A));
        assert_eq!(parse_numeral("0Xff"), Some(0xFF));
        assert_eq!(parse_numeral("0b101"), Some(5));
        assert_eq!(parse_numeral("00"), Some(0));
    }

    #[test]
    fn test_numeral_rejects() {
        assert_eq!(parse_numeral(""), None);
        assert_eq!(parse_numeral("+1"), None);
        assert_eq!(parse_numeral("-1"), None);
        assert_eq!(parse_numeral("12abc"), None);
        assert_eq!(parse_numeral("0x"), None);
        assert_eq!(parse_numeral("0b2"), None);
        assert_eq!(parse_numeral("PORTA"), None);
        assert_eq!(parse_numeral("aé"), None);
        assert_eq!(parse_numeral("0é"), None);
        assert_eq!(parse_numeral("0xé1"), None);
    }

    #[test]
    fn test_char_literal() {
        assert_eq!(parse_literal("'w'"), Some(119));
        assert_eq!(parse_literal("'2'"), Some(50));
        assert_eq!(parse_literal("'\\''"), Some(39));
        assert_eq!(parse_literal("'ab'"), None);
        assert_eq!(parse_literal("''"), None);
        assert_eq!(parse_literal("'"), None);
    }
}
