//! Parser for list literals in the loose syntax text backends produce.
//!
//! Accepts a single bracketed list of single- or double-quoted strings,
//! numbers and the bare words `True`, `False`, `None`, `true`, `false` and
//! `null`, with an optional trailing comma. Text is only parsed, never
//! evaluated.

/// Parse `text` as a list literal; `None` unless the whole input is one list.
pub fn parse_list_literal(text: &str) -> Option<Vec<String>> {
    let mut parser = LiteralParser::new(text);
    let items = parser.list()?;
    parser.skip_whitespace();
    parser.at_end().then_some(items)
}

struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
}

impl LiteralParser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Option<()> {
        self.skip_whitespace();
        (self.bump()? == expected).then_some(())
    }

    fn list(&mut self) -> Option<Vec<String>> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek()? == ']' {
                self.pos += 1;
                return Some(items);
            }

            items.push(self.item()?);

            self.skip_whitespace();
            match self.bump()? {
                ',' => continue,
                ']' => return Some(items),
                _ => return None,
            }
        }
    }

    fn item(&mut self) -> Option<String> {
        match self.peek()? {
            '"' | '\'' => self.string(),
            c if c == '-' || c == '+' || c.is_ascii_digit() => self.number(),
            c if c.is_ascii_alphabetic() => self.word(),
            _ => None,
        }
    }

    fn string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();

        loop {
            match self.bump()? {
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '0' => out.push('\0'),
                    'u' => out.push(self.unicode_escape()?),
                    c @ ('\\' | '\'' | '"' | '/') => out.push(c),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                c if c == quote => return Some(out),
                '\n' => return None,
                c => out.push(c),
            }
        }
    }

    /// Four hex digits after `\u`
    fn unicode_escape(&mut self) -> Option<char> {
        let hex: String = (0..4).map(|_| self.bump()).collect::<Option<_>>()?;
        char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
    }

    fn number(&mut self) -> Option<String> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.pos += 1;
        }
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_'))
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.replace('_', "").parse::<f64>().ok().map(|_| text)
    }

    fn word(&mut self) -> Option<String> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" | "False" | "None" | "true" | "false" | "null" => Some(word),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quoted_list() {
        assert_eq!(
            parse_list_literal("['a', \"b\",]"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_escapes_and_scalars() {
        assert_eq!(
            parse_list_literal(r#"['it\'s', 42, None]"#),
            Some(vec!["it's".to_string(), "42".to_string(), "None".to_string()])
        );
    }

    #[test]
    fn test_rejects_trailing_text_and_expressions() {
        assert_eq!(parse_list_literal("['a'] and more"), None);
        assert_eq!(parse_list_literal("[__import__('os')]"), None);
        assert_eq!(parse_list_literal("['unterminated]"), None);
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(
            parse_list_literal(r"['caf\u00e9', 'x']"),
            Some(vec!["café".to_string(), "x".to_string()])
        );
        assert_eq!(parse_list_literal(r"['\uzzzz']"), None);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(parse_list_literal("  [ ]  "), Some(vec![]));
    }
}
