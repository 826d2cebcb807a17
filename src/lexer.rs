use std::fmt;

use rust_decimal::Decimal;

use crate::error::ParseError;
use crate::value::parse_decimal;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Num(Decimal),
    Str(String),
    Char,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Tilde,
    Not,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Shl,
    Shr,
    Amp,
    AndAnd,
    Pipe,
    OrOr,
    Question,
    QuestionQuestion,
    Colon,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            TokenKind::Ident(s) => return write!(f, "identifier '{}'", s),
            TokenKind::Num(n) => return write!(f, "number {}", n),
            TokenKind::Str(_) => "string literal",
            TokenKind::Char => "character literal",
            TokenKind::Eof => "end of input",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Caret => "'^'",
            TokenKind::Tilde => "'~'",
            TokenKind::Not => "'!'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Shl => "'<<'",
            TokenKind::Shr => "'>>'",
            TokenKind::Amp => "'&'",
            TokenKind::AndAnd => "'&&'",
            TokenKind::Pipe => "'|'",
            TokenKind::OrOr => "'||'",
            TokenKind::Question => "'?'",
            TokenKind::QuestionQuestion => "'??'",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
        };
        f.write_str(sym)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    /// Byte offset of the token's first character.
    pub(crate) pos: usize,
}

pub(crate) struct Lexer<'a> {
    text: &'a str,
    src: &'a [u8],
    i: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(s: &'a str) -> Self {
        Self {
            text: s,
            src: s.as_bytes(),
            i: 0,
        }
    }

    /// Tokenizes the whole input. The last token is always `Eof`.
    pub(crate) fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut out = Vec::new();
        loop {
            let tok = self.next_token()?;
            let done = tok.kind == TokenKind::Eof;
            out.push(tok);
            if done {
                return Ok(out);
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.i).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.i + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let ch = self.src.get(self.i).copied();
        if ch.is_some() {
            self.i += 1;
        }
        ch
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.i += 1;
            } else {
                break;
            }
        }
    }

    /// Consumes `second` if it follows, choosing between a two- and a
    /// one-character token.
    fn pair(&mut self, second: u8, long: TokenKind, short: TokenKind) -> TokenKind {
        self.bump();
        if self.peek() == Some(second) {
            self.bump();
            long
        } else {
            short
        }
    }

    fn error(&self, pos: usize, message: impl Into<String>) -> ParseError {
        ParseError::new(pos, message)
    }

    pub(crate) fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_ws();
        let pos = self.i;
        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    pos,
                })
            }
        };
        let kind = match c {
            b'(' | b')' | b'[' | b']' | b',' | b':' | b'+' | b'-' | b'*' | b'/' | b'%' | b'^'
            | b'~' => {
                self.bump();
                match c {
                    b'(' => TokenKind::LParen,
                    b')' => TokenKind::RParen,
                    b'[' => TokenKind::LBracket,
                    b']' => TokenKind::RBracket,
                    b',' => TokenKind::Comma,
                    b':' => TokenKind::Colon,
                    b'+' => TokenKind::Plus,
                    b'-' => TokenKind::Minus,
                    b'*' => TokenKind::Star,
                    b'/' => TokenKind::Slash,
                    b'%' => TokenKind::Percent,
                    b'^' => TokenKind::Caret,
                    _ => TokenKind::Tilde,
                }
            }
            b'=' => {
                self.bump();
                if self.peek() == Some(b'=') {
                    self.bump();
                    TokenKind::EqEq
                } else {
                    return Err(self.error(pos, "assignment is not an expression; expected '=='"));
                }
            }
            b'!' => self.pair(b'=', TokenKind::NotEq, TokenKind::Not),
            b'&' => self.pair(b'&', TokenKind::AndAnd, TokenKind::Amp),
            b'|' => self.pair(b'|', TokenKind::OrOr, TokenKind::Pipe),
            b'?' => self.pair(b'?', TokenKind::QuestionQuestion, TokenKind::Question),
            b'<' => {
                self.bump();
                match self.peek() {
                    Some(b'=') => {
                        self.bump();
                        TokenKind::Le
                    }
                    Some(b'<') => {
                        self.bump();
                        TokenKind::Shl
                    }
                    _ => TokenKind::Lt,
                }
            }
            b'>' => {
                self.bump();
                match self.peek() {
                    Some(b'=') => {
                        self.bump();
                        TokenKind::Ge
                    }
                    Some(b'>') => {
                        self.bump();
                        TokenKind::Shr
                    }
                    _ => TokenKind::Gt,
                }
            }
            b'.' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => self.lex_number()?,
            b'.' => {
                self.bump();
                TokenKind::Dot
            }
            b'"' => self.lex_string()?,
            b'@' if self.peek_at(1) == Some(b'"') => self.lex_verbatim_string()?,
            b'\'' => self.lex_char()?,
            c if c.is_ascii_digit() => self.lex_number()?,
            _ => self.lex_ident()?,
        };
        Ok(Token { kind, pos })
    }

    fn lex_number(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.i;
        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x') | Some(b'X')) {
            return self.lex_hex();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.i += 1;
        }
        // A dot belongs to the number only when a digit follows; `1.x` is member access.
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) {
            self.i += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.i += 1;
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+') | Some(b'-')));
            if self.peek_at(1 + sign).is_some_and(|d| d.is_ascii_digit()) {
                self.i += 1 + sign;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.i += 1;
                }
            }
        }
        let end = self.i;
        self.skip_suffix(start)?;
        let s = &self.text[start..end];
        let v = parse_decimal(s)
            .ok_or_else(|| self.error(start, format!("numeric literal '{}' is out of range", s)))?;
        Ok(TokenKind::Num(v))
    }

    fn lex_hex(&mut self) -> Result<TokenKind, ParseError> {
        let text = self.text;
        let start = self.i;
        self.i += 2;
        let digits_start = self.i;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.i += 1;
        }
        let digits = &text[digits_start..self.i];
        if digits.is_empty() {
            return Err(self.error(start, "hexadecimal literal has no digits"));
        }
        self.skip_suffix(start)?;
        let v = u64::from_str_radix(digits, 16)
            .map_err(|e| self.error(start, format!("invalid hexadecimal literal: {}", e)))?;
        Ok(TokenKind::Num(Decimal::from(v)))
    }

    /// Accepts one C#-style type suffix (`1m`, `2.5d`, `3L`); the value stays decimal.
    fn skip_suffix(&mut self, start: usize) -> Result<(), ParseError> {
        if matches!(
            self.peek(),
            Some(b'm' | b'M' | b'd' | b'D' | b'f' | b'F' | b'l' | b'L' | b'u' | b'U')
        ) {
            self.i += 1;
        }
        if self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
        {
            return Err(self.error(
                start,
                format!("invalid numeric literal '{}'", self.word_from(start)),
            ));
        }
        Ok(())
    }

    fn word_from(&self, start: usize) -> &'a str {
        let text = self.text;
        let mut end = self.i;
        while self
            .src
            .get(end)
            .is_some_and(|c| c.is_ascii_alphanumeric() || *c == b'_' || *c == b'.')
        {
            end += 1;
        }
        &text[start..end]
    }

    fn lex_string(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.i;
        self.bump();
        let mut out = String::new();
        let mut seg = self.i;
        loop {
            match self.peek() {
                None | Some(b'\n') => return Err(self.error(start, "unterminated string literal")),
                Some(b'"') => {
                    out.push_str(&self.text[seg..self.i]);
                    self.bump();
                    return Ok(TokenKind::Str(out));
                }
                Some(b'\\') => {
                    out.push_str(&self.text[seg..self.i]);
                    out.push(self.escape()?);
                    seg = self.i;
                }
                Some(_) => self.i += 1,
            }
        }
    }

    fn lex_verbatim_string(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.i;
        self.i += 2;
        let mut out = String::new();
        let mut seg = self.i;
        loop {
            match self.peek() {
                None => return Err(self.error(start, "unterminated string literal")),
                Some(b'"') if self.peek_at(1) == Some(b'"') => {
                    out.push_str(&self.text[seg..=self.i]);
                    self.i += 2;
                    seg = self.i;
                }
                Some(b'"') => {
                    out.push_str(&self.text[seg..self.i]);
                    self.bump();
                    return Ok(TokenKind::Str(out));
                }
                Some(_) => self.i += 1,
            }
        }
    }

    fn lex_char(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.i;
        self.bump();
        match self.peek() {
            Some(b'\\') => {
                self.escape()?;
            }
            Some(b'\'') | Some(b'\n') | None => {
                return Err(self.error(start, "empty or unterminated character literal"))
            }
            Some(_) => {
                let len = self.text[self.i..].chars().next().map_or(1, char::len_utf8);
                self.i += len;
            }
        }
        if self.bump() != Some(b'\'') {
            return Err(self.error(start, "unterminated character literal"));
        }
        Ok(TokenKind::Char)
    }

    /// Reads a backslash escape, positioned on the backslash.
    fn escape(&mut self) -> Result<char, ParseError> {
        let pos = self.i;
        self.bump();
        let c = match self.bump() {
            Some(b'"') => '"',
            Some(b'\'') => '\'',
            Some(b'\\') => '\\',
            Some(b'0') => '\0',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            _ => return Err(self.error(pos, "invalid escape sequence")),
        };
        Ok(c)
    }

    fn lex_ident(&mut self) -> Result<TokenKind, ParseError> {
        let pos = self.i;
        // `@name` is a verbatim identifier.
        if self.peek() == Some(b'@') {
            self.i += 1;
        }
        let start = self.i;
        if self
            .peek()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == b'_')
        {
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
            {
                self.i += 1;
            }
        }
        if self.i == start {
            let ch = self.text[start..].chars().next().unwrap_or('@');
            return Err(self.error(pos, format!("unexpected character '{}'", ch)));
        }
        Ok(TokenKind::Ident(self.text[start..self.i].to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn two_character_operators() {
        assert_eq!(
            kinds("a<=b>=c==d!=e&&f||g??h<<i>>j"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Le,
                TokenKind::Ident("b".into()),
                TokenKind::Ge,
                TokenKind::Ident("c".into()),
                TokenKind::EqEq,
                TokenKind::Ident("d".into()),
                TokenKind::NotEq,
                TokenKind::Ident("e".into()),
                TokenKind::AndAnd,
                TokenKind::Ident("f".into()),
                TokenKind::OrOr,
                TokenKind::Ident("g".into()),
                TokenKind::QuestionQuestion,
                TokenKind::Ident("h".into()),
                TokenKind::Shl,
                TokenKind::Ident("i".into()),
                TokenKind::Shr,
                TokenKind::Ident("j".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn numbers_with_suffix_and_hex() {
        assert_eq!(
            kinds("1m 0x1F 2e3"),
            vec![
                TokenKind::Num(Decimal::ONE),
                TokenKind::Num(Decimal::from(31)),
                TokenKind::Num(Decimal::from(2000)),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn dot_after_integer_is_member_access() {
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::Num(Decimal::ONE),
                TokenKind::Dot,
                TokenKind::Ident("x".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\\c" @"x""y""#),
            vec![
                TokenKind::Str("a\"b\\c".into()),
                TokenKind::Str("x\"y".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn token_positions_are_byte_offsets() {
        let toks = Lexer::new("  ab + 1").tokenize().unwrap();
        let positions: Vec<usize> = toks.iter().map(|t| t.pos).collect();
        assert_eq!(positions, vec![2, 5, 7, 8]);
    }

    #[test]
    fn rejects_bad_input() {
        let err = Lexer::new("1 + #").tokenize().unwrap_err();
        assert_eq!(err.position, 4);
        assert!(Lexer::new("\"open").tokenize().is_err());
        assert!(Lexer::new("12abc").tokenize().is_err());
        assert!(Lexer::new("a = b").tokenize().is_err());
    }
}
