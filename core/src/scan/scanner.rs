use std::iter::FusedIterator;
use std::str::CharIndices;

use super::token::{Literal, Token};

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// A value is required (document start or after a colon).
    Value,
    /// Inside an array after `[` or `,`.
    ValueOrEnd,
    /// Inside an object after `{` or `,`.
    KeyOrEnd,
    /// After a property name.
    Colon,
    /// After a complete value.
    Separator,
}

#[derive(Debug)]
struct SyntaxError;

type Step<T> = Result<T, SyntaxError>;

/// Forgiving forward-only scanner over JSON-like text.
///
/// Comments (`//`, `/* */`) and trailing commas are accepted. Any other
/// deviation ends the scan with a single [`Token::Error`] carrying the offset
/// of the last token read successfully; the scanner never panics on input.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    stack: Vec<Container>,
    state: State,
    emitted: bool,
    last_good: usize,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        let pos = if text.starts_with(BOM) { BOM.len_utf8() } else { 0 };
        Self {
            text,
            pos,
            stack: Vec::new(),
            state: State::Value,
            emitted: false,
            last_good: 0,
            finished: false,
        }
    }

    /// Current container nesting (0 at document level).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_trivia(&mut self) -> Step<()> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                let end = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += end;
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                let end = body.find("*/").ok_or(SyntaxError)?;
                self.pos += 2 + end + 2;
            } else {
                return Ok(());
            }
        }
    }

    fn after_value(&mut self) {
        self.state = State::Separator;
    }

    fn close(&mut self, kind: Container, start: usize) -> Step<Token> {
        if self.stack.last() != Some(&kind) {
            return Err(SyntaxError);
        }
        self.stack.pop();
        self.pos += 1;
        self.after_value();
        Ok(match kind {
            Container::Object => Token::ObjectEnd(start),
            Container::Array => Token::ArrayEnd(start),
        })
    }

    fn advance(&mut self) -> Step<Option<Token>> {
        loop {
            self.skip_trivia()?;
            let start = self.pos;

            let Some(b) = self.peek() else {
                let clean = self.stack.is_empty()
                    && (self.state == State::Separator || (self.state == State::Value && !self.emitted));
                return if clean { Ok(None) } else { Err(SyntaxError) };
            };

            match self.state {
                State::Separator => match (b, self.stack.last()) {
                    (b',', Some(Container::Object)) => {
                        self.pos += 1;
                        self.state = State::KeyOrEnd;
                    }
                    (b',', Some(Container::Array)) => {
                        self.pos += 1;
                        self.state = State::ValueOrEnd;
                    }
                    (b'}', _) => return self.close(Container::Object, start).map(Some),
                    (b']', _) => return self.close(Container::Array, start).map(Some),
                    _ => return Err(SyntaxError),
                },
                State::KeyOrEnd => match b {
                    b'}' => return self.close(Container::Object, start).map(Some),
                    b'"' => {
                        let name = self.read_string()?;
                        self.state = State::Colon;
                        return Ok(Some(Token::PropertyName(name, start)));
                    }
                    _ => return Err(SyntaxError),
                },
                State::Colon => {
                    if b != b':' {
                        return Err(SyntaxError);
                    }
                    self.pos += 1;
                    self.state = State::Value;
                }
                State::ValueOrEnd if b == b']' => {
                    return self.close(Container::Array, start).map(Some);
                }
                State::ValueOrEnd | State::Value => return self.read_value(b, start).map(Some),
            }
        }
    }

    fn read_value(&mut self, b: u8, start: usize) -> Step<Token> {
        match b {
            b'{' => {
                self.pos += 1;
                self.stack.push(Container::Object);
                self.state = State::KeyOrEnd;
                Ok(Token::ObjectStart(start))
            }
            b'[' => {
                self.pos += 1;
                self.stack.push(Container::Array);
                self.state = State::ValueOrEnd;
                Ok(Token::ArrayStart(start))
            }
            b'"' => {
                let s = self.read_string()?;
                self.after_value();
                Ok(Token::Literal(Literal::String(s), start))
            }
            b'-' | b'0'..=b'9' => {
                let n = self.read_number()?;
                self.after_value();
                Ok(Token::Literal(Literal::Number(n), start))
            }
            _ => {
                let lit = self.read_keyword()?;
                self.after_value();
                Ok(Token::Literal(lit, start))
            }
        }
    }

    fn read_keyword(&mut self) -> Step<Literal> {
        let rest = self.rest();
        let (lit, len) = if rest.starts_with("true") {
            (Literal::Bool(true), 4)
        } else if rest.starts_with("false") {
            (Literal::Bool(false), 5)
        } else if rest.starts_with("null") {
            (Literal::Null, 4)
        } else {
            return Err(SyntaxError);
        };

        let trailing = rest[len..].chars().next();
        if trailing.is_some_and(|c| c.is_alphanumeric() || c == '_') {
            return Err(SyntaxError);
        }
        self.pos += len;
        Ok(lit)
    }

    fn read_number(&mut self) -> Step<f64> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !matches!(c, '0'..='9' | '-' | '+' | '.' | 'e' | 'E'))
            .unwrap_or(rest.len());
        let value = rest[..len].parse::<f64>().map_err(|_| SyntaxError)?;
        self.pos += len;
        Ok(value)
    }

    fn read_string(&mut self) -> Step<String> {
        // Opening quote.
        self.pos += 1;
        let body = self.rest();
        let mut out = String::new();
        let mut chars = body.char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\\' => {
                    let (_, esc) = chars.next().ok_or(SyntaxError)?;
                    match esc {
                        '"' => out.push('"'),
                        '\\' => out.push('\\'),
                        '/' => out.push('/'),
                        'b' => out.push('\u{8}'),
                        'f' => out.push('\u{c}'),
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        'u' => out.push(read_unicode_escape(&mut chars)?),
                        _ => return Err(SyntaxError),
                    }
                }
                _ => out.push(c),
            }
        }

        Err(SyntaxError)
    }
}

fn read_hex4(chars: &mut CharIndices<'_>) -> Step<u32> {
    let mut code = 0u32;
    for _ in 0..4 {
        let (_, c) = chars.next().ok_or(SyntaxError)?;
        code = code * 16 + c.to_digit(16).ok_or(SyntaxError)?;
    }
    Ok(code)
}

/// Decodes the payload of a `\u` escape, joining surrogate pairs. Lone
/// surrogates decode to U+FFFD.
fn read_unicode_escape(chars: &mut CharIndices<'_>) -> Step<char> {
    let high = read_hex4(chars)?;
    if !(0xD800..0xDC00).contains(&high) {
        return Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    if !chars.as_str().starts_with("\\u") {
        return Ok(char::REPLACEMENT_CHARACTER);
    }
    chars.next();
    chars.next();

    let low = read_hex4(chars)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Ok(char::REPLACEMENT_CHARACTER);
    }
    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        match self.advance() {
            Ok(Some(token)) => {
                self.emitted = true;
                self.last_good = token.offset();
                Some(token)
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(SyntaxError) => {
                self.finished = true;
                Some(Token::Error(self.last_good))
            }
        }
    }
}

impl FusedIterator for Scanner<'_> {}

/// Convenience constructor for [`Scanner`].
pub fn scan(text: &str) -> Scanner<'_> {
    Scanner::new(text)
}
