/// A scalar value read by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Structural event emitted by [`Scanner`](super::Scanner).
///
/// Every event carries the byte offset where the construct starts in the
/// scanned text. `Error` carries the offset of the last token that was read
/// successfully and is always the final event of a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    ObjectStart(usize),
    ObjectEnd(usize),
    ArrayStart(usize),
    ArrayEnd(usize),
    PropertyName(String, usize),
    Literal(Literal, usize),
    Error(usize),
}

impl Token {
    pub fn offset(&self) -> usize {
        match self {
            Token::ObjectStart(o)
            | Token::ObjectEnd(o)
            | Token::ArrayStart(o)
            | Token::ArrayEnd(o)
            | Token::PropertyName(_, o)
            | Token::Literal(_, o)
            | Token::Error(o) => *o,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Token::Error(_))
    }
}
