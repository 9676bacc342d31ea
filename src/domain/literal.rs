// SPDX-License-Identifier: MIT OR Apache-2.0

//! Safe literal grammar for structured settings.
//!
//! Structured settings arrive as strings such as
//! `[(10, "mx1.example.com"), (20, "mx2.example.com")]`. This module parses
//! them into a [`Literal`] tree and converts the tree into the Rust type a
//! setting declares via [`FromLiteral`]. The grammar only describes data:
//! strings, numbers, booleans, `None`, lists and tuples. Nothing is evaluated.

use crate::domain::errors::{ConfigError, Result};
use std::fmt::{self, Write as _};

/// Nesting limit for lists and tuples.
const MAX_DEPTH: usize = 64;

/// A parsed literal value.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// `None`
    None,
    /// `True` / `False`
    Bool(bool),
    /// An integer such as `25` or `-1`
    Int(i64),
    /// A float such as `5.5` or `1e3`
    Float(f64),
    /// A single- or double-quoted string
    Str(String),
    /// `[a, b, ...]`
    List(Vec<Literal>),
    /// `(a, b, ...)`
    Tuple(Vec<Literal>),
}

impl Literal {
    /// Parses `input` with the literal grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use aliascfg::domain::literal::Literal;
    ///
    /// let value = Literal::parse(r#"[(10, "mx1.example.com")]"#).unwrap();
    /// assert_eq!(
    ///     value,
    ///     Literal::List(vec![Literal::Tuple(vec![
    ///         Literal::Int(10),
    ///         Literal::Str("mx1.example.com".to_string()),
    ///     ])])
    /// );
    /// ```
    pub fn parse(input: &str) -> Result<Literal> {
        let mut parser = Parser::new(input);
        parser.skip_whitespace();
        let value = parser.value()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(value),
            Some(ch) => Err(parser.error(format!("unexpected trailing character {ch:?}"))),
        }
    }

    /// Truthiness of the value: zero, empty containers, `False` and `None` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Literal::None => false,
            Literal::Bool(b) => *b,
            Literal::Int(i) => *i != 0,
            Literal::Float(f) => *f != 0.0,
            Literal::Str(s) => !s.is_empty(),
            Literal::List(items) | Literal::Tuple(items) => !items.is_empty(),
        }
    }

    /// Short name of the variant, used in conversion diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::None => "None",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "str",
            Literal::List(_) => "list",
            Literal::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Literal]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Literal::None => write!(f, "None"),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{x:?}"),
            Literal::Str(s) => write_quoted(f, s),
            Literal::List(items) => {
                write!(f, "[")?;
                join(f, items)?;
                write!(f, "]")
            }
            Literal::Tuple(items) => {
                write!(f, "(")?;
                join(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Writes `s` double-quoted, using only escapes the grammar reads back.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\0' => f.write_str("\\0")?,
            ch => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}

/// Conversion from a parsed [`Literal`] into a declared setting type.
pub trait FromLiteral: Sized {
    /// Human-readable description of the accepted shape.
    fn expected() -> String;

    /// Converts the literal, or returns `None` when its shape does not match.
    fn from_literal(literal: Literal) -> Option<Self>;
}

impl FromLiteral for Literal {
    fn expected() -> String {
        "any literal".to_string()
    }

    fn from_literal(literal: Literal) -> Option<Self> {
        Some(literal)
    }
}

impl FromLiteral for String {
    fn expected() -> String {
        "str".to_string()
    }

    fn from_literal(literal: Literal) -> Option<Self> {
        match literal {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl FromLiteral for i64 {
    fn expected() -> String {
        "int".to_string()
    }

    fn from_literal(literal: Literal) -> Option<Self> {
        match literal {
            Literal::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl FromLiteral for f64 {
    fn expected() -> String {
        "float".to_string()
    }

    fn from_literal(literal: Literal) -> Option<Self> {
        match literal {
            Literal::Float(x) => Some(x),
            Literal::Int(i) => Some(i as f64),
            _ => None,
        }
    }
}

impl FromLiteral for bool {
    fn expected() -> String {
        "bool".to_string()
    }

    fn from_literal(literal: Literal) -> Option<Self> {
        match literal {
            Literal::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl<T: FromLiteral> FromLiteral for Vec<T> {
    fn expected() -> String {
        format!("list of {}", T::expected())
    }

    fn from_literal(literal: Literal) -> Option<Self> {
        match literal {
            Literal::List(items) | Literal::Tuple(items) => {
                items.into_iter().map(T::from_literal).collect()
            }
            _ => None,
        }
    }
}

impl<A: FromLiteral, B: FromLiteral> FromLiteral for (A, B) {
    fn expected() -> String {
        format!("({}, {})", A::expected(), B::expected())
    }

    fn from_literal(literal: Literal) -> Option<Self> {
        match literal {
            Literal::Tuple(items) | Literal::List(items) if items.len() == 2 => {
                let mut items = items.into_iter();
                let a = A::from_literal(items.next()?)?;
                let b = B::from_literal(items.next()?)?;
                Some((a, b))
            }
            _ => None,
        }
    }
}

/// Parses `input` and converts it into `T`.
///
/// A grammar error and a shape mismatch are both reported as
/// [`ConfigError::ParseError`].
pub fn parse_as<T: FromLiteral>(input: &str) -> Result<T> {
    let literal = Literal::parse(input)?;
    let kind = literal.kind();
    T::from_literal(literal).ok_or_else(|| ConfigError::ParseError {
        message: format!("expected {}, found {}", T::expected(), kind),
        source: None,
    })
}

/// Parses `input`, reporting a failure as a warning instead of an error.
///
/// Malformed structured settings degrade to their default rather than stopping
/// the process, so the caller only learns that nothing usable was found.
pub fn parse_lenient(input: &str) -> Option<Literal> {
    match Literal::parse(input) {
        Ok(literal) => Some(literal),
        Err(e) => {
            tracing::warn!(raw = input, error = %e, "Failed to parse literal expression");
            None
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            depth: 0,
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

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::ParseError {
            message: format!("{} at position {}", message.into(), self.pos),
            source: None,
        }
    }

    fn value(&mut self) -> Result<Literal> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('[') => {
                let (items, _) = self.sequence('[', ']')?;
                Ok(Literal::List(items))
            }
            Some('(') => {
                let (mut items, trailing_comma) = self.sequence('(', ')')?;
                // `(x)` only groups; a tuple of one needs the comma.
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Literal::Tuple(items))
                }
            }
            Some(quote @ ('\'' | '"')) => self.string(quote).map(Literal::Str),
            Some(ch) if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.') => self.number(),
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.name(),
            Some(ch) => Err(self.error(format!("unexpected character {ch:?}"))),
        }
    }

    /// Parses a delimited, comma-separated sequence. The flag reports whether
    /// the last element was followed by a comma.
    fn sequence(&mut self, open: char, close: char) -> Result<(Vec<Literal>, bool)> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        debug_assert_eq!(self.peek(), Some(open));
        self.pos += 1;

        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.pos += 1;
                break;
            }
            items.push(self.value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => trailing_comma = true,
                Some(ch) if ch == close => {
                    trailing_comma = false;
                    break;
                }
                Some(ch) => {
                    self.pos -= 1;
                    return Err(self.error(format!("expected ',' or {close:?}, found {ch:?}")));
                }
                None => return Err(self.error(format!("unterminated sequence, missing {close:?}"))),
            }
        }

        self.depth -= 1;
        Ok((items, trailing_comma))
    }

    fn string(&mut self, quote: char) -> Result<String> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(ch) if ch == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    None => return Err(self.error("unterminated string")),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('0') => out.push('\0'),
                    Some(ch @ ('\\' | '\'' | '"')) => out.push(ch),
                    Some(ch) => {
                        out.push('\\');
                        out.push(ch);
                    }
                },
                Some(ch) => out.push(ch),
            }
        }
    }

    fn number(&mut self) -> Result<Literal> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.pos += 1;
        }
        while let Some(ch) = self.peek() {
            let after_exponent = matches!(self.chars.get(self.pos.wrapping_sub(1)), Some('e' | 'E'));
            if ch.is_ascii_digit()
                || matches!(ch, '.' | '_' | 'e' | 'E')
                || (after_exponent && matches!(ch, '-' | '+'))
            {
                self.pos += 1;
            } else {
                break;
            }
        }

        let text: String = self.chars[start..self.pos]
            .iter()
            .filter(|ch| **ch != '_')
            .collect();
        let is_float = text.contains(['.', 'e', 'E']);
        let parsed = if is_float {
            // overflow to infinity has no literal spelling
            text.parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(Literal::Float)
        } else {
            text.parse::<i64>().ok().map(Literal::Int)
        };
        parsed.ok_or_else(|| {
            ConfigError::ParseError {
                message: format!("invalid number {text:?} at position {start}"),
                source: None,
            }
        })
    }

    fn name(&mut self) -> Result<Literal> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_alphanumeric() || ch == '_')
        {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        match name.as_str() {
            "True" | "true" => Ok(Literal::Bool(true)),
            "False" | "false" => Ok(Literal::Bool(false)),
            "None" => Ok(Literal::None),
            _ => Err(ConfigError::ParseError {
                message: format!("names are not literals: {name:?} at position {start}"),
                source: None,
            }),
        }
    }
}
