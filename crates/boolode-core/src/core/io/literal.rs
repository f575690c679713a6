//! Parser for the list literals found inside BoolODE's tab-separated inputs.
//!
//! Cells such as `['g1', 'g2']` or `[1, 0.5]` are written by Python tooling and read
//! back with `ast.literal_eval`. Only the subset that occurs in practice is accepted:
//! strings, integers, floats, booleans, `None`, and (possibly nested) lists or tuples.

use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    List(Vec<Literal>),
}

impl Literal {
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "boolean",
            Literal::None => "None",
            Literal::List(_) => "list",
        }
    }

    /// Numeric view of the literal; booleans count as 0 and 1 like in Python.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(i) => Some(*i as f64),
            Literal::Float(f) => Some(*f),
            Literal::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LiteralError {
    #[error("Unexpected end of literal")]
    UnexpectedEnd,
    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("Unterminated string starting at position {pos}")]
    UnterminatedString { pos: usize },
    #[error("Invalid number '{text}' at position {pos}")]
    InvalidNumber { text: String, pos: usize },
    #[error("Unknown name '{name}' at position {pos}")]
    UnknownName { name: String, pos: usize },
    #[error("Trailing input at position {pos}")]
    TrailingInput { pos: usize },
    #[error("Expected a list, found {found}")]
    ExpectedList { found: &'static str },
    #[error("Element {index} is a {found}, expected a {expected}")]
    ElementType {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

/// Parses one complete literal; surrounding whitespace is ignored.
pub fn parse_literal(text: &str) -> Result<Literal, LiteralError> {
    let mut parser = Parser {
        chars: text.char_indices().peekable(),
    };
    let value = parser.value()?;
    parser.skip_whitespace();
    match parser.chars.peek() {
        Some(&(pos, _)) => Err(LiteralError::TrailingInput { pos }),
        None => Ok(value),
    }
}

/// Parses a list literal whose elements are all strings.
pub fn parse_string_list(text: &str) -> Result<Vec<String>, LiteralError> {
    expect_list(parse_literal(text)?)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Literal::Str(s) => Ok(s),
            other => Err(LiteralError::ElementType {
                index,
                expected: "string",
                found: other.kind(),
            }),
        })
        .collect()
}

/// Parses a list literal whose elements are all numeric.
pub fn parse_number_list(text: &str) -> Result<Vec<f64>, LiteralError> {
    expect_list(parse_literal(text)?)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_f64().ok_or(LiteralError::ElementType {
                index,
                expected: "number",
                found: item.kind(),
            })
        })
        .collect()
}

fn expect_list(literal: Literal) -> Result<Vec<Literal>, LiteralError> {
    match literal {
        Literal::List(items) => Ok(items),
        other => Err(LiteralError::ExpectedList {
            found: other.kind(),
        }),
    }
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_whitespace();
        let &(pos, ch) = self.chars.peek().ok_or(LiteralError::UnexpectedEnd)?;
        match ch {
            '[' => self.sequence(']'),
            '(' => self.sequence(')'),
            '\'' | '"' => self.string(),
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.number(),
            c if c.is_ascii_alphabetic() => self.name(),
            _ => Err(LiteralError::UnexpectedChar { ch, pos }),
        }
    }

    fn sequence(&mut self, close: char) -> Result<Literal, LiteralError> {
        self.chars.next();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some(&(_, c)) if c == close => {
                    self.chars.next();
                    return Ok(Literal::List(items));
                }
                Some(_) => {}
            }

            items.push(self.value()?);

            self.skip_whitespace();
            match self.chars.next() {
                Some((_, ',')) => continue,
                Some((_, c)) if c == close => return Ok(Literal::List(items)),
                Some((pos, ch)) => return Err(LiteralError::UnexpectedChar { ch, pos }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn string(&mut self) -> Result<Literal, LiteralError> {
        let (start, quote) = self.chars.next().ok_or(LiteralError::UnexpectedEnd)?;
        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(LiteralError::UnterminatedString { pos: start }),
                Some((_, c)) if c == quote => return Ok(Literal::Str(out)),
                Some((_, '\\')) => match self.chars.next() {
                    None => return Err(LiteralError::UnterminatedString { pos: start }),
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, c)) => out.push(c),
                },
                Some((_, c)) => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Literal, LiteralError> {
        let pos = self.chars.peek().map(|&(p, _)| p).unwrap_or_default();
        let mut text = String::new();
        let mut is_float = false;
        while let Some((_, c)) = self.chars.next_if(|&(_, c)| {
            c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_')
        }) {
            if matches!(c, '.' | 'e' | 'E') {
                is_float = true;
            }
            if c != '_' {
                text.push(c);
            }
        }

        let invalid = || LiteralError::InvalidNumber {
            text: text.clone(),
            pos,
        };
        if is_float {
            text.parse::<f64>().map(Literal::Float).map_err(|_| invalid())
        } else {
            text.parse::<i64>().map(Literal::Int).map_err(|_| invalid())
        }
    }

    fn name(&mut self) -> Result<Literal, LiteralError> {
        let pos = self.chars.peek().map(|&(p, _)| p).unwrap_or_default();
        let mut name = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|&(_, c)| c.is_ascii_alphanumeric() || c == '_')
        {
            name.push(c);
        }
        match name.as_str() {
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            "None" => Ok(Literal::None),
            _ => Err(LiteralError::UnknownName { name, pos }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_lists_with_either_quote() {
        assert_eq!(
            parse_string_list(r#"['g1', "g2",'g3']"#).unwrap(),
            vec!["g1", "g2", "g3"]
        );
    }

    #[test]
    fn parses_number_lists_with_mixed_forms() {
        assert_eq!(
            parse_number_list("[1, 0.5, -2e-1, +3, True, .25]").unwrap(),
            vec![1.0, 0.5, -0.2, 3.0, 1.0, 0.25]
        );
    }

    #[test]
    fn accepts_tuples_trailing_commas_and_whitespace() {
        assert_eq!(
            parse_number_list("  ( 1 ,\n 2 , )  ").unwrap(),
            vec![1.0, 2.0]
        );
        assert_eq!(parse_string_list("[]").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn parses_nested_lists_and_escapes() {
        let value = parse_literal(r#"[['a\'b'], None, [1, [2]]]"#).unwrap();
        assert_eq!(
            value,
            Literal::List(vec![
                Literal::List(vec![Literal::Str("a'b".to_string())]),
                Literal::None,
                Literal::List(vec![
                    Literal::Int(1),
                    Literal::List(vec![Literal::Int(2)])
                ]),
            ])
        );
    }

    #[test]
    fn reports_element_type_mismatch() {
        assert_eq!(
            parse_number_list("[1, 'x']"),
            Err(LiteralError::ElementType {
                index: 1,
                expected: "number",
                found: "string"
            })
        );
        assert_eq!(
            parse_string_list("['a', 2]"),
            Err(LiteralError::ElementType {
                index: 1,
                expected: "string",
                found: "integer"
            })
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_literal("[1, 2"), Err(LiteralError::UnexpectedEnd));
        assert_eq!(
            parse_literal("'abc"),
            Err(LiteralError::UnterminatedString { pos: 0 })
        );
        assert_eq!(
            parse_literal("[1] x"),
            Err(LiteralError::TrailingInput { pos: 4 })
        );
        assert_eq!(
            parse_literal("[1;2]"),
            Err(LiteralError::UnexpectedChar { ch: ';', pos: 2 })
        );
        assert!(matches!(
            parse_literal("[1.2.3]"),
            Err(LiteralError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_literal("[nan]"),
            Err(LiteralError::UnknownName { .. })
        ));
        assert_eq!(
            parse_string_list("'g1'"),
            Err(LiteralError::ExpectedList { found: "string" })
        );
    }
}
