//! Constant values embedded in widget definitions.
//!
//! Chooser choices and input box values are written as literal lists such as
//! `"red" "green" 3 [1 2]`. The widget grammar interprets them through a
//! [`LiteralEvaluator`] handed to it at construction time.

use crate::error::{FormatError, FormatResult};
use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    String(String),
    Boolean(bool),
    List(Vec<Literal>),
    Nobody,
}

impl Literal {
    /// Source text that reads back as this literal
    pub fn to_source(&self) -> String {
        match self {
            Literal::Number(n) => n.to_string(),
            Literal::String(s) => format!("\"{}\"", escape(s)),
            Literal::Boolean(b) => b.to_string(),
            Literal::Nobody => "nobody".to_string(),
            Literal::List(items) => {
                let inner: Vec<String> = items.iter().map(Literal::to_source).collect();
                format!("[{}]", inner.join(" "))
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}

/// Interprets constant expressions found inside widgets
pub trait LiteralEvaluator: Send + Sync {
    /// Read exactly one literal
    fn read_literal(&self, text: &str) -> FormatResult<Literal> {
        let mut literals = self.read_literals(text)?;
        match literals.len() {
            1 => Ok(literals.remove(0)),
            0 => Err(FormatError::invalid_literal(0, "expected a literal")),
            n => Err(FormatError::invalid_literal(
                0,
                format!("expected one literal, found {}", n),
            )),
        }
    }

    /// Read a whitespace separated sequence of literals
    fn read_literals(&self, text: &str) -> FormatResult<Vec<Literal>>;
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token<'src> {
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("true", ignore(ascii_case))]
    True,

    #[token("false", ignore(ascii_case))]
    False,

    #[token("nobody", ignore(ascii_case))]
    Nobody,

    #[regex(r"-?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    String(&'src str),
}

/// Reads numbers, strings, booleans, `nobody` and bracketed lists
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLiteralEvaluator;

impl LiteralEvaluator for StandardLiteralEvaluator {
    fn read_literals(&self, text: &str) -> FormatResult<Vec<Literal>> {
        let tokens = tokenize(text)?;
        let mut reader = LiteralReader {
            tokens: &tokens,
            pos: 0,
            end: text.len(),
        };

        let mut literals = Vec::new();
        while !reader.at_end() {
            literals.push(reader.literal()?);
        }
        Ok(literals)
    }
}

fn tokenize(text: &str) -> FormatResult<Vec<(Token<'_>, usize)>> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let start = lexer.span().start;
        match result {
            Ok(token) => tokens.push((token, start)),
            Err(()) => {
                return Err(FormatError::invalid_literal(
                    start,
                    format!("unexpected '{}'", lexer.slice()),
                ))
            }
        }
    }
    Ok(tokens)
}

struct LiteralReader<'a, 'src> {
    tokens: &'a [(Token<'src>, usize)],
    pos: usize,
    end: usize,
}

impl LiteralReader<'_, '_> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map(|(_, at)| *at).unwrap_or(self.end)
    }

    fn literal(&mut self) -> FormatResult<Literal> {
        let offset = self.offset();
        let Some((token, _)) = self.tokens.get(self.pos) else {
            return Err(FormatError::invalid_literal(offset, "unexpected end of input"));
        };
        self.pos += 1;

        match token {
            Token::True => Ok(Literal::Boolean(true)),
            Token::False => Ok(Literal::Boolean(false)),
            Token::Nobody => Ok(Literal::Nobody),
            Token::Number(text) => text
                .parse::<f64>()
                .map(Literal::Number)
                .map_err(|e| FormatError::invalid_literal(offset, e.to_string())),
            Token::String(text) => unescape(&text[1..text.len() - 1])
                .map(Literal::String)
                .map_err(|message| FormatError::invalid_literal(offset, message)),
            Token::LBracket => {
                let mut items = Vec::new();
                loop {
                    match self.tokens.get(self.pos) {
                        Some((Token::RBracket, _)) => {
                            self.pos += 1;
                            return Ok(Literal::List(items));
                        }
                        Some(_) => items.push(self.literal()?),
                        None => {
                            return Err(FormatError::invalid_literal(self.end, "unclosed list"))
                        }
                    }
                }
            }
            Token::RBracket => Err(FormatError::invalid_literal(offset, "unexpected ']'")),
        }
    }
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some(other) => return Err(format!("invalid escape '\\{}'", other)),
            None => return Err("dangling escape".to_string()),
        }
    }
    Ok(result)
}

fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            other => result.push(other),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_chooser_choices() {
        let literals = StandardLiteralEvaluator
            .read_literals(r#""red" "green" 3 -0.5 true"#)
            .unwrap();
        assert_eq!(
            literals,
            vec![
                Literal::String("red".to_string()),
                Literal::String("green".to_string()),
                Literal::Number(3.0),
                Literal::Number(-0.5),
                Literal::Boolean(true),
            ]
        );
    }

    #[test]
    fn test_read_nested_list() {
        let literal = StandardLiteralEvaluator.read_literal("[1 [2 \"x\"] nobody]").unwrap();
        assert_eq!(
            literal,
            Literal::List(vec![
                Literal::Number(1.0),
                Literal::List(vec![Literal::Number(2.0), Literal::String("x".to_string())]),
                Literal::Nobody,
            ])
        );
    }

    #[test]
    fn test_string_escapes() {
        let literal = StandardLiteralEvaluator
            .read_literal(r#""say \"hi\"\n""#)
            .unwrap();
        assert_eq!(literal, Literal::String("say \"hi\"\n".to_string()));
        assert_eq!(literal.to_source(), r#""say \"hi\"\n""#);
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let literals = StandardLiteralEvaluator.read_literals("TRUE False NOBODY").unwrap();
        assert_eq!(
            literals,
            vec![Literal::Boolean(true), Literal::Boolean(false), Literal::Nobody]
        );
    }

    #[test]
    fn test_errors() {
        assert!(StandardLiteralEvaluator.read_literals("[1 2").is_err());
        assert!(StandardLiteralEvaluator.read_literals("]").is_err());
        assert!(StandardLiteralEvaluator.read_literals("turtles").is_err());
        assert!(StandardLiteralEvaluator.read_literal("1 2").is_err());
        assert!(StandardLiteralEvaluator.read_literal("").is_err());
    }

    #[test]
    fn test_to_source() {
        let literal = Literal::List(vec![Literal::Number(5.0), Literal::Boolean(false)]);
        assert_eq!(literal.to_source(), "[5 false]");
    }
}
