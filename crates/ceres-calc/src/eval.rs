//! Tokenizer and direct evaluator for the calc expression language.
//!
//! The language is a small R-flavored subset: `name <- expr` assignment,
//! `+ - * /` arithmetic with scalar/vector broadcasting, `c(...)` vector
//! construction, string literals, parentheses, and `;` or newline between
//! statements. A program evaluates to the value of its last statement.

use std::collections::HashMap;

use crate::error::CalcError;
use crate::value::CalcValue;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Number(f64),
    Str(String),
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
    Semi,
}

fn tokenize(code: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = code.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' => {
                chars.next();
            }
            '\n' | ';' => {
                chars.next();
                tokens.push(Token::Semi);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '<' => {
                chars.next();
                if chars.peek() == Some(&'-') {
                    chars.next();
                    tokens.push(Token::Assign);
                } else {
                    return Err(CalcError::Syntax("stray `<`".to_string()));
                }
            }
            '"' | '\'' => {
                let quote = c;
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some(ch) if ch == quote => break,
                        Some(ch) => text.push(ch),
                        None => {
                            return Err(CalcError::Syntax(
                                "unterminated string literal".to_string(),
                            ));
                        }
                    }
                }
                tokens.push(Token::Str(text));
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut digits = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_digit() || ch == '.' {
                        digits.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = digits
                    .parse::<f64>()
                    .map_err(|_| CalcError::Syntax(format!("bad number `{digits}`")))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => {
                return Err(CalcError::Syntax(format!("unexpected character `{other}`")));
            }
        }
    }

    Ok(tokens)
}

/// Evaluate a program against a workspace, returning the value of the last
/// statement.
pub(crate) fn eval_program(
    code: &str,
    workspace: &mut HashMap<String, CalcValue>,
) -> Result<CalcValue, CalcError> {
    let tokens = tokenize(code)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        workspace,
    };

    let mut last = None;
    loop {
        parser.skip_separators();
        if parser.at_end() {
            break;
        }
        last = Some(parser.statement()?);
    }
    last.ok_or_else(|| CalcError::Syntax("empty program".to_string()))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    workspace: &'a mut HashMap<String, CalcValue>,
}

impl Parser<'_> {
    fn peek(&self, ahead: usize) -> Option<&Token> {
        self.tokens.get(self.pos + ahead)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn skip_separators(&mut self) {
        while self.peek(0) == Some(&Token::Semi) {
            self.pos += 1;
        }
    }

    fn statement(&mut self) -> Result<CalcValue, CalcError> {
        if let (Some(Token::Ident(name)), Some(Token::Assign)) =
            (self.peek(0).cloned(), self.peek(1).cloned())
        {
            self.pos += 2;
            let value = self.expr()?;
            self.workspace.insert(name, value.clone());
            Ok(value)
        } else {
            self.expr()
        }
    }

    fn expr(&mut self) -> Result<CalcValue, CalcError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek(0) {
                Some(Token::Plus) => '+',
                Some(Token::Minus) => '-',
                _ => break,
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = arith(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<CalcValue, CalcError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek(0) {
                Some(Token::Star) => '*',
                Some(Token::Slash) => '/',
                _ => break,
            };
            self.pos += 1;
            let rhs = self.factor()?;
            lhs = arith(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<CalcValue, CalcError> {
        match self.peek(0).cloned() {
            Some(Token::Number(value)) => {
                self.pos += 1;
                Ok(CalcValue::Number(value))
            }
            Some(Token::Str(text)) => {
                self.pos += 1;
                Ok(CalcValue::Str(text))
            }
            Some(Token::Minus) => {
                self.pos += 1;
                let operand = self.factor()?;
                arith('*', CalcValue::Number(-1.0), operand)
            }
            Some(Token::Ident(name)) => {
                self.pos += 1;
                if name == "c" && self.peek(0) == Some(&Token::LParen) {
                    return self.vector_call();
                }
                self.workspace
                    .get(&name)
                    .cloned()
                    .ok_or(CalcError::Undefined(name))
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(other) => Err(CalcError::Syntax(format!("unexpected token {other:?}"))),
            None => Err(CalcError::Syntax("unexpected end of input".to_string())),
        }
    }

    fn vector_call(&mut self) -> Result<CalcValue, CalcError> {
        self.expect(Token::LParen)?;
        let mut items = Vec::new();
        loop {
            let value = self.expr()?;
            match value {
                CalcValue::Number(n) => items.push(n),
                CalcValue::Vector(mut more) => items.append(&mut more),
                other => {
                    return Err(CalcError::Type(format!(
                        "c() over {} values",
                        other.type_name()
                    )));
                }
            }
            match self.peek(0) {
                Some(Token::Comma) => self.pos += 1,
                _ => break,
            }
        }
        self.expect(Token::RParen)?;
        Ok(CalcValue::Vector(items))
    }

    fn expect(&mut self, token: Token) -> Result<(), CalcError> {
        if self.peek(0) == Some(&token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(CalcError::Syntax(format!("expected {token:?}")))
        }
    }
}

fn arith(op: char, lhs: CalcValue, rhs: CalcValue) -> Result<CalcValue, CalcError> {
    use CalcValue::{Number, Vector};

    let apply = |a: f64, b: f64| match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        _ => a / b,
    };

    match (lhs, rhs) {
        (Number(a), Number(b)) => Ok(Number(apply(a, b))),
        (Number(a), Vector(b)) => Ok(Vector(b.into_iter().map(|x| apply(a, x)).collect())),
        (Vector(a), Number(b)) => Ok(Vector(a.into_iter().map(|x| apply(x, b)).collect())),
        (Vector(a), Vector(b)) => {
            if a.len() != b.len() {
                return Err(CalcError::Length(a.len(), b.len()));
            }
            Ok(Vector(
                a.into_iter().zip(b).map(|(x, y)| apply(x, y)).collect(),
            ))
        }
        (lhs, rhs) => Err(CalcError::Type(format!(
            "{} {op} {}",
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}
