//! Arithmetic expression evaluator.
//!
//! A recursive descent parser over numbers, `+ - * / ( )` and unary signs,
//! with the usual precedence: unary binds tightest, then `*` `/`, then `+` `-`,
//! all left-associative. No names, calls or other operators are accepted.

use crate::error::{FormulaError, FormulaResult};

/// Maximum nesting of parentheses and unary signs.
const MAX_DEPTH: usize = 256;

/// Evaluate an arithmetic expression such as `1+5*2` or `-(3 - 4) / 2`.
pub fn eval_arithmetic(expression: &str) -> FormulaResult<f64> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, pos: 0 };

    let value = parser.parse_expression(0)?;
    if let Some(token) = parser.peek() {
        return Err(FormulaError::Parse(format!(
            "Unexpected token after expression: {:?}",
            token
        )));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
}

fn tokenize(input: &str) -> FormulaResult<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let token = match b {
            b' ' | b'\t' | b'\r' | b'\n' => {
                i += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LeftParen,
            b')' => Token::RightParen,
            b'0'..=b'9' | b'.' => {
                let end = scan_number(bytes, i);
                let text = &input[i..end];
                let n = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::Parse(format!("Invalid number: {}", text)))?;
                i = end;
                tokens.push(Token::Number(n));
                continue;
            }
            _ if input[i..].starts_with("Infinity") => {
                i += "Infinity".len();
                tokens.push(Token::Number(f64::INFINITY));
                continue;
            }
            _ => {
                let ch = input[i..].chars().next().unwrap_or('?');
                return Err(FormulaError::Parse(format!("Unexpected character: '{}'", ch)));
            }
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

/// End index of the number starting at `start`: digits and dots, then an
/// optional exponent.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    i
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    // expression = term (('+' | '-') term)*
    fn parse_expression(&mut self, depth: usize) -> FormulaResult<f64> {
        let mut value = self.parse_term(depth)?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.parse_term(depth)?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.parse_term(depth)?;
                }
                _ => return Ok(value),
            }
        }
    }

    // term = unary (('*' | '/') unary)*
    fn parse_term(&mut self, depth: usize) -> FormulaResult<f64> {
        let mut value = self.parse_unary(depth)?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.parse_unary(depth)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    value /= self.parse_unary(depth)?;
                }
                _ => return Ok(value),
            }
        }
    }

    // unary = ('+' | '-') unary | primary
    fn parse_unary(&mut self, depth: usize) -> FormulaResult<f64> {
        if depth > MAX_DEPTH {
            return Err(FormulaError::Parse("Expression nested too deeply".into()));
        }
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.parse_unary(depth + 1)
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.parse_unary(depth + 1)?)
            }
            _ => self.parse_primary(depth),
        }
    }

    // primary = number | '(' expression ')'
    fn parse_primary(&mut self, depth: usize) -> FormulaResult<f64> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LeftParen) => {
                let value = self.parse_expression(depth + 1)?;
                match self.next() {
                    Some(Token::RightParen) => Ok(value),
                    _ => Err(FormulaError::Parse("Expected ')'".into())),
                }
            }
            Some(token) => Err(FormulaError::Parse(format!("Unexpected token: {:?}", token))),
            None => Err(FormulaError::Parse("Unexpected end of expression".into())),
        }
    }
}
