//! Recursive-descent parser
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := NUMBER | NAME | NAME '(' args ')' | '(' expr ')'
//! args    := expr (',' expr)*
//! ```
//!
//! `^` is right associative and binds tighter than a unary minus on its
//! left, so `-2^2 == -4` and `2^-1 == 0.5`.

use crate::error::{CalcError, Result};
use crate::functions::{Function, Scope};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::number::Number;

/// Nesting limit for parentheses and unary chains
const MAX_DEPTH: usize = 128;

/// Token limit; evaluation recurses once per operator
const MAX_TOKENS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Number),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn eval(&self) -> Result<Number> {
        match self {
            Expr::Literal(n) => Ok(*n),
            Expr::Neg(inner) => Ok(inner.eval()?.neg()),
            Expr::Binary { op, lhs, rhs } => {
                let a = lhs.eval()?;
                let b = rhs.eval()?;
                match op {
                    BinaryOp::Add => Ok(a.add(b)),
                    BinaryOp::Sub => Ok(a.sub(b)),
                    BinaryOp::Mul => Ok(a.mul(b)),
                    BinaryOp::Div => a.div(b),
                    BinaryOp::Pow => a.pow(b),
                }
            },
            Expr::Call { function, args } => {
                let values = args.iter().map(Expr::eval).collect::<Result<Vec<_>>>()?;
                function.call(&values)
            },
        }
    }
}

/// Parse `source` with identifiers resolved against `scope`
pub fn parse(source: &str, scope: Scope) -> Result<Expr> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(CalcError::evaluation("empty expression"));
    }
    if tokens.len() > MAX_TOKENS {
        return Err(CalcError::evaluation("expression is too long"));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        scope,
    };
    let expr = parser.expr()?;

    if let Some(token) = parser.peek() {
        return Err(unexpected(token));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    scope: Scope,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        match self.next() {
            Some(token) if token.kind == kind => Ok(()),
            Some(token) => Err(CalcError::evaluation(format!(
                "expected {} at position {}",
                what, token.pos
            ))),
            None => Err(CalcError::evaluation(format!(
                "expected {} at end of expression",
                what
            ))),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::evaluation("expression is nested too deeply"));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr> {
        match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            },
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.unary();
                self.depth -= 1;
                inner
            },
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr> {
        let base = self.primary()?;
        if matches!(self.peek_kind(), Some(TokenKind::Caret)) {
            self.pos += 1;
            self.enter()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr> {
        let Some(token) = self.next() else {
            return Err(CalcError::evaluation("unexpected end of expression"));
        };

        match token.kind {
            TokenKind::Int(i) => Ok(Expr::Literal(Number::Int(i))),
            TokenKind::Float(f) => Ok(Expr::Literal(Number::Float(f))),
            TokenKind::LParen => {
                self.enter()?;
                let inner = self.expr()?;
                self.depth -= 1;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            },
            TokenKind::Ident(name) => self.name(&name),
            _ => Err(unexpected(&token)),
        }
    }

    fn name(&mut self, name: &str) -> Result<Expr> {
        let is_call = matches!(self.peek_kind(), Some(TokenKind::LParen));

        if is_call {
            let function = self
                .scope
                .function(name)
                .ok_or_else(|| undefined(name))?;
            self.pos += 1;
            self.enter()?;
            let args = self.args()?;
            self.depth -= 1;
            return Ok(Expr::Call { function, args });
        }

        if let Some(value) = self.scope.constant(name) {
            return Ok(Expr::Literal(Number::Float(value)));
        }
        if self.scope.function(name).is_some() {
            return Err(CalcError::evaluation(format!(
                "function '{}' must be called with arguments",
                name
            )));
        }
        Err(undefined(name))
    }

    /// Arguments after the opening parenthesis, consuming the closing one
    fn args(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        if matches!(self.peek_kind(), Some(TokenKind::RParen)) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            match self.next() {
                Some(Token {
                    kind: TokenKind::Comma,
                    ..
                }) => continue,
                Some(Token {
                    kind: TokenKind::RParen,
                    ..
                }) => return Ok(args),
                Some(token) => return Err(unexpected(&token)),
                None => {
                    return Err(CalcError::evaluation(
                        "expected ')' at end of expression",
                    ))
                },
            }
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn undefined(name: &str) -> CalcError {
    CalcError::evaluation(format!("name '{}' is not defined", name))
}

fn unexpected(token: &Token) -> CalcError {
    let text = match &token.kind {
        TokenKind::Int(i) => i.to_string(),
        TokenKind::Float(f) => f.to_string(),
        TokenKind::Ident(name) => name.clone(),
        TokenKind::Plus => "+".to_string(),
        TokenKind::Minus => "-".to_string(),
        TokenKind::Star => "*".to_string(),
        TokenKind::Slash => "/".to_string(),
        TokenKind::Caret => "^".to_string(),
        TokenKind::LParen => "(".to_string(),
        TokenKind::RParen => ")".to_string(),
        TokenKind::Comma => ",".to_string(),
    };
    CalcError::evaluation(format!(
        "unexpected token '{}' at position {}",
        text, token.pos
    ))
}
