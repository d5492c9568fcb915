mod expr;
mod stmt;
use errors::{Location, RloxError, RloxErrors};
use std::{iter::Peekable, vec};
pub use stmt::Stmt;

pub use expr::{Expr, LiteralValue};
use scanner::{Token, TokenData, TokenKind};

use errors::Result;

use TokenKind::*;

#[derive(Debug)]
pub struct ParserError<'a> {
    error: ParserErrorType,
    token: Token<'a>,
}

impl<'a> From<ParserError<'a>> for RloxError {
    fn from(error: ParserError<'a>) -> Self {
        let location = match error.token.data {
            TokenData::Eof => Location::AtEnd,
            _ => Location::At(error.token.lexeme().to_string()),
        };
        RloxError {
            line: error.token.line(),
            col: error.token.col(),
            location,
            message: error.error.to_string(),
        }
    }
}

impl<'a> ParserError<'a> {
    fn new(error: ParserErrorType, token: Token<'a>) -> Self {
        Self { token, error }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ParserErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    MissingRightParen,
    #[error("Expect ';' after value.")]
    ExpectedSemicolonAfterValue,
    #[error("Expect ';' after expression.")]
    ExpectedSemicolonAfterExpression,
}

/// Recursive descent parser for print and expression statements.
/// Expects a token list that ends with [`TokenData::Eof`], as produced by
/// [`scanner::scan_tokens`].
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Peekable<vec::IntoIter<Token<'a>>>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens: tokens.into_iter().peekable() }
    }

    pub fn parse(mut self) -> std::result::Result<Vec<Stmt<'a>>, RloxErrors> {
        let mut errors = RloxErrors::default();
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(e) => {
                    log::debug!("Parse error, synchronizing: {e}");
                    self.synchronize();
                    errors.push(e)
                }
            }
        }

        if errors.is_empty() {
            Ok(stmts)
        } else {
            Err(errors)
        }
    }

    fn statement(&mut self) -> Result<Stmt<'a>> {
        if self.consume(Print).is_ok() {
            return self.print_statement();
        }

        self.expression_statement()
    }

    fn print_statement(&mut self) -> Result<Stmt<'a>> {
        let value = self.expression()?;

        self.consume_or_error(Semicolon, ParserErrorType::ExpectedSemicolonAfterValue)?;

        Ok(Stmt::Print(value))
    }

    fn expression_statement(&mut self) -> Result<Stmt<'a>> {
        let value = self.expression()?;

        self.consume_or_error(Semicolon, ParserErrorType::ExpectedSemicolonAfterExpression)?;

        Ok(Stmt::Expression(value))
    }

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.consume_any(&[BangEqual, EqualEqual]) {
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.term()?;

        while let Some(operator) = self.consume_any(&[Greater, GreaterEqual, Less, LessEqual]) {
            let right = Box::new(self.term()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.consume_any(&[Plus, Minus]) {
            let right = Box::new(self.factor()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.consume_any(&[Star, Slash]) {
            let right = Box::new(self.unary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr<'a>> {
        if let Some(operator) = self.consume_any(&[Minus, Bang]) {
            let right = Box::new(self.unary()?);
            return Ok(Expr::Unary { operator, right });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        let Some(token) = self.consume_any(&[False, True, Nil, Number, Str, LeftParen]) else {
            return Err(ParserError::new(ParserErrorType::ExpectedExpression, self.peek_token()).into());
        };

        match token.data {
            TokenData::False => Ok(Expr::Literal(LiteralValue::Boolean(false))),
            TokenData::True => Ok(Expr::Literal(LiteralValue::Boolean(true))),
            TokenData::Nil => Ok(Expr::Literal(LiteralValue::Nil)),
            TokenData::Str(s) => Ok(Expr::Literal(LiteralValue::Str(s))),
            TokenData::Number(n) => Ok(Expr::Literal(LiteralValue::Number(n))),
            _ => {
                let expr = self.expression()?;

                self.consume_or_error(RightParen, ParserErrorType::MissingRightParen)?;

                Ok(Expr::Grouping(Box::new(expr)))
            }
        }
    }

    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.advance().kind() == Semicolon {
                return;
            }

            if matches!(
                self.peek_token().kind(),
                Class | Fun | Var | For | If | While | Print | Return
            ) {
                return;
            }
        }
    }
}

// Helpers
impl<'a> Parser<'a> {
    /// Consumes the next token if it is of kind `kind`, otherwise returns it
    /// without consuming it.
    fn consume(&mut self, kind: TokenKind) -> std::result::Result<Token<'a>, Token<'a>> {
        match self.consume_any(&[kind]) {
            Some(token) => Ok(token),
            None => Err(self.peek_token()),
        }
    }

    fn consume_any(&mut self, kinds: &[TokenKind]) -> Option<Token<'a>> {
        self.tokens.next_if(|t| kinds.contains(&t.kind()))
    }

    fn consume_or_error(&mut self, kind: TokenKind, error_type: ParserErrorType) -> Result<Token<'a>> {
        self.consume(kind).map_err(|token| ParserError::new(error_type, token).into())
    }

    fn peek_token(&mut self) -> Token<'a> {
        self.tokens.peek().cloned().unwrap_or_else(|| unreachable!("Should have hit Eof"))
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.peek_token();
        if token.data != TokenData::Eof {
            self.tokens.next();
        }
        token
    }

    fn is_at_end(&mut self) -> bool {
        self.tokens.peek().map_or(true, |t| t.data == TokenData::Eof)
    }
}
