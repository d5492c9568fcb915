use std::io::Write;

use errors::RloxErrors;
use parser::{Expr, Parser, Stmt};
use scanner::{Token, TokenData};

mod value;
pub use value::Value;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RuntimeErrorKind {
    #[error("Operand must be a number.")]
    OperandMustBeNumber,
    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers,
    #[error("Operands must be two numbers or two strings.")]
    OperandsMustBeNumbersOrStrings,
    /// The operator token is not one the node kind supports. Only reachable
    /// with trees that were not built by [`Parser`].
    #[error("Invalid operator.")]
    InvalidOperator,
}

/// A type error in a unary or binary operation, pointing at the operator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}\n[line {}]", .token.line())]
pub struct RuntimeError<'a> {
    pub token: Token<'a>,
    pub kind: RuntimeErrorKind,
}

impl<'a> RuntimeError<'a> {
    fn new(token: &Token<'a>, kind: RuntimeErrorKind) -> Self {
        Self { token: token.clone(), kind }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InterpretError<'a> {
    #[error("{0}")]
    CompileError(RloxErrors),
    // Not `#[from]`: a borrowed error can't be an error source.
    #[error("{0}")]
    RuntimeError(RuntimeError<'a>),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl<'a> From<RuntimeError<'a>> for InterpretError<'a> {
    fn from(e: RuntimeError<'a>) -> Self {
        Self::RuntimeError(e)
    }
}

pub type Result<'a, T> = std::result::Result<T, InterpretError<'a>>;

/// Tree-walking evaluator. `print` statements write one line each to `output`.
#[derive(Debug)]
pub struct Interpreter<W> {
    output: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Executes `stmts` in order, stopping at the first runtime error.
    /// Output of the statements before the error has already been written.
    pub fn interpret<'a>(&mut self, stmts: &[Stmt<'a>]) -> Result<'a, ()> {
        for stmt in stmts {
            self.execute(stmt)?;
        }
        Ok(())
    }

    fn execute<'a>(&mut self, stmt: &Stmt<'a>) -> Result<'a, ()> {
        log::trace!("Executing {stmt:?}");
        match stmt {
            Stmt::Print(expr) => {
                let value = evaluate(expr)?;
                writeln!(self.output, "{}", value)?;
            }
            Stmt::Expression(expr) => {
                evaluate(expr)?;
            }
        }
        Ok(())
    }
}

pub fn evaluate<'a>(expr: &Expr<'a>) -> std::result::Result<Value, RuntimeError<'a>> {
    use RuntimeErrorKind::*;
    use TokenData::*;

    match expr {
        Expr::Literal(literal) => Ok(literal.into()),

        Expr::Grouping(expr) => evaluate(expr),

        Expr::Unary { operator, right } => {
            let right = evaluate(right)?;
            match operator.data {
                Minus => (-right).map_err(|_| RuntimeError::new(operator, OperandMustBeNumber)),
                Bang => Ok(right.is_falsey().into()),
                _ => Err(RuntimeError::new(operator, InvalidOperator)),
            }
        }

        Expr::Binary { left, operator, right } => {
            let left = evaluate(left)?;
            let right = evaluate(right)?;
            let result = match operator.data {
                EqualEqual => return Ok((left == right).into()),
                BangEqual => return Ok((left != right).into()),

                Plus => {
                    return (left + right)
                        .map_err(|_| RuntimeError::new(operator, OperandsMustBeNumbersOrStrings))
                }

                Minus => left - right,
                Slash => left / right,
                Star => left * right,
                Greater => left.greater_than(right),
                GreaterEqual => left.greater_equal(right),
                Less => left.less_than(right),
                LessEqual => left.less_equal(right),

                _ => return Err(RuntimeError::new(operator, InvalidOperator)),
            };
            result.map_err(|_| RuntimeError::new(operator, OperandsMustBeNumbers))
        }
    }
}

/// Scans, parses and runs `source`. Nothing is executed if there are
/// lexical or syntax errors; all of them are returned together.
pub fn run_source<'a>(source: &'a str, output: &mut impl Write) -> Result<'a, ()> {
    let mut errors = RloxErrors::default();
    let tokens = scanner::scan_tokens_with(source, |e| errors.push(e));
    log::debug!("Scanned {} tokens, {} errors", tokens.len(), errors.len());

    let stmts = match Parser::new(tokens).parse() {
        Ok(stmts) if errors.is_empty() => stmts,
        Ok(_) => return Err(InterpretError::CompileError(errors)),
        Err(parse_errors) => {
            errors.extend(parse_errors.0);
            return Err(InterpretError::CompileError(errors));
        }
    };
    log::debug!("Parsed {} statements", stmts.len());

    Interpreter::new(output).interpret(&stmts)
}
