use std::fmt::{self, Display, Formatter};

use scanner::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Grouping(Box<Expr<'a>>),
    Unary { operator: Token<'a>, right: Box<Expr<'a>> },
    Literal(LiteralValue<'a>),
}

/// Debug rendering as a fully parenthesized prefix form,
/// e.g. `(* (- 123) (group 45.67))`.
impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { left, operator, right } => {
                write!(f, "({} {} {})", operator, left, right)
            }
            Expr::Grouping(expression) => {
                write!(f, "(group {})", expression)
            }
            Expr::Unary { operator, right } => {
                write!(f, "({} {})", operator, right)
            }
            Expr::Literal(value) => {
                write!(f, "{}", value)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue<'a> {
    Number(f64),
    Str(&'a str),
    Boolean(bool),
    Nil,
}

impl Display for LiteralValue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::Str(s) => write!(f, "{}", s),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Nil => write!(f, "nil"),
        }
    }
}

#[cfg(test)]
mod tests {
    use cursor::Cursor;
    use pretty_assertions::assert_eq;
    use scanner::TokenData;

    use super::*;

    // Builds an operator token whose lexeme is all of `source`.
    fn operator<'a>(data: TokenData<'a>, source: &'a str) -> Token<'a> {
        let start = Cursor::new(source);
        let mut end = start.clone();
        end.by_ref().for_each(drop);
        Token::new(data, (start, end))
    }

    fn number<'a>(n: f64) -> Box<Expr<'a>> {
        Box::new(Expr::Literal(LiteralValue::Number(n)))
    }

    #[test]
    fn print_nested_expression() {
        let expr = Expr::Binary {
            left: Box::new(Expr::Unary { operator: operator(TokenData::Minus, "-"), right: number(123.0) }),
            operator: operator(TokenData::Star, "*"),
            right: Box::new(Expr::Grouping(number(45.67))),
        };

        assert_eq!(expr.to_string(), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn print_literals() {
        assert_eq!(Expr::Literal(LiteralValue::Nil).to_string(), "nil");
        assert_eq!(Expr::Literal(LiteralValue::Boolean(false)).to_string(), "false");
        assert_eq!(Expr::Literal(LiteralValue::Str("hi there")).to_string(), "hi there");
        assert_eq!(number(2.5).to_string(), "2.5");
    }

    #[test]
    fn print_equality() {
        let expr = Expr::Binary {
            left: Box::new(Expr::Literal(LiteralValue::Boolean(true))),
            operator: operator(TokenData::BangEqual, "!="),
            right: Box::new(Expr::Unary {
                operator: operator(TokenData::Bang, "!"),
                right: Box::new(Expr::Literal(LiteralValue::Nil)),
            }),
        };

        assert_eq!(expr.to_string(), "(!= true (! nil))");
    }
}
