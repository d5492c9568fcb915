use cursor::Cursor;
use errors::{Location, RloxError, RloxErrors};

pub mod token;
pub use token::{Token, TokenData, TokenKind};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[cfg_attr(feature = "strict", error("Unexpected character."))]
    #[cfg_attr(not(feature = "strict"), error("Unexpected character '{0}'."))]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
}

/// Lazily scans a source text. Lexical errors are yielded in place of the
/// offending lexeme and scanning continues after them. The stream always ends
/// with exactly one [`TokenData::Eof`].
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    start: Cursor<'a>,
    current: Cursor<'a>,
    done: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { start: Cursor::new(source), current: Cursor::new(source), done: false }
    }

    fn make_token(&self, data: TokenData<'a>) -> Token<'a> {
        let token = Token::new(data, (self.start.clone(), self.current.clone()));
        log::trace!("{} '{}' (line {})", token.kind(), token.lexeme(), token.line());
        token
    }

    fn make_error(&self, error: ScanError) -> RloxError {
        RloxError {
            line: self.current.line(),
            col: self.start.col(),
            location: Location::Unknown,
            message: error.to_string(),
        }
    }

    fn either(&mut self, expected: char, matched: TokenData<'a>, single: TokenData<'a>) -> Token<'a> {
        let data = if self.current.advance_if(expected) { matched } else { single };
        self.make_token(data)
    }

    fn string(&mut self) -> Result<Token<'a>, RloxError> {
        self.current.advance_while(|c| c != '"');
        if !self.current.advance_if('"') {
            return Err(self.make_error(ScanError::UnterminatedString));
        }

        let lexeme = self.start.slice_until(&self.current);
        Ok(self.make_token(Str(&lexeme[1..lexeme.len() - 1])))
    }

    fn number(&mut self) -> Token<'a> {
        self.current.advance_while(|c| c.is_ascii_digit());

        if self.current.peek() == Some('.')
            && self.current.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.current.next();
            self.current.advance_while(|c| c.is_ascii_digit());
        }

        // Only ascii digits with at most one inner '.', so this always parses.
        let value = self.start.slice_until(&self.current).parse().unwrap_or(f64::NAN);
        self.make_token(Number(value))
    }

    fn identifier(&mut self) -> Token<'a> {
        self.current.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let ident = self.start.slice_until(&self.current);
        self.make_token(TokenData::keyword(ident).unwrap_or(Identifier))
    }

    fn eof(&mut self) -> Token<'a> {
        self.done = true;
        self.start = self.current.clone();
        self.make_token(Eof)
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<Token<'a>, RloxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.start = self.current.clone();

            let Some(c) = self.current.next() else {
                return Some(Ok(self.eof()));
            };

            let token = match c {
                '(' => self.make_token(LeftParen),
                ')' => self.make_token(RightParen),
                '{' => self.make_token(LeftBrace),
                '}' => self.make_token(RightBrace),
                ',' => self.make_token(Comma),
                '.' => self.make_token(Dot),
                '-' => self.make_token(Minus),
                '+' => self.make_token(Plus),
                ';' => self.make_token(Semicolon),
                '*' => self.make_token(Star),

                '!' => self.either('=', BangEqual, Bang),
                '=' => self.either('=', EqualEqual, Equal),
                '<' => self.either('=', LessEqual, Less),
                '>' => self.either('=', GreaterEqual, Greater),

                '/' => {
                    if self.current.advance_if('/') {
                        // Comment, the newline is handled by the next iteration
                        self.current.advance_while(|c| c != '\n');
                        continue;
                    }
                    self.make_token(Slash)
                }

                ' ' | '\r' | '\t' | '\n' => continue,

                '"' => return Some(self.string()),

                d if d.is_ascii_digit() => self.number(),

                c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

                c => return Some(Err(self.make_error(ScanError::UnexpectedCharacter(c)))),
            };

            return Some(Ok(token));
        }
    }
}

/// Scans the whole `source`, handing every lexical error to `report`.
/// The returned tokens always end with [`TokenData::Eof`].
pub fn scan_tokens_with<'a>(source: &'a str, mut report: impl FnMut(RloxError)) -> Vec<Token<'a>> {
    TokenStream::new(source)
        .filter_map(|result| match result {
            Ok(token) => Some(token),
            Err(error) => {
                report(error);
                None
            }
        })
        .collect()
}

pub fn scan_tokens(source: &str) -> (Vec<Token<'_>>, RloxErrors) {
    let mut errors = RloxErrors::default();
    let tokens = scan_tokens_with(source, |e| errors.push(e));
    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use cursor::{Col, Line};
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    fn scan(source: &str) -> Vec<(TokenData<'_>, &str, usize)> {
        let (tokens, errors) = scan_tokens(source);
        assert_eq!(errors, RloxErrors::default());
        tokens.into_iter().map(|t| (t.data.clone(), t.lexeme(), t.line().0)).collect()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, _) = scan_tokens(source);
        tokens.iter().map(Token::kind).collect_vec()
    }

    fn error(line: usize, col: usize, error: ScanError) -> RloxError {
        RloxError {
            line: Line(line),
            col: Col(col),
            location: Location::Unknown,
            message: error.to_string(),
        }
    }

    #[test]
    fn string_literals() {
        assert_eq!(
            scan("\"hello world\""),
            vec![(Str("hello world"), "\"hello world\"", 1), (Eof, "", 1)]
        );
        assert_eq!(scan("\"\""), vec![(Str(""), "\"\"", 1), (Eof, "", 1)]);
    }

    #[test]
    fn multiline_string() {
        assert_eq!(
            scan("\"a\nb\" x"),
            vec![(Str("a\nb"), "\"a\nb\"", 2), (Identifier, "x", 2), (Eof, "", 2)]
        );
    }

    #[test]
    fn multiline_string_takes_line_of_closing_quote() {
        let (tokens, _) = scan_tokens("\"one\ntwo\nthree\" +");
        assert_eq!(tokens.iter().map(|t| t.line().0).collect_vec(), vec![3, 3, 3]);
        assert_eq!(tokens[0].col(), Col(1));
    }

    #[test]
    fn unterminated_string() {
        let (tokens, errors) = scan_tokens("\"hello world");
        assert_eq!(tokens.iter().map(Token::kind).collect_vec(), vec![TokenKind::Eof]);
        assert_eq!(errors, RloxErrors(vec![error(1, 1, ScanError::UnterminatedString)]));

        let (tokens, errors) = scan_tokens("1 \"hello\nworld\n");
        assert_eq!(tokens.iter().map(Token::kind).collect_vec(), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(tokens[1].line(), Line(3));
        assert_eq!(errors, RloxErrors(vec![error(3, 3, ScanError::UnterminatedString)]));
    }

    #[test]
    fn two_char_tokens() {
        assert_eq!(
            scan("! != = == < <= > >="),
            vec![
                (Bang, "!", 1),
                (BangEqual, "!=", 1),
                (Equal, "=", 1),
                (EqualEqual, "==", 1),
                (Less, "<", 1),
                (LessEqual, "<=", 1),
                (Greater, ">", 1),
                (GreaterEqual, ">=", 1),
                (Eof, "", 1),
            ]
        );
        assert_eq!(
            kinds("!==="),
            vec![TokenKind::BangEqual, TokenKind::EqualEqual, TokenKind::Eof]
        );
    }

    #[test]
    fn single_char_tokens() {
        assert_eq!(
            scan("=(){},.-+;*/!<>"),
            vec![
                (Equal, "=", 1),
                (LeftParen, "(", 1),
                (RightParen, ")", 1),
                (LeftBrace, "{", 1),
                (RightBrace, "}", 1),
                (Comma, ",", 1),
                (Dot, ".", 1),
                (Minus, "-", 1),
                (Plus, "+", 1),
                (Semicolon, ";", 1),
                (Star, "*", 1),
                (Slash, "/", 1),
                (Bang, "!", 1),
                (Less, "<", 1),
                (Greater, ">", 1),
                (Eof, "", 1),
            ]
        );
    }

    #[test]
    fn comments() {
        assert_eq!(
            scan("a // comment\nb"),
            vec![(Identifier, "a", 1), (Identifier, "b", 2), (Eof, "", 2)]
        );
        assert_eq!(scan("// only a comment"), vec![(Eof, "", 1)]);
        assert_eq!(scan("1/2"), vec![(Number(1.0), "1", 1), (Slash, "/", 1), (Number(2.0), "2", 1), (Eof, "", 1)]);
    }

    #[test]
    fn numbers() {
        assert_eq!(scan("123"), vec![(Number(123.0), "123", 1), (Eof, "", 1)]);
        assert_eq!(scan("45.67"), vec![(Number(45.67), "45.67", 1), (Eof, "", 1)]);
        assert_eq!(scan("007.50"), vec![(Number(7.5), "007.50", 1), (Eof, "", 1)]);
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        assert_eq!(
            scan("123.abc"),
            vec![(Number(123.0), "123", 1), (Dot, ".", 1), (Identifier, "abc", 1), (Eof, "", 1)]
        );
        assert_eq!(scan("1."), vec![(Number(1.0), "1", 1), (Dot, ".", 1), (Eof, "", 1)]);
        assert_eq!(
            scan(".5"),
            vec![(Dot, ".", 1), (Number(5.0), "5", 1), (Eof, "", 1)]
        );
    }

    #[test]
    fn keywords() {
        use TokenKind as K;
        assert_eq!(
            kinds("and class else false for fun if nil or print return super this true var while"),
            vec![
                K::And,
                K::Class,
                K::Else,
                K::False,
                K::For,
                K::Fun,
                K::If,
                K::Nil,
                K::Or,
                K::Print,
                K::Return,
                K::Super,
                K::This,
                K::True,
                K::Var,
                K::While,
                K::Eof,
            ]
        );
    }

    #[test]
    fn identifiers_are_not_partial_keywords() {
        for ident in ["andy", "Print", "NIL", "_while", "fo", "classes", "var_1", "x9"] {
            assert_eq!(kinds(ident), vec![TokenKind::Identifier, TokenKind::Eof], "{ident}");
        }
    }

    #[test]
    fn whitespace_and_lines() {
        assert_eq!(
            scan(" \t\r\n\n  x\n"),
            vec![(Identifier, "x", 3), (Eof, "", 4)]
        );
    }

    #[test]
    fn empty_source() {
        assert_eq!(scan(""), vec![(Eof, "", 1)]);
    }

    #[test]
    fn unexpected_characters_are_reported_and_skipped() {
        let (tokens, errors) = scan_tokens("a @ b\n# c");
        assert_eq!(
            tokens.iter().map(|t| (t.lexeme(), t.line().0)).collect_vec(),
            vec![("a", 1), ("b", 1), ("c", 2), ("", 2)]
        );
        assert_eq!(
            errors,
            RloxErrors(vec![
                error(1, 3, ScanError::UnexpectedCharacter('@')),
                error(2, 1, ScanError::UnexpectedCharacter('#')),
            ])
        );
    }

    #[test]
    fn errors_go_to_the_sink_in_order() {
        let mut reported = Vec::new();
        let tokens = scan_tokens_with("$ 1 \"open", |e| reported.push(e.line));
        assert_eq!(tokens.iter().map(Token::kind).collect_vec(), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(reported, vec![Line(1), Line(1)]);
    }

    #[test]
    fn stream_ends_after_eof() {
        let mut stream = TokenStream::new("1");
        assert!(matches!(stream.next(), Some(Ok(Token { data: Number(_), .. }))));
        assert!(matches!(stream.next(), Some(Ok(Token { data: Eof, .. }))));
        assert_eq!(stream.next(), None);
        assert_eq!(stream.next(), None);
    }
}
