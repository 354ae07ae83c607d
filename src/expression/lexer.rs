use std::fmt;

use crate::expression::parseexpressionerror::ParseExpressionError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `^` 或 `**`
    Caret,
    LeftParen,
    RightParen
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "{}", value),
            TokenKind::Identifier(name) => write!(f, "{}", name),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    position: usize
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Token {
        Token { kind, position }
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

struct Lexer<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    index: usize
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Lexer<'a> {
        Lexer { source, chars: source.char_indices().collect(), index: 0 }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars.get(self.index).map_or(self.source.len(), |&(position, _)| position)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_at(0).is_some_and(&predicate) {
            self.index += 1;
        }
    }

    /// 指數部分只在 `e` 後面接數字（可帶正負號）時才成立，
    /// 否則 `2e` 視為 `2 * e`、`2exp(x)` 視為 `2 * exp(x)`。
    fn has_exponent(&self) -> bool {
        match (self.peek_at(0), self.peek_at(1), self.peek_at(2)) {
            (Some('e' | 'E'), Some(d), _) if d.is_ascii_digit() => true,
            (Some('e' | 'E'), Some('+' | '-'), Some(d)) if d.is_ascii_digit() => true,
            _ => false
        }
    }

    fn number(&mut self, start: usize) -> Result<Token, ParseExpressionError> {
        self.advance_while(|c| c.is_ascii_digit());
        if self.peek_at(0) == Some('.') {
            self.index += 1;
            self.advance_while(|c| c.is_ascii_digit());
        }
        if self.has_exponent() {
            self.index += 2;
            self.advance_while(|c| c.is_ascii_digit());
        }
        let literal = &self.source[start..self.offset()];
        literal
            .parse::<f64>()
            .map(|value| Token::new(TokenKind::Number(value), start))
            .map_err(|_| ParseExpressionError::InvalidNumber { literal: literal.to_owned(), position: start })
    }

    fn identifier(&mut self, start: usize) -> Token {
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let name = self.source[start..self.offset()].to_owned();
        Token::new(TokenKind::Identifier(name), start)
    }

    fn tokens(mut self) -> Result<Vec<Token>, ParseExpressionError> {
        let mut tokens = Vec::new();
        while let Some(&(position, character)) = self.chars.get(self.index) {
            if character.is_whitespace() {
                self.index += 1;
                continue;
            }
            if character.is_ascii_digit() || (character == '.' && self.peek_at(1).is_some_and(|c| c.is_ascii_digit())) {
                tokens.push(self.number(position)?);
                continue;
            }
            if character.is_ascii_alphabetic() || character == '_' {
                tokens.push(self.identifier(position));
                continue;
            }
            let kind = match character {
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' if self.peek_at(1) == Some('*') => {
                    self.index += 1;
                    TokenKind::Caret
                },
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '^' => TokenKind::Caret,
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                _ => return Err(ParseExpressionError::UnexpectedCharacter { character, position })
            };
            self.index += 1;
            tokens.push(Token::new(kind, position));
        }
        Ok(tokens)
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseExpressionError> {
    Lexer::new(source).tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn numbers_with_fraction_and_exponent() {
        assert_eq!(kinds("2.5 .5 1e-3 3E2"), vec![
            TokenKind::Number(2.5),
            TokenKind::Number(0.5),
            TokenKind::Number(1e-3),
            TokenKind::Number(300.0)
        ]);
    }

    #[test]
    fn letter_after_number_is_not_an_exponent() {
        assert_eq!(kinds("2exp"), vec![
            TokenKind::Number(2.0),
            TokenKind::Identifier("exp".to_owned())
        ]);
        assert_eq!(kinds("2e"), vec![
            TokenKind::Number(2.0),
            TokenKind::Identifier("e".to_owned())
        ]);
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(kinds("x**2"), vec![
            TokenKind::Identifier("x".to_owned()),
            TokenKind::Caret,
            TokenKind::Number(2.0)
        ]);
    }

    #[test]
    fn positions_are_byte_offsets() {
        let tokens = tokenize("  sin( x )").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|token| token.position()).collect();
        assert_eq!(positions, vec![2, 5, 7, 9]);
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            tokenize("x % 2").unwrap_err(),
            ParseExpressionError::UnexpectedCharacter { character: '%', position: 2 }
        );
    }
}
