use crate::expression::expression::{
    BinaryOperator,
    DomainPolicy,
    Expression,
    Node,
    UnaryFunction
};
use crate::expression::lexer::{
    Token,
    TokenKind,
    tokenize
};
use crate::expression::parseexpressionerror::ParseExpressionError;

// ─────────────────────────────────────────────────────────────────────────────
// 遞迴下降 parser
// ─────────────────────────────────────────────────────────────────────────────
//
//   expr    := term (('+' | '-') term)*
//   term    := unary (('*' | '/') unary | <implicit> unary)*
//   unary   := ('-' | '+') unary | power
//   power   := call ('^' unary)?          右結合；-x^2 = -(x^2)
//   call    := IDENT '(' expr ')' | primary
//   primary := NUMBER | IDENT | '(' expr ')'
//
// <implicit>：數字後面直接接識別字或 '('，例如 2x、3sin(x)、2(x+1)。
//
// 每一層遞迴都會經過 unary，巢狀深度在那裡計數。

/// 括號、函數呼叫、正負號與次方的最大巢狀深度。
pub const MAX_NESTING_DEPTH: usize = 256;

/// 解析設定：變數名稱與求值時的定義域處理。
#[derive(Debug, Clone)]
pub struct ExpressionParser {
    variable: String,
    policy: DomainPolicy
}

impl Default for ExpressionParser {
    fn default() -> Self {
        ExpressionParser::new("x".to_owned(), DomainPolicy::default())
    }
}

impl ExpressionParser {
    pub fn new(variable: String, policy: DomainPolicy) -> ExpressionParser {
        ExpressionParser { variable, policy }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn parse(&self, source: &str) -> Result<Expression, ParseExpressionError> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(ParseExpressionError::Empty);
        }
        let mut cursor = Cursor { tokens: &tokens, index: 0, depth: 0, variable: &self.variable };
        let root = cursor.expr()?;
        if let Some(token) = cursor.peek() {
            return Err(unexpected(token));
        }
        Ok(Expression::new(source.trim().to_owned(), root, self.policy))
    }
}

/// 以預設設定（變數 `x`、strict）解析。
pub fn parse_expression(source: &str) -> Result<Expression, ParseExpressionError> {
    ExpressionParser::default().parse(source)
}

fn unexpected(token: &Token) -> ParseExpressionError {
    ParseExpressionError::UnexpectedToken { found: token.kind().to_string(), position: token.position() }
}

struct Cursor<'a> {
    tokens: &'a [Token],
    index: usize,
    depth: usize,
    variable: &'a str
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|token| token.kind())
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a Token, ParseExpressionError> {
        let token = self.peek().ok_or(ParseExpressionError::UnexpectedEnd { expected })?;
        self.index += 1;
        Ok(token)
    }

    fn previous_was_number(&self) -> bool {
        self.index > 0 && matches!(self.tokens[self.index - 1].kind(), TokenKind::Number(_))
    }

    fn expr(&mut self) -> Result<Node, ParseExpressionError> {
        let mut lhs = self.term()?;
        loop {
            let operator = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOperator::Add,
                Some(TokenKind::Minus) => BinaryOperator::Subtract,
                _ => return Ok(lhs)
            };
            self.index += 1;
            let rhs = self.term()?;
            lhs = Node::binary(operator, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Node, ParseExpressionError> {
        let mut lhs = self.unary()?;
        loop {
            let operator = match self.peek_kind() {
                Some(TokenKind::Star) => {
                    self.index += 1;
                    BinaryOperator::Multiply
                },
                Some(TokenKind::Slash) => {
                    self.index += 1;
                    BinaryOperator::Divide
                },
                Some(TokenKind::Identifier(_) | TokenKind::LeftParen) if self.previous_was_number() => {
                    BinaryOperator::Multiply
                },
                _ => return Ok(lhs)
            };
            let rhs = self.unary()?;
            lhs = Node::binary(operator, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Node, ParseExpressionError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let position = self.peek().map(|token| token.position()).unwrap_or_default();
            return Err(ParseExpressionError::TooDeep { position });
        }
        self.depth += 1;
        let node = self.signed();
        self.depth -= 1;
        node
    }

    fn signed(&mut self) -> Result<Node, ParseExpressionError> {
        match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.index += 1;
                Ok(Node::Negate(Box::new(self.unary()?)))
            },
            Some(TokenKind::Plus) => {
                self.index += 1;
                self.unary()
            },
            _ => self.power()
        }
    }

    fn power(&mut self) -> Result<Node, ParseExpressionError> {
        let base = self.call()?;
        if let Some(TokenKind::Caret) = self.peek_kind() {
            self.index += 1;
            let exponent = self.unary()?;
            return Ok(Node::binary(BinaryOperator::Power, base, exponent));
        }
        Ok(base)
    }

    fn call(&mut self) -> Result<Node, ParseExpressionError> {
        let token = self.next("a number, variable, function or '('")?;
        match token.kind() {
            TokenKind::Number(value) => Ok(Node::Number(*value)),
            TokenKind::LeftParen => {
                let inner = self.expr()?;
                self.close_paren()?;
                Ok(inner)
            },
            TokenKind::Identifier(name) => self.identifier(name, token.position()),
            _ => Err(unexpected(token))
        }
    }

    fn identifier(&mut self, name: &str, position: usize) -> Result<Node, ParseExpressionError> {
        if name == self.variable {
            return Ok(Node::Variable);
        }
        let followed_by_paren = matches!(self.peek_kind(), Some(TokenKind::LeftParen));
        if let Some(function) = UnaryFunction::from_name(name) {
            let paren = self.next("'('")?;
            if !followed_by_paren {
                return Err(unexpected(paren));
            }
            let argument = self.expr()?;
            self.close_paren()?;
            return Ok(Node::call(function, argument));
        }
        if let Some(constant) = Node::constant(name) {
            return Ok(constant);
        }
        if followed_by_paren {
            Err(ParseExpressionError::UnknownFunction { name: name.to_owned(), position })
        } else {
            Err(ParseExpressionError::UnknownIdentifier { name: name.to_owned(), position })
        }
    }

    fn close_paren(&mut self) -> Result<(), ParseExpressionError> {
        let token = self.next("')'")?;
        match token.kind() {
            TokenKind::RightParen => Ok(()),
            _ => Err(unexpected(token))
        }
    }
}
