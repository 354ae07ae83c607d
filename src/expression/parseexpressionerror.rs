use thiserror::Error;

/// 算式解析錯誤；`position` 為原字串中的 byte offset。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        character: char,
        position: usize
    },

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken {
        found: String,
        position: usize
    },

    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd {
        expected: &'static str
    },

    #[error("unknown identifier '{name}' at position {position}")]
    UnknownIdentifier {
        name: String,
        position: usize
    },

    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction {
        name: String,
        position: usize
    },

    #[error("invalid number literal '{literal}' at position {position}")]
    InvalidNumber {
        literal: String,
        position: usize
    },

    #[error("expression nested too deeply at position {position}")]
    TooDeep {
        position: usize
    }
}
