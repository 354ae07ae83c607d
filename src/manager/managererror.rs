use serde::Deserialize;
use thiserror::Error;

use crate::expression::parseexpressionerror::ParseExpressionError;
use crate::math::integration::integrationerror::IntegrationError;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("{0}")]
    IOError(#[from] std::io::Error),

    #[error("{0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("key '{0}' not found")]
    NameNotFoundError(String),

    #[error("problem '{name}': {source}")]
    ExpressionError {
        name: String,
        #[source]
        source: ParseExpressionError
    },

    #[error("problem '{name}': {source}")]
    IntegrationError {
        name: String,
        #[source]
        source: IntegrationError
    }
}

pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, ManagerError> where
    T: for<'a> Deserialize<'a> {
    serde_json::from_value(json_value).map_err(ManagerError::JsonParseError)
}
