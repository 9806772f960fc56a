//! The module contains the errors the engine can throw.
//!
//! The errors map onto four caller-facing classes:
//!
//! - not found: [`KeyNotFound`], [`NothingToRemove`]
//! - forbidden: [`Forbidden`]
//! - conflict: [`ExistingKey`], [`StaleWrite`]
//! - validation: [`InvalidAmount`], [`InvalidInput`], [`InvalidId`]
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`NothingToRemove`]: EngineError::NothingToRemove
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`StaleWrite`]: EngineError::StaleWrite
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`InvalidId`]: EngineError::InvalidId
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Nothing to remove: {0}")]
    NothingToRemove(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Stale write: {0}")]
    StaleWrite(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::NothingToRemove(a), Self::NothingToRemove(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::StaleWrite(a), Self::StaleWrite(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
