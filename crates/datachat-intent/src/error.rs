//! Error types for intent classification and dispatch

use thiserror::Error;

/// Errors raised by a morphological tokenizer
///
/// These are always recoverable: the matcher collapses them into a
/// "no match" result and never surfaces them to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// Input exceeds the analyzer's length limit
    #[error("input too long ({0} > {1} characters)")]
    InputTooLong(usize, usize),

    /// Input contains characters the analyzer cannot segment
    #[error("cannot segment input: {0}")]
    Unsegmentable(String),

    /// Lexicon could not be read or parsed
    #[error("lexicon error: {0}")]
    Lexicon(String),
}

impl TokenizeError {
    /// Create a new Unsegmentable error
    pub fn unsegmentable(reason: impl Into<String>) -> Self {
        Self::Unsegmentable(reason.into())
    }

    /// Create a new Lexicon error
    pub fn lexicon(reason: impl Into<String>) -> Self {
        Self::Lexicon(reason.into())
    }
}

/// Errors returned by the downstream answer agents
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    /// Agent execution failed
    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),

    /// Agent is not reachable or not configured
    #[error("Agent unavailable: {0}")]
    Unavailable(String),

    /// Agent rejected its input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AgentError {
    /// Create a new ExecutionFailed error
    pub fn execution_failed(reason: impl Into<String>) -> Self {
        Self::ExecutionFailed(reason.into())
    }

    /// Create a new Unavailable error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// Create a new InvalidInput error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

/// Errors raised while loading uploaded tabular data
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Load error: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not usable
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configured lexicon file could not be loaded
    #[error(transparent)]
    Lexicon(#[from] TokenizeError),
}

/// Errors surfaced by [`Dispatcher::generate`](crate::dispatcher::Dispatcher::generate)
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Failure inside a delegated agent, propagated unchanged
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Failure while loading the tabular data
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;
