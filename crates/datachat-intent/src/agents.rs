//! Downstream answer agents
//!
//! The agents themselves (prompting, model calls) live outside this crate.
//! The dispatcher only sees these traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Answer, AnswerType, Table};

/// Answers questions from uploaded documents. Always produces text.
#[async_trait]
pub trait DocumentAgent: Send + Sync {
    /// Answer `question` from the document store
    ///
    /// # Errors
    ///
    /// Returns an error if the agent fails to produce an answer
    async fn answer(&self, question: &str) -> Result<Answer>;
}

/// Answers questions over uploaded tabular data
#[async_trait]
pub trait TableAgent: Send + Sync {
    /// Answer `question` over `table`
    ///
    /// # Arguments
    ///
    /// * `table` - The uploaded data
    /// * `question` - The raw user question
    /// * `answer_type` - Whether a chart or plain text is requested
    /// * `wants_prediction` - Whether the question asks for a forecast
    ///
    /// # Errors
    ///
    /// Returns an error if the agent fails to produce an answer
    async fn answer(
        &self,
        table: &Table,
        question: &str,
        answer_type: AnswerType,
        wants_prediction: bool,
    ) -> Result<Answer>;
}
