//! Routes a question to the document or table agent

use std::sync::Arc;

use crate::agents::{DocumentAgent, TableAgent};
use crate::error::{AgentError, DispatchError};
use crate::filters::IntentClassifier;
use crate::models::{Answer, AnswerType, Table};
use crate::storage::TableStore;

/// Chooses the answering agent and its flags for each question
///
/// Holds no per-request state; concurrent calls are independent as long as
/// the agents and the tokenizer are.
#[derive(Clone)]
pub struct Dispatcher {
    classifier: IntentClassifier,
    document_agent: Arc<dyn DocumentAgent>,
    table_agent: Arc<dyn TableAgent>,
    store: Arc<dyn TableStore>,
}

impl Dispatcher {
    pub fn new(
        classifier: IntentClassifier,
        document_agent: Arc<dyn DocumentAgent>,
        table_agent: Arc<dyn TableAgent>,
        store: Arc<dyn TableStore>,
    ) -> Self {
        Self {
            classifier,
            document_agent,
            table_agent,
            store,
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Load the uploaded table, if any, and answer `question`
    pub async fn generate(&self, question: &str) -> Result<Answer, DispatchError> {
        tracing::info!(question, "received question");
        let table = self.store.load_table()?;
        Ok(self.route(question, table.as_ref()).await?)
    }

    /// Answer `question`, using `table` when one is uploaded.
    ///
    /// Without a table the document agent answers and no filter runs. With a
    /// table the visualization filter picks the answer type and the
    /// prediction filter sets the forecast flag for the table agent. Agent
    /// errors are returned unchanged.
    pub async fn decide(&self, question: &str, table: Option<&Table>) -> Result<Answer, AgentError> {
        tracing::info!(question, "received question");
        self.route(question, table).await
    }

    async fn route(&self, question: &str, table: Option<&Table>) -> Result<Answer, AgentError> {
        let answer = match table {
            None => self.document_agent.answer(question).await?,
            Some(table) => {
                let decision = self.classifier.classify(question, true);
                let answer_type = decision.answer_type();
                if answer_type == AnswerType::Chart {
                    tracing::info!("visualization request detected");
                }
                self.table_agent
                    .answer(table, question, answer_type, decision.wants_prediction)
                    .await?
            }
        };

        tracing::info!(answer = %answer.message, "generated answer");
        Ok(answer)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}
