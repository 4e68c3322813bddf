//! Intent classification and answer dispatch for data chat questions
//!
//! A question is split into morphemes, matched against small noun/verb
//! dictionaries, and routed to one of two answer agents:
//!
//! - **Tokenizer**: splits text into `(lemma, part-of-speech)` tokens
//! - **LemmaMatcher**: checks tokens against an [`IntentDictionary`], requiring
//!   each lemma to carry the tag it is listed under
//! - **IntentClassifier**: the visualization and prediction filters
//! - **Dispatcher**: sends the question to the document agent, or to the table
//!   agent with the answer type and forecast flag
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use datachat_intent::{Dispatcher, IntentClassifier, InMemoryTableStore};
//!
//! let dispatcher = Dispatcher::new(
//!     IntentClassifier::with_defaults(),
//!     Arc::new(my_document_agent),
//!     Arc::new(my_table_agent),
//!     Arc::new(InMemoryTableStore::empty()),
//! );
//! let answer = dispatcher.generate("이 데이터를 차트로 보여줘").await?;
//! ```

pub mod agents;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod filters;
pub mod matcher;
pub mod models;
pub mod storage;
pub mod tokenizer;

pub use agents::{DocumentAgent, TableAgent};
pub use self::config::IntentConfig;
pub use dispatcher::Dispatcher;
pub use error::{AgentError, ConfigError, DispatchError, StorageError, TokenizeError};
pub use filters::{IntentClassifier, IntentFilter, IntentKind};
pub use matcher::{IntentDictionary, LemmaMatcher};
pub use models::{Answer, AnswerType, DispatchDecision, PosTag, Table, Token};
pub use storage::{CsvTableStore, InMemoryTableStore, TableStore};
pub use tokenizer::{Lexicon, LexiconTokenizer, TokenizeOptions, Tokenizer, Tokens};
