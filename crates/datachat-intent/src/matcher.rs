//! Lemma dictionary matching with part-of-speech disambiguation

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{PosTag, Token};
use crate::tokenizer::{TokenizeOptions, Tokenizer};

/// Lemmas that signal an intent, split by the tag they must carry
///
/// A token matches only when its lemma is in the set for its own tag: a noun
/// lemma must appear tagged [`PosTag::Noun`], a verb lemma tagged
/// [`PosTag::Verb`]. The two sets are checked independently, so a lemma listed
/// in both matches under either tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDictionary {
    #[serde(default)]
    pub nouns: HashSet<String>,
    #[serde(default)]
    pub verbs: HashSet<String>,
}

impl IntentDictionary {
    pub fn new<N, V>(nouns: N, verbs: V) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            nouns: nouns.into_iter().map(Into::into).collect(),
            verbs: verbs.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `lemma` is expected with `tag`
    pub fn expects(&self, lemma: &str, tag: PosTag) -> bool {
        match tag {
            PosTag::Noun => self.nouns.contains(lemma),
            PosTag::Verb => self.verbs.contains(lemma),
            _ => false,
        }
    }

    /// Lemmas listed as both noun and verb
    pub fn overlapping_lemmas(&self) -> Vec<&str> {
        let mut overlap: Vec<&str> = self
            .nouns
            .intersection(&self.verbs)
            .map(String::as_str)
            .collect();
        overlap.sort_unstable();
        overlap
    }

    pub fn is_empty(&self) -> bool {
        self.nouns.is_empty() && self.verbs.is_empty()
    }

    /// True on the first token whose lemma is expected with its tag
    pub fn matches_tokens<I>(&self, tokens: I) -> bool
    where
        I: IntoIterator<Item = Token>,
    {
        tokens
            .into_iter()
            .any(|token| self.expects(&token.lemma, token.tag))
    }
}

/// Runs an [`IntentDictionary`] against raw text
#[derive(Clone)]
pub struct LemmaMatcher {
    tokenizer: Arc<dyn Tokenizer>,
}

impl LemmaMatcher {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Whether `text` contains a lemma from `dictionary` at its required tag.
    ///
    /// A tokenizer failure is logged and treated as no match.
    pub fn matches(&self, text: &str, dictionary: &IntentDictionary) -> bool {
        match self.tokenizer.tokenize(text, TokenizeOptions::lemmatized()) {
            Ok(tokens) => dictionary.matches_tokens(tokens),
            Err(e) => {
                tracing::warn!(error = %e, "failed to split input into morphemes");
                false
            }
        }
    }
}

impl std::fmt::Debug for LemmaMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaMatcher").finish_non_exhaustive()
    }
}
