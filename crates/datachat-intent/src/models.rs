//! Data models shared by the tokenizer, matcher, and dispatcher

use serde::{Deserialize, Serialize};

/// Part-of-speech tag assigned to a token by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    Verb,
    /// Particle attached to a noun phrase (조사)
    Josa,
    Adjective,
    Suffix,
    /// Any analyzer tag outside the five above (punctuation, endings, ...)
    Other,
}

impl PosTag {
    /// Stable ordinal used for dictionary comparison. `Other` has none.
    pub fn ordinal(self) -> Option<u8> {
        match self {
            PosTag::Noun => Some(0),
            PosTag::Verb => Some(1),
            PosTag::Josa => Some(2),
            PosTag::Adjective => Some(3),
            PosTag::Suffix => Some(4),
            PosTag::Other => None,
        }
    }

    /// Parse an analyzer label. Unknown labels map to [`PosTag::Other`].
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Noun" => PosTag::Noun,
            "Verb" => PosTag::Verb,
            "Josa" => PosTag::Josa,
            "Adjective" => PosTag::Adjective,
            "Suffix" => PosTag::Suffix,
            _ => PosTag::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PosTag::Noun => "Noun",
            PosTag::Verb => "Verb",
            PosTag::Josa => "Josa",
            PosTag::Adjective => "Adjective",
            PosTag::Suffix => "Suffix",
            PosTag::Other => "Other",
        }
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single morpheme produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub lemma: String,
    pub tag: PosTag,
}

impl Token {
    pub fn new(lemma: impl Into<String>, tag: PosTag) -> Self {
        Self {
            lemma: lemma.into(),
            tag,
        }
    }
}

/// How the answer should be rendered by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnswerType {
    Text,
    Chart,
}

/// Answer produced by one of the downstream agents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub message: String,
    #[serde(rename = "type")]
    pub answer_type: AnswerType,
}

impl Answer {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            answer_type: AnswerType::Text,
        }
    }

    pub fn chart(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            answer_type: AnswerType::Chart,
        }
    }
}

/// Per-request routing decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DispatchDecision {
    pub has_tabular_data: bool,
    pub wants_visualization: bool,
    pub wants_prediction: bool,
}

impl DispatchDecision {
    /// Answer type requested from the table agent
    pub fn answer_type(&self) -> AnswerType {
        if self.wants_visualization {
            AnswerType::Chart
        } else {
            AnswerType::Text
        }
    }
}

/// Uploaded tabular data handed to the table agent
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_tag_ordinals_are_stable() {
        assert_eq!(PosTag::Noun.ordinal(), Some(0));
        assert_eq!(PosTag::Verb.ordinal(), Some(1));
        assert_eq!(PosTag::Josa.ordinal(), Some(2));
        assert_eq!(PosTag::Adjective.ordinal(), Some(3));
        assert_eq!(PosTag::Suffix.ordinal(), Some(4));
        assert_eq!(PosTag::Other.ordinal(), None);
    }

    #[test]
    fn test_pos_tag_from_label() {
        assert_eq!(PosTag::from_label("Noun"), PosTag::Noun);
        assert_eq!(PosTag::from_label(" Verb "), PosTag::Verb);
        assert_eq!(PosTag::from_label("Josa"), PosTag::Josa);
        assert_eq!(PosTag::from_label("Punctuation"), PosTag::Other);
        assert_eq!(PosTag::from_label("noun"), PosTag::Other);
    }

    #[test]
    fn test_answer_serializes_with_uppercase_type() {
        let answer = Answer::chart("매출 추이 차트");
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["type"], "CHART");
        assert_eq!(json["message"], "매출 추이 차트");

        let parsed: Answer =
            serde_json::from_str(r#"{"message":"ok","type":"TEXT"}"#).unwrap();
        assert_eq!(parsed, Answer::text("ok"));
    }

    #[test]
    fn test_decision_answer_type() {
        let mut decision = DispatchDecision {
            has_tabular_data: true,
            ..Default::default()
        };
        assert_eq!(decision.answer_type(), AnswerType::Text);
        decision.wants_visualization = true;
        assert_eq!(decision.answer_type(), AnswerType::Chart);
    }

    #[test]
    fn test_table_dimensions() {
        let table = Table::new(
            vec!["month".into(), "sales".into()],
            vec![vec!["1".into(), "100".into()]],
        );
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column_count(), 2);
        assert!(!table.is_empty());
        assert!(Table::default().is_empty());
    }
}
