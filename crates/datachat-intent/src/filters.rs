//! Visualization and prediction intent filters

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matcher::{IntentDictionary, LemmaMatcher};
use crate::models::DispatchDecision;
use crate::tokenizer::{LexiconTokenizer, Tokenizer};

/// analysis, visual, chart, visualization, statistics, trend, change, summary, generate, insight
pub const VISUALIZATION_NOUNS: &[&str] = &[
    "분석", "시각", "차트", "시각화", "통계", "동향", "변화", "요약", "생성", "인사이트",
];

/// see, draw, generate, show, make
pub const VISUALIZATION_VERBS: &[&str] = &["보다", "그리다", "생성하다", "보여주다", "만들다"];

/// forecast, predict
pub const PREDICTION_NOUNS: &[&str] = &["예상", "예측"];

pub const PREDICTION_VERBS: &[&str] = &[];

/// The user intents detected in a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Visualization,
    Prediction,
}

/// A named dictionary configuration over the lemma matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentFilter {
    pub kind: IntentKind,
    pub dictionary: IntentDictionary,
}

impl IntentFilter {
    pub fn new(kind: IntentKind, dictionary: IntentDictionary) -> Self {
        Self { kind, dictionary }
    }

    /// Requests for a chart or other visual summary
    pub fn visualization() -> Self {
        Self::new(
            IntentKind::Visualization,
            IntentDictionary::new(
                VISUALIZATION_NOUNS.iter().copied(),
                VISUALIZATION_VERBS.iter().copied(),
            ),
        )
    }

    /// Requests for a forecast
    pub fn prediction() -> Self {
        Self::new(
            IntentKind::Prediction,
            IntentDictionary::new(
                PREDICTION_NOUNS.iter().copied(),
                PREDICTION_VERBS.iter().copied(),
            ),
        )
    }

    pub fn apply(&self, matcher: &LemmaMatcher, text: &str) -> bool {
        let matched = matcher.matches(text, &self.dictionary);
        tracing::debug!(intent = ?self.kind, matched, "intent filter evaluated");
        matched
    }
}

/// Evaluates the visualization and prediction filters for a question
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    matcher: LemmaMatcher,
    visualization: IntentFilter,
    prediction: IntentFilter,
}

impl IntentClassifier {
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        visualization: IntentFilter,
        prediction: IntentFilter,
    ) -> Self {
        Self {
            matcher: LemmaMatcher::new(tokenizer),
            visualization,
            prediction,
        }
    }

    /// Default filters over the given tokenizer
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self::new(
            tokenizer,
            IntentFilter::visualization(),
            IntentFilter::prediction(),
        )
    }

    /// Default filters over the built-in Korean lexicon
    pub fn with_defaults() -> Self {
        Self::with_tokenizer(Arc::new(LexiconTokenizer::korean()))
    }

    pub fn is_visualization(&self, text: &str) -> bool {
        self.visualization.apply(&self.matcher, text)
    }

    pub fn is_prediction(&self, text: &str) -> bool {
        self.prediction.apply(&self.matcher, text)
    }

    /// Routing decision for `text`. Filters only run when tabular data exists.
    pub fn classify(&self, text: &str, has_tabular_data: bool) -> DispatchDecision {
        if !has_tabular_data {
            return DispatchDecision::default();
        }
        DispatchDecision {
            has_tabular_data,
            wants_visualization: self.is_visualization(text),
            wants_prediction: self.is_prediction(text),
        }
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        self.matcher.tokenizer()
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerType;

    #[test]
    fn test_default_vocabularies_do_not_overlap() {
        assert!(IntentFilter::visualization()
            .dictionary
            .overlapping_lemmas()
            .is_empty());
        assert!(IntentFilter::prediction().dictionary.verbs.is_empty());
    }

    #[test]
    fn test_show_request_is_visualization() {
        let classifier = IntentClassifier::with_defaults();
        assert!(classifier.is_visualization("이 데이터를 차트로 보여줘"));
        assert!(!classifier.is_prediction("이 데이터를 차트로 보여줘"));
    }

    #[test]
    fn test_verb_alone_triggers_visualization() {
        let classifier = IntentClassifier::with_defaults();
        assert!(classifier.is_visualization("매출 그려줘"));
        assert!(classifier.is_visualization("고객 데이터로 그래프 만들어줘"));
    }

    #[test]
    fn test_comparison_question_is_not_visualization() {
        let classifier = IntentClassifier::with_defaults();
        let decision = classifier.classify("올해 매출이 작년보다 높아?", true);
        assert!(!decision.wants_visualization);
        assert_eq!(decision.answer_type(), AnswerType::Text);
        assert!(!classifier.is_visualization("이번 달 가격이 지난달보다 얼마나 올랐어?"));
        assert!(classifier.is_visualization("매출 추이를 보다"));
    }

    #[test]
    fn test_forecast_request_is_prediction() {
        let classifier = IntentClassifier::with_defaults();
        assert!(classifier.is_prediction("내년 매출을 예측해줘"));
        assert!(!classifier.is_visualization("내년 매출을 예측해줘"));
    }

    #[test]
    fn test_both_intents_can_hold() {
        let classifier = IntentClassifier::with_defaults();
        let decision = classifier.classify("판매량 예상 결과를 시각화해줘", true);
        assert!(decision.wants_visualization);
        assert!(decision.wants_prediction);
        assert_eq!(decision.answer_type(), AnswerType::Chart);
    }

    #[test]
    fn test_without_table_filters_are_skipped() {
        let classifier = IntentClassifier::with_defaults();
        let decision = classifier.classify("내년 매출 예측 차트를 보여줘", false);
        assert_eq!(decision, DispatchDecision::default());
        assert_eq!(decision.answer_type(), AnswerType::Text);
    }

    #[test]
    fn test_unsegmentable_input_classifies_as_plain_text() {
        let classifier = IntentClassifier::with_defaults();
        let decision = classifier.classify("차트\u{0000}예측", true);
        assert!(decision.has_tabular_data);
        assert!(!decision.wants_visualization);
        assert!(!decision.wants_prediction);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let classifier = IntentClassifier::with_defaults();
        let first = classifier.classify("작년 동향 요약해줘", true);
        let second = classifier.classify("작년 동향 요약해줘", true);
        assert_eq!(first, second);
        assert!(first.wants_visualization);
    }
}
