// Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use datachat_intent::{
    AnswerType, CsvTableStore, DispatchDecision, IntentConfig, TableStore, TokenizeOptions,
    Tokenizer,
};

/// Load configuration, applying the `--lexicon` override
pub fn load_config(path: Option<&Path>, lexicon: Option<PathBuf>) -> Result<IntentConfig> {
    let mut config = IntentConfig::load(path).context("failed to load configuration")?;
    if lexicon.is_some() {
        config.tokenizer.lexicon_path = lexicon;
    }
    Ok(config)
}

/// `lemma/Tag` pairs separated by spaces
pub fn tokenize(config: &IntentConfig, text: &str, stem: bool) -> Result<String> {
    let tokenizer = config.build_tokenizer()?;
    let options = TokenizeOptions {
        normalize: true,
        stem,
    };
    let tokens = tokenizer
        .tokenize(text, options)
        .context("failed to split input into morphemes")?;
    Ok(tokens
        .map(|token| format!("{}/{}", token.lemma, token.tag))
        .collect::<Vec<_>>()
        .join(" "))
}

#[derive(Debug, Serialize)]
struct ClassifyReport {
    #[serde(flatten)]
    decision: DispatchDecision,
    answer_type: AnswerType,
    agent: &'static str,
}

/// Routing decision for `text`. `table` overrides the configured table path.
pub fn classify(
    config: &IntentConfig,
    text: &str,
    table: Option<&Path>,
    json: bool,
) -> Result<String> {
    let store = table.map(CsvTableStore::new).or_else(|| config.table_store());
    let has_tabular_data = match store {
        Some(store) => store
            .load_table()
            .with_context(|| format!("failed to read table {}", store.path().display()))?
            .is_some(),
        None => false,
    };

    let classifier = config.build_classifier()?;
    let decision = classifier.classify(text, has_tabular_data);
    let report = ClassifyReport {
        decision,
        answer_type: decision.answer_type(),
        agent: if has_tabular_data { "table" } else { "document" },
    };

    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(format!(
        "agent: {}\nanswer_type: {:?}\nvisualization: {}\nprediction: {}",
        report.agent,
        report.answer_type,
        decision.wants_visualization,
        decision.wants_prediction
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sales_csv() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "month,sales").unwrap();
        writeln!(file, "1,100").unwrap();
        file
    }

    #[test]
    fn test_tokenize_formats_pairs() {
        let output = tokenize(&IntentConfig::default(), "차트로 보여줘", true).unwrap();
        assert_eq!(output, "차트/Noun 로/Josa 보여주다/Verb");
    }

    #[test]
    fn test_tokenize_surface_forms() {
        let output = tokenize(&IntentConfig::default(), "보여줘", false).unwrap();
        assert_eq!(output, "보여줘/Verb");
    }

    #[test]
    fn test_tokenize_reports_unsegmentable_input() {
        assert!(tokenize(&IntentConfig::default(), "\u{0007}", true).is_err());
    }

    #[test]
    fn test_classify_without_table_routes_to_documents() {
        let output = classify(&IntentConfig::default(), "차트로 보여줘", None, false).unwrap();
        assert!(output.contains("agent: document"));
        assert!(output.contains("answer_type: Text"));
    }

    #[test]
    fn test_classify_with_table_json() {
        let csv = sales_csv();
        let output = classify(
            &IntentConfig::default(),
            "내년 매출 예측 차트 그려줘",
            Some(csv.path()),
            true,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["agent"], "table");
        assert_eq!(value["answer_type"], "CHART");
        assert_eq!(value["has_tabular_data"], true);
        assert_eq!(value["wants_visualization"], true);
        assert_eq!(value["wants_prediction"], true);
    }

    #[test]
    fn test_classify_missing_table_file_means_documents() {
        let dir = tempfile::tempdir().unwrap();
        let output = classify(
            &IntentConfig::default(),
            "매출 요약",
            Some(&dir.path().join("none.csv")),
            false,
        )
        .unwrap();
        assert!(output.contains("agent: document"));
    }
}
