//! Morphological tokenizer interface and a lexicon-driven implementation
//!
//! The classifier only depends on the [`Tokenizer`] trait. [`LexiconTokenizer`]
//! is a deterministic analyzer backed by a surface-form lexicon; it is what the
//! CLI and the tests run against, and any external analyzer can be plugged in
//! behind the same trait.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::error::TokenizeError;
use crate::models::{PosTag, Token};

use PosTag::{Adjective, Josa, Noun, Suffix, Verb};

/// Default limit on the number of characters accepted by [`LexiconTokenizer`]
pub const DEFAULT_MAX_INPUT_CHARS: usize = 2048;

/// Lazy, finite, single-pass sequence of tokens
pub type Tokens<'a> = Box<dyn Iterator<Item = Token> + Send + 'a>;

/// Analyzer options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenizeOptions {
    /// Normalize the input (Unicode NFKC, lowercase) before segmentation
    pub normalize: bool,
    /// Emit dictionary base forms instead of surface forms
    pub stem: bool,
}

impl TokenizeOptions {
    /// Normalized base forms, as requested by the intent matcher
    pub fn lemmatized() -> Self {
        Self {
            normalize: true,
            stem: true,
        }
    }
}

/// Splits text into (lemma, part-of-speech) pairs
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenizeError`] when the input cannot be segmented.
    fn tokenize(&self, text: &str, options: TokenizeOptions) -> Result<Tokens<'_>, TokenizeError>;
}

/// Analysis attached to a surface form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexEntry {
    pub lemma: String,
    pub tag: PosTag,
}

/// Surface form → analyses map
///
/// A surface form may carry several readings (the comparative particle 보다
/// and the verb 보다); the segmenter picks one from the surrounding tokens.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<LexEntry>>,
    /// Longest surface form, in characters
    max_surface_chars: usize,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reading for `surface`, replacing an existing reading with the same tag
    pub fn insert(&mut self, surface: &str, lemma: &str, tag: PosTag) {
        let surface: String = surface.nfkc().collect::<String>().to_lowercase();
        if surface.is_empty() {
            return;
        }
        self.max_surface_chars = self.max_surface_chars.max(surface.chars().count());
        let entry = LexEntry {
            lemma: lemma.to_string(),
            tag,
        };
        let readings = self.entries.entry(surface).or_default();
        match readings.iter_mut().find(|reading| reading.tag == tag) {
            Some(existing) => *existing = entry,
            None => readings.push(entry),
        }
    }

    /// First reading of `surface`
    pub fn get(&self, surface: &str) -> Option<&LexEntry> {
        self.readings(surface).first()
    }

    /// All readings of `surface`, in insertion order
    pub fn readings(&self, surface: &str) -> &[LexEntry] {
        self.entries.get(surface).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct surface forms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a lexicon from a tab-separated file: `surface<TAB>lemma<TAB>tag`.
    /// Lines starting with `#` are comments.
    pub fn from_tsv_path(path: impl AsRef<Path>) -> Result<Self, TokenizeError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| TokenizeError::lexicon(format!("{}: {}", path.display(), e)))?;
        Self::from_tsv_reader(file)
    }

    /// Load a lexicon from any reader in the TSV format of [`Lexicon::from_tsv_path`]
    pub fn from_tsv_reader<R: Read>(reader: R) -> Result<Self, TokenizeError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut lexicon = Self::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| TokenizeError::lexicon(e.to_string()))?;
            if record.len() != 3 {
                return Err(TokenizeError::lexicon(format!(
                    "record {} has {} fields, expected 3",
                    line + 1,
                    record.len()
                )));
            }
            lexicon.insert(&record[0], &record[1], PosTag::from_label(&record[2]));
        }
        Ok(lexicon)
    }

    /// Built-in Korean vocabulary covering common data-analysis questions
    pub fn korean_default() -> Self {
        let mut lexicon = Self::new();
        for (surface, lemma, tag) in KOREAN_ENTRIES {
            lexicon.insert(surface, lemma, *tag);
        }
        lexicon
    }
}

const KOREAN_ENTRIES: &[(&str, &str, PosTag)] = &[
    // nouns
    ("데이터", "데이터", Noun),
    ("차트", "차트", Noun),
    ("그래프", "그래프", Noun),
    ("매출", "매출", Noun),
    ("가격", "가격", Noun),
    ("판매량", "판매량", Noun),
    ("수익", "수익", Noun),
    ("고객", "고객", Noun),
    ("지역", "지역", Noun),
    ("내년", "내년", Noun),
    ("올해", "올해", Noun),
    ("작년", "작년", Noun),
    ("월", "월", Noun),
    ("추이", "추이", Noun),
    ("결과", "결과", Noun),
    ("문서", "문서", Noun),
    ("내용", "내용", Noun),
    ("파일", "파일", Noun),
    ("예측", "예측", Noun),
    ("예상", "예상", Noun),
    ("분석", "분석", Noun),
    ("시각", "시각", Noun),
    ("시각화", "시각화", Noun),
    ("통계", "통계", Noun),
    ("동향", "동향", Noun),
    ("변화", "변화", Noun),
    ("요약", "요약", Noun),
    ("생성", "생성", Noun),
    ("인사이트", "인사이트", Noun),
    // particles
    ("보다", "보다", Josa),
    ("을", "을", Josa),
    ("를", "를", Josa),
    ("이", "이", Josa),
    ("가", "가", Josa),
    ("은", "은", Josa),
    ("는", "는", Josa),
    ("의", "의", Josa),
    ("에", "에", Josa),
    ("에서", "에서", Josa),
    ("로", "로", Josa),
    ("으로", "으로", Josa),
    ("와", "와", Josa),
    ("과", "과", Josa),
    ("도", "도", Josa),
    ("만", "만", Josa),
    ("부터", "부터", Josa),
    ("까지", "까지", Josa),
    // verbs
    ("보다", "보다", Verb),
    ("봐", "보다", Verb),
    ("봐줘", "보다", Verb),
    ("볼래", "보다", Verb),
    ("보여주다", "보여주다", Verb),
    ("보여줘", "보여주다", Verb),
    ("보여줘요", "보여주다", Verb),
    ("보여주세요", "보여주다", Verb),
    ("보여줄래", "보여주다", Verb),
    ("그리다", "그리다", Verb),
    ("그려", "그리다", Verb),
    ("그려줘", "그리다", Verb),
    ("그려주세요", "그리다", Verb),
    ("만들다", "만들다", Verb),
    ("만들어", "만들다", Verb),
    ("만들어줘", "만들다", Verb),
    ("만들어주세요", "만들다", Verb),
    ("생성하다", "생성하다", Verb),
    ("하다", "하다", Verb),
    ("해", "하다", Verb),
    ("해줘", "해주다", Verb),
    ("해주세요", "해주다", Verb),
    ("해줄래", "해주다", Verb),
    ("알려줘", "알려주다", Verb),
    ("알려주세요", "알려주다", Verb),
    // adjectives
    ("좋은", "좋다", Adjective),
    ("많은", "많다", Adjective),
    ("높은", "높다", Adjective),
    ("낮은", "낮다", Adjective),
    // suffixes
    ("별", "별", Suffix),
    ("들", "들", Suffix),
];

/// Deterministic longest-match analyzer over a [`Lexicon`]
///
/// Each whitespace-separated word is segmented left to right by taking the
/// longest lexicon surface form at the current position. Characters without a
/// lexicon match are grouped into an unknown run and tagged as a noun;
/// punctuation runs are tagged [`PosTag::Other`].
///
/// When a surface form has several readings, a particle reading is chosen
/// only right after a noun inside the same word (작년보다 → 작년 + 보다/Josa);
/// anywhere else the first non-particle reading wins.
#[derive(Debug, Clone)]
pub struct LexiconTokenizer {
    lexicon: Lexicon,
    max_input_chars: usize,
}

impl LexiconTokenizer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    /// Analyzer over [`Lexicon::korean_default`]
    pub fn korean() -> Self {
        Self::new(Lexicon::korean_default())
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn validate(&self, text: &str) -> Result<(), TokenizeError> {
        let len = text.chars().count();
        if len > self.max_input_chars {
            return Err(TokenizeError::InputTooLong(len, self.max_input_chars));
        }
        if let Some(c) = text.chars().find(|c| c.is_control() && !c.is_whitespace()) {
            return Err(TokenizeError::unsegmentable(format!(
                "control character U+{:04X}",
                c as u32
            )));
        }
        Ok(())
    }
}

impl Default for LexiconTokenizer {
    fn default() -> Self {
        Self::korean()
    }
}

impl Tokenizer for LexiconTokenizer {
    fn tokenize(&self, text: &str, options: TokenizeOptions) -> Result<Tokens<'_>, TokenizeError> {
        self.validate(text)?;

        let chars: Vec<char> = if options.normalize {
            text.nfkc().collect::<String>().to_lowercase().chars().collect()
        } else {
            text.chars().collect()
        };

        Ok(Box::new(Segmenter {
            lexicon: &self.lexicon,
            chars,
            pos: 0,
            stem: options.stem,
            previous: None,
        }))
    }
}

struct Segmenter<'a> {
    lexicon: &'a Lexicon,
    chars: Vec<char>,
    pos: usize,
    stem: bool,
    /// Tag of the last token emitted in the current word
    previous: Option<PosTag>,
}

fn is_punctuation(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}

impl<'a> Segmenter<'a> {
    fn word_end(&self, from: usize) -> usize {
        self.chars[from..]
            .iter()
            .position(|c| c.is_whitespace())
            .map_or(self.chars.len(), |offset| from + offset)
    }

    /// Readings of the longest lexicon surface starting at `from` that stays
    /// inside the word
    fn longest_match(&self, from: usize, end: usize) -> Option<(usize, &'a [LexEntry])> {
        let lexicon = self.lexicon;
        let max_len = (end - from).min(lexicon.max_surface_chars);
        (1..=max_len).rev().find_map(|len| {
            let surface: String = self.chars[from..from + len].iter().collect();
            let readings = lexicon.readings(&surface);
            (!readings.is_empty()).then_some((len, readings))
        })
    }

    fn choose(&self, readings: &'a [LexEntry]) -> &'a LexEntry {
        let after_noun = self.previous == Some(PosTag::Noun);
        readings
            .iter()
            .find(|reading| (reading.tag == Josa) == after_noun)
            .unwrap_or(&readings[0])
    }

    fn surface(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }
}

impl Iterator for Segmenter<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
        if self.pos >= self.chars.len() {
            return None;
        }

        let start = self.pos;
        if start == 0 || self.chars[start - 1].is_whitespace() {
            self.previous = None;
        }
        let end = self.word_end(start);

        let token = if let Some((len, readings)) = self.longest_match(start, end) {
            let entry = self.choose(readings);
            self.pos = start + len;
            let lemma = if self.stem {
                entry.lemma.clone()
            } else {
                self.surface(start, start + len)
            };
            Token::new(lemma, entry.tag)
        } else if is_punctuation(self.chars[start]) {
            let mut cursor = start + 1;
            while cursor < end && is_punctuation(self.chars[cursor]) {
                cursor += 1;
            }
            self.pos = cursor;
            Token::new(self.surface(start, cursor), PosTag::Other)
        } else {
            let mut cursor = start + 1;
            while cursor < end
                && !is_punctuation(self.chars[cursor])
                && self.longest_match(cursor, end).is_none()
            {
                cursor += 1;
            }
            self.pos = cursor;
            Token::new(self.surface(start, cursor), PosTag::Noun)
        };

        self.previous = Some(token.tag);
        Some(token)
    }
}
