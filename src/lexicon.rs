// src/lexicon.rs
//! Static word tables shared by every component.
//!
//! The tables ship embedded in the binary (`data/`) and are parsed once into a
//! [`Lexicons`] value that the runtime hands out behind an `Arc`. Nothing
//! mutates them after construction, so concurrent analyses share them freely.
//! A deployment may point `lexicon_dir` at its own copies; any file missing
//! there falls back to the embedded one.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::emotion::EmotionCategory;
use crate::error::{AnalysisError, Result};

const EMOTION_KEYWORDS_FILE: &str = "emotion_keywords.json";
const REWRITE_TABLES_FILE: &str = "rewrite_tables.json";
const POLARITY_LEXICON_FILE: &str = "polarity_lexicon.json";
const STOPWORDS_FILE: &str = "stopwords_en.txt";
const VOCABULARY_FILE: &str = "english_vocabulary.txt";

static EMBEDDED_EMOTION_KEYWORDS: &str = include_str!("../data/emotion_keywords.json");
static EMBEDDED_REWRITE_TABLES: &str = include_str!("../data/rewrite_tables.json");
static EMBEDDED_POLARITY_LEXICON: &str = include_str!("../data/polarity_lexicon.json");
static EMBEDDED_STOPWORDS: &str = include_str!("../data/stopwords_en.txt");
static EMBEDDED_VOCABULARY: &str = include_str!("../data/english_vocabulary.txt");

/// Code → display name of every language the identifier may report.
const SUPPORTED_LANGUAGES: [(&str, &str); 12] = [
    ("en", "English"),
    ("tr", "Turkish"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ar", "Arabic"),
    ("zh-cn", "Chinese (Simplified)"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
];

pub const FALLBACK_LANGUAGE_CODE: &str = "en";
pub const FALLBACK_LANGUAGE_NAME: &str = "English (Default)";

/// Every table the pipeline and the improver read from.
#[derive(Debug, Clone)]
pub struct Lexicons {
    pub emotions: EmotionKeywordTable,
    pub negative_to_positive: RewriteTable,
    pub common_expressions: RewriteTable,
    pub polarity: PolarityLexicon,
    pub stop_words: HashSet<String>,
    pub vocabulary: Vocabulary,
    pub languages: SupportedLanguageSet,
}

impl Lexicons {
    /// Tables compiled into the binary.
    pub fn builtin() -> Self {
        Self::from_sources(
            EMBEDDED_EMOTION_KEYWORDS,
            EMBEDDED_REWRITE_TABLES,
            EMBEDDED_POLARITY_LEXICON,
            EMBEDDED_STOPWORDS,
            EMBEDDED_VOCABULARY,
        )
        .expect("valid embedded lexicons")
    }

    /// Load tables from `dir`, using the embedded copy for any missing file.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let read = |name: &str, embedded: &'static str| -> Result<String> {
            let path = dir.join(name);
            if !path.exists() {
                return Ok(embedded.to_string());
            }
            fs::read_to_string(&path)
                .map_err(|e| AnalysisError::lexicon(format!("reading {}: {e}", path.display())))
        };

        Self::from_sources(
            &read(EMOTION_KEYWORDS_FILE, EMBEDDED_EMOTION_KEYWORDS)?,
            &read(REWRITE_TABLES_FILE, EMBEDDED_REWRITE_TABLES)?,
            &read(POLARITY_LEXICON_FILE, EMBEDDED_POLARITY_LEXICON)?,
            &read(STOPWORDS_FILE, EMBEDDED_STOPWORDS)?,
            &read(VOCABULARY_FILE, EMBEDDED_VOCABULARY)?,
        )
    }

    fn from_sources(
        emotions: &str,
        rewrites: &str,
        polarity: &str,
        stop_words: &str,
        vocabulary: &str,
    ) -> Result<Self> {
        let emotions = EmotionKeywordTable::parse(emotions)?;
        let RewriteFile {
            negative_to_positive,
            common_expressions,
        } = serde_json::from_str(rewrites)
            .map_err(|e| AnalysisError::lexicon(format!("{REWRITE_TABLES_FILE}: {e}")))?;
        let polarity = PolarityLexicon::parse(polarity)?;
        let stop_words: HashSet<String> = stop_words
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_lowercase)
            .collect();

        // Spelling correction must never "fix" a word another table knows.
        // Extra words rank after the list, sorted so ties stay deterministic.
        let mut extra: Vec<&str> = stop_words
            .iter()
            .map(String::as_str)
            .chain(polarity.words.keys().map(String::as_str))
            .chain(emotions.all_words())
            .chain(negative_to_positive.en.words())
            .chain(common_expressions.en.words())
            .collect();
        extra.sort_unstable();
        let mut vocabulary = Vocabulary::parse(vocabulary);
        vocabulary.extend(extra);

        Ok(Self {
            emotions,
            negative_to_positive,
            common_expressions,
            polarity,
            stop_words,
            vocabulary,
            languages: SupportedLanguageSet::default(),
        })
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

/* ----------------------------
Emotion keywords
---------------------------- */

#[derive(Debug, Deserialize)]
struct EmotionKeywordsFile {
    happiness: Vec<String>,
    sadness: Vec<String>,
    anger: Vec<String>,
    fear: Vec<String>,
    surprise: Vec<String>,
}

/// Bilingual emotion → word set mapping. One set per category; a word may
/// belong to several categories.
#[derive(Debug, Clone)]
pub struct EmotionKeywordTable {
    sets: [HashSet<String>; 5],
}

impl EmotionKeywordTable {
    fn parse(raw: &str) -> Result<Self> {
        let f: EmotionKeywordsFile = serde_json::from_str(raw)
            .map_err(|e| AnalysisError::lexicon(format!("{EMOTION_KEYWORDS_FILE}: {e}")))?;
        let set = |v: Vec<String>| v.into_iter().map(|w| w.to_lowercase()).collect();
        Ok(Self {
            sets: [
                set(f.happiness),
                set(f.sadness),
                set(f.anger),
                set(f.fear),
                set(f.surprise),
            ],
        })
    }

    pub fn contains(&self, category: EmotionCategory, word: &str) -> bool {
        self.sets[category.index()].contains(word)
    }

    /// Categories that list `word`, in declaration order.
    pub fn categories_of<'a>(&'a self, word: &'a str) -> impl Iterator<Item = EmotionCategory> + 'a {
        EmotionCategory::ALL
            .into_iter()
            .filter(move |c| self.contains(*c, word))
    }

    fn all_words(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().flatten().map(String::as_str)
    }
}

/* ----------------------------
Rewrite tables
---------------------------- */

#[derive(Debug, Deserialize)]
struct RewriteFile {
    negative_to_positive: RewriteTable,
    common_expressions: RewriteTable,
}

/// Word → ordered alternatives, one map per rewrite language.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewriteTable {
    #[serde(default)]
    pub en: WordAlternatives,
    #[serde(default)]
    pub tr: WordAlternatives,
}

impl RewriteTable {
    /// Turkish gets its own table; every other language reads the English one.
    pub fn for_language(&self, lang: &str) -> &WordAlternatives {
        match lang {
            "tr" => &self.tr,
            _ => &self.en,
        }
    }

    /// Look a word up in every language's table, English first.
    pub fn lookup_any(&self, word: &str) -> Option<&[String]> {
        self.en.get(word).or_else(|| self.tr.get(word))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct WordAlternatives(HashMap<String, Vec<String>>);

impl WordAlternatives {
    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.0.get(word).map(Vec::as_slice)
    }

    fn words(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .flat_map(|(k, alts)| std::iter::once(k).chain(alts.iter()))
            .map(String::as_str)
    }
}

/* ----------------------------
Polarity lexicon
---------------------------- */

#[derive(Debug, Deserialize)]
struct PolarityFile {
    words: HashMap<String, (f64, f64)>,
    #[serde(default)]
    intensifiers: HashMap<String, f64>,
    #[serde(default)]
    negators: Vec<String>,
}

/// Word → (polarity, subjectivity), plus modifier words.
#[derive(Debug, Clone, Default)]
pub struct PolarityLexicon {
    pub words: HashMap<String, (f64, f64)>,
    pub intensifiers: HashMap<String, f64>,
    pub negators: HashSet<String>,
}

impl PolarityLexicon {
    fn parse(raw: &str) -> Result<Self> {
        let f: PolarityFile = serde_json::from_str(raw)
            .map_err(|e| AnalysisError::lexicon(format!("{POLARITY_LEXICON_FILE}: {e}")))?;
        Ok(Self {
            words: f
                .words
                .into_iter()
                .map(|(w, (p, s))| (w.to_lowercase(), (p.clamp(-1.0, 1.0), s.clamp(0.0, 1.0))))
                .collect(),
            intensifiers: f.intensifiers,
            negators: f.negators.into_iter().collect(),
        })
    }
}

/* ----------------------------
Vocabulary
---------------------------- */

/// Known English words ordered by rank (lower = more common).
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ranked: Vec<String>,
    rank: HashMap<String, usize>,
}

impl Vocabulary {
    fn parse(raw: &str) -> Self {
        let mut v = Self::default();
        v.extend(raw.split_whitespace());
        v
    }

    /// Append alphabetic words not seen yet; earlier words keep their rank.
    fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        for w in words {
            let w = w.trim().to_lowercase();
            if w.is_empty() || !w.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            if !self.rank.contains_key(&w) {
                self.rank.insert(w.clone(), self.ranked.len());
                self.ranked.push(w);
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.rank.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Words in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().map(String::as_str)
    }
}

/* ----------------------------
Supported languages
---------------------------- */

/// The only codes the Language Identifier may report.
#[derive(Debug, Clone)]
pub struct SupportedLanguageSet {
    names: HashMap<&'static str, &'static str>,
}

impl Default for SupportedLanguageSet {
    fn default() -> Self {
        Self {
            names: SUPPORTED_LANGUAGES.into_iter().collect(),
        }
    }
}

impl SupportedLanguageSet {
    pub fn name(&self, code: &str) -> Option<&'static str> {
        self.names.get(code).copied()
    }

    /// (code, name) pairs in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        SUPPORTED_LANGUAGES.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_load() {
        let lx = Lexicons::builtin();
        assert!(lx.emotions.contains(EmotionCategory::Happiness, "happy"));
        assert!(lx.emotions.contains(EmotionCategory::Sadness, "üzgün"));
        assert_eq!(
            lx.negative_to_positive.lookup_any("terrible").map(|a| a[0].as_str()),
            Some("excellent")
        );
        assert_eq!(
            lx.negative_to_positive.lookup_any("kötü").map(|a| a[0].as_str()),
            Some("iyi")
        );
        assert!(lx.is_stop_word("the"));
        assert!(!lx.is_stop_word("love"));
        assert!(lx.vocabulary.contains("wonderful"));
        assert_eq!(lx.languages.name("zh-cn"), Some("Chinese (Simplified)"));
        assert_eq!(lx.languages.iter().count(), 12);
    }

    #[test]
    fn vocabulary_covers_everyday_english() {
        let lx = Lexicons::builtin();
        assert!(lx.vocabulary.len() > 30_000);
        for w in ["sofa", "guitar", "jazz", "sleeps", "plays", "neighbours", "colour"] {
            assert!(lx.vocabulary.contains(w), "{w} missing");
        }
        let rank = |w: &str| lx.vocabulary.iter().position(|v| v == w);
        assert!(rank("have") < rank("hive"));
    }

    #[test]
    fn rewrite_table_language_fallback() {
        let lx = Lexicons::builtin();
        let t = &lx.common_expressions;
        assert!(t.for_language("tr").get("iyi").is_some());
        assert!(t.for_language("de").get("good").is_some());
        assert!(t.for_language("de").get("iyi").is_none());
    }

    #[test]
    fn word_in_several_categories_reports_all() {
        let raw = r#"{"happiness":["wow"],"sadness":[],"anger":[],"fear":[],"surprise":["wow"]}"#;
        let t = EmotionKeywordTable::parse(raw).unwrap();
        let cats: Vec<_> = t.categories_of("wow").collect();
        assert_eq!(cats, vec![EmotionCategory::Happiness, EmotionCategory::Surprise]);
    }

    #[test]
    fn dir_override_falls_back_per_file() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(EMOTION_KEYWORDS_FILE),
            r#"{"happiness":["yay"],"sadness":[],"anger":[],"fear":[],"surprise":[]}"#,
        )
        .unwrap();
        let lx = Lexicons::from_dir(tmp.path()).unwrap();
        assert!(lx.emotions.contains(EmotionCategory::Happiness, "yay"));
        assert!(!lx.emotions.contains(EmotionCategory::Happiness, "happy"));
        // untouched files come from the embedded copies
        assert!(lx.polarity.words.contains_key("terrible"));
    }

    #[test]
    fn malformed_table_is_a_lexicon_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(POLARITY_LEXICON_FILE), "{ nope").unwrap();
        let err = Lexicons::from_dir(tmp.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::Lexicon(_)));
    }
}
