use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use regex::bytes::Regex;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_WORD_THRESHOLD: f64 = 20.0;
pub const DEFAULT_LETTER_THRESHOLD: f64 = 85.0;

// Best single-byte key over 30+ random bytes stays below this; English
// columns score around 0.06 to 0.08.
const LETTER_FREQUENCY_FAIL_THRESHOLD: f64 = 0.045;

/// Letters (lower case) and space, most frequent first.
pub const RANKED_ALPHABET: &[u8] = b" etaoinshrdlcumwfgypbvkjxqz";

// From http://www.data-compression.com/english.html
const LETTER_FREQUENCIES: [f64; 26] = [
    0.0651738, 0.0124248, 0.0217339, 0.0349835, 0.1041442, 0.0197881, // f
    0.0158610, 0.0492888, 0.0558094, 0.0009033, 0.0050529, 0.0331490, // l
    0.0202124, 0.0564513, 0.0596302, 0.0137645, 0.0008606, 0.0497563, // r
    0.0515760, 0.0729357, 0.0225134, 0.0082903, 0.0171272, 0.0013692, // x
    0.0145984, 0.0007836, // z
];
const SPACE_FREQUENCY: f64 = 0.1918182;

pub trait Scorer {
    /// Higher means more English-like.
    fn score(&self, message: &[u8]) -> f64;

    fn is_plausible(&self, message: &[u8]) -> bool;

    /// Score for every n-th byte of a message, which holds no whole words.
    fn column_score(&self, column: &[u8]) -> f64 {
        self.score(column)
    }
}

/// How candidates are ranked. Scores of different strategies are on
/// different scales and never compared.
///
/// `WordRatio` only makes sense for whole messages. Columns of a
/// repeating-key ciphertext are scored with `LetterFrequency` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Share of tokens found in the dictionary, in `[0, 1]`.
    WordRatio,
    /// Mean English frequency per byte, in `[0, 0.19]`.
    LetterFrequency,
    /// Mean rank weight per byte, in `[-27, 27]`.
    RankFrequency,
}

impl Strategy {
    /// Scores at or below this mean nothing English-like was found.
    pub fn default_fail_threshold(self) -> f64 {
        match self {
            Strategy::WordRatio => 0.0,
            Strategy::LetterFrequency => LETTER_FREQUENCY_FAIL_THRESHOLD,
            Strategy::RankFrequency => -(RANKED_ALPHABET.len() as f64),
        }
    }

    pub fn column_strategy(self) -> Strategy {
        match self {
            Strategy::WordRatio => Strategy::LetterFrequency,
            other => other,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::LetterFrequency
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "words" | "word-ratio" => Ok(Strategy::WordRatio),
            "letters" | "letter-frequency" => Ok(Strategy::LetterFrequency),
            "rank" | "rank-frequency" => Ok(Strategy::RankFrequency),
            _ => Err(Error::UnknownStrategy(s.to_owned())),
        }
    }
}

pub fn letter_frequency(byte: u8) -> f64 {
    match byte.to_ascii_lowercase() {
        b' ' => SPACE_FREQUENCY,
        b @ b'a'..=b'z' => LETTER_FREQUENCIES[(b - b'a') as usize],
        _ => 0.0,
    }
}

pub fn letter_frequency_score(message: &[u8]) -> f64 {
    if message.is_empty() {
        return 0.0;
    }

    let total: f64 = message.iter().map(|&b| letter_frequency(b)).sum();
    total / message.len() as f64
}

/// `None` for an empty message.
pub fn rank_frequency_score(message: &[u8]) -> Option<f64> {
    if message.is_empty() {
        return None;
    }

    let size = RANKED_ALPHABET.len() as i64;
    let total: i64 = message
        .iter()
        .map(|b| {
            let folded = b.to_ascii_lowercase();
            match RANKED_ALPHABET.iter().position(|&c| c == folded) {
                Some(rank) => size - rank as i64,
                None => -size,
            }
        })
        .sum();

    Some(total as f64 / message.len() as f64)
}

#[derive(Debug, Clone)]
pub struct LanguageModel {
    dictionary: Arc<Dictionary>,
    strategy: Strategy,
    word_threshold: f64,
    letter_threshold: f64,
    non_letters: Regex,
    whitespace: Regex,
}

impl LanguageModel {
    pub fn new(dictionary: Arc<Dictionary>, strategy: Strategy) -> Result<LanguageModel> {
        Ok(LanguageModel {
            dictionary,
            strategy,
            word_threshold: DEFAULT_WORD_THRESHOLD,
            letter_threshold: DEFAULT_LETTER_THRESHOLD,
            non_letters: Regex::new(r"(?-u)[^A-Za-z\s]")?,
            whitespace: Regex::new(r"(?-u)\s+")?,
        })
    }

    pub fn from_config(dictionary: Arc<Dictionary>, config: &Config) -> Result<LanguageModel> {
        Ok(LanguageModel::new(dictionary, config.strategy)?
            .with_thresholds(config.word_threshold, config.letter_threshold))
    }

    /// Both in percent.
    pub fn with_thresholds(mut self, word_threshold: f64, letter_threshold: f64) -> LanguageModel {
        self.word_threshold = word_threshold;
        self.letter_threshold = letter_threshold;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn strip_non_letters(&self, message: &[u8]) -> Vec<u8> {
        self.non_letters.replace_all(message, &b""[..]).into_owned()
    }

    /// 0.0 when there are no tokens at all.
    pub fn word_ratio(&self, message: &[u8]) -> f64 {
        let letters = self.strip_non_letters(message).to_ascii_uppercase();
        let tokens: Vec<&[u8]> = self
            .whitespace
            .split(&letters)
            .filter(|token| !token.is_empty())
            .collect();

        if tokens.is_empty() {
            return 0.0;
        }

        let matches = tokens
            .iter()
            .filter(|token| self.dictionary.contains(token))
            .count();

        matches as f64 / tokens.len() as f64
    }

    pub fn letter_percentage(&self, message: &[u8]) -> f64 {
        if message.is_empty() {
            return 0.0;
        }

        self.strip_non_letters(message).len() as f64 / message.len() as f64 * 100.0
    }

    /// Both thresholds are percentages. An empty message is never English.
    pub fn is_plausible_english(
        &self,
        message: &[u8],
        word_threshold: f64,
        letter_threshold: f64,
    ) -> bool {
        if message.is_empty() {
            return false;
        }

        let words_match = self.word_ratio(message) * 100.0 >= word_threshold;
        let letters_match = self.letter_percentage(message) >= letter_threshold;

        words_match && letters_match
    }

    fn score_with(&self, strategy: Strategy, message: &[u8]) -> f64 {
        match strategy {
            Strategy::WordRatio => self.word_ratio(message),
            Strategy::LetterFrequency => letter_frequency_score(message),
            Strategy::RankFrequency => {
                rank_frequency_score(message).unwrap_or(std::f64::NEG_INFINITY)
            }
        }
    }
}

impl Scorer for LanguageModel {
    fn score(&self, message: &[u8]) -> f64 {
        self.score_with(self.strategy, message)
    }

    fn is_plausible(&self, message: &[u8]) -> bool {
        self.is_plausible_english(message, self.word_threshold, self.letter_threshold)
    }

    fn column_score(&self, column: &[u8]) -> f64 {
        self.score_with(self.strategy.column_strategy(), column)
    }
}
