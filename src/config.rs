use crate::language::{Strategy, DEFAULT_LETTER_THRESHOLD, DEFAULT_WORD_THRESHOLD};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub strategy: Strategy,
    /// Percent of tokens that must be dictionary words.
    pub word_threshold: f64,
    /// Percent of bytes that must be letters or whitespace.
    pub letter_threshold: f64,
    /// Overrides the strategy's own fail threshold when set.
    pub fail_threshold: Option<f64>,
    pub min_key_len: usize,
    pub max_key_len: usize,
    /// How many of the best-ranked key lengths a full break tries.
    pub candidate_lengths: usize,
}

impl Config {
    pub fn fail_threshold(&self) -> f64 {
        self.fail_threshold
            .unwrap_or_else(|| self.strategy.default_fail_threshold())
    }

    /// Threshold on the scale of the strategy that scores key columns.
    pub fn column_fail_threshold(&self) -> f64 {
        let column = self.strategy.column_strategy();
        if column == self.strategy {
            self.fail_threshold()
        } else {
            column.default_fail_threshold()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strategy: Strategy::default(),
            word_threshold: DEFAULT_WORD_THRESHOLD,
            letter_threshold: DEFAULT_LETTER_THRESHOLD,
            fail_threshold: None,
            min_key_len: 2,
            max_key_len: 40,
            candidate_lengths: 3,
        }
    }
}
