use crate::cipher::find_key;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::keysize::rank_key_lengths;
use crate::language::Scorer;
use crate::xor::repeating_xor;
use log::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    pub key: Vec<u8>,
    pub plaintext: Vec<u8>,
    pub score: f64,
}

// Every byte in a column was xored with the same key byte.
struct Columns<'a, S: ?Sized>(&'a S);

impl<'a, S: Scorer + ?Sized> Scorer for Columns<'a, S> {
    fn score(&self, message: &[u8]) -> f64 {
        self.0.column_score(message)
    }

    fn is_plausible(&self, message: &[u8]) -> bool {
        self.0.is_plausible(message)
    }
}

/// Column `j` holds the bytes at `j`, `j + key_length`, `j + 2 * key_length`...
pub fn transpose(ciphertext: &[u8], key_length: usize) -> Vec<Vec<u8>> {
    let mut columns = vec![Vec::new(); key_length];

    for (i, &b) in ciphertext.iter().enumerate() {
        columns[i % key_length].push(b);
    }

    columns
}

/// Recovers a key of exactly `key_length` bytes. Columns are ranked with
/// [`Scorer::column_score`], so `fail_threshold` is on that scale.
pub fn recover_repeating_key<S: Scorer + ?Sized>(
    ciphertext: &[u8],
    key_length: usize,
    scorer: &S,
    fail_threshold: f64,
) -> Result<Vec<u8>> {
    if key_length == 0 || key_length > ciphertext.len() {
        return Err(Error::InvalidKeyLength {
            key_length,
            message_len: ciphertext.len(),
        });
    }

    transpose(ciphertext, key_length)
        .iter()
        .enumerate()
        .map(|(column, bytes)| match find_key(bytes, &Columns(scorer), fail_threshold) {
            Some(candidate) => Ok(candidate.key[0]),
            None => {
                debug!("column {} of {} has no plausible key", column, key_length);
                Err(Error::ColumnFailed { column })
            }
        })
        .collect()
}

pub fn minimal_period(key: &[u8]) -> &[u8] {
    for period in 1..key.len() {
        if key.len() % period == 0 && key.chunks(period).all(|chunk| chunk == &key[..period]) {
            return &key[..period];
        }
    }

    key
}

/// Tries the best `config.candidate_lengths` key lengths and keeps the
/// plaintext that scores highest; a better-ranked length wins a tie.
pub fn break_repeating_key_xor<S: Scorer + ?Sized>(
    ciphertext: &[u8],
    scorer: &S,
    config: &Config,
) -> Result<Recovery> {
    if ciphertext.is_empty() {
        return Err(Error::EmptyInput);
    }

    let ranked = rank_key_lengths(ciphertext, config.min_key_len, config.max_key_len);
    if ranked.is_empty() {
        return Err(Error::InsufficientData {
            min_len: config.min_key_len,
            max_len: config.max_key_len,
            available: ciphertext.len(),
        });
    }

    let fail_threshold = config.column_fail_threshold();
    let mut best: Option<Recovery> = None;
    let mut first_error = None;

    for candidate in ranked.iter().take(config.candidate_lengths.max(1)) {
        let key = match recover_repeating_key(ciphertext, candidate.length, scorer, fail_threshold) {
            Ok(key) => minimal_period(&key).to_vec(),
            Err(err) => {
                first_error.get_or_insert(err);
                continue;
            }
        };

        let plaintext = repeating_xor(ciphertext, &key);
        let score = scorer.score(&plaintext);
        debug!(
            "key length {} (distance {:.4}) gives key {:?} scoring {}",
            candidate.length,
            candidate.distance,
            String::from_utf8_lossy(&key),
            score
        );

        let better = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if better {
            best = Some(Recovery { key, plaintext, score });
        }
    }

    match best {
        Some(recovery) => {
            info!("recovered a key of {} bytes", recovery.key.len());
            Ok(recovery)
        }
        None => Err(first_error.unwrap_or(Error::NoPlausibleKey)),
    }
}
