use crate::language::Scorer;
use crate::xor::repeating_xor;
use log::trace;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct KeyCandidate {
    pub key: Vec<u8>,
    pub score: f64,
    pub plaintext: Vec<u8>,
}

impl KeyCandidate {
    fn new(key: u8, score: f64, ciphertext: &[u8]) -> KeyCandidate {
        KeyCandidate {
            key: vec![key],
            score,
            plaintext: repeating_xor(ciphertext, &[key]),
        }
    }
}

/// Best first; equal scores keep ascending byte order.
pub fn rank_keys<S: Scorer + ?Sized>(ciphertext: &[u8], scorer: &S) -> Vec<(u8, f64)> {
    let mut scores: Vec<(u8, f64)> = Vec::with_capacity(256);

    for b in 0..=255u8 {
        let decrypted = repeating_xor(ciphertext, &[b]);
        scores.push((b, scorer.score(&decrypted)));
    }

    scores.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    scores
}

/// The best-scoring single-byte key, or `None` if even the best score is
/// at or below `fail_threshold`. The lowest byte wins a tie.
pub fn find_key<S: Scorer + ?Sized>(
    ciphertext: &[u8],
    scorer: &S,
    fail_threshold: f64,
) -> Option<KeyCandidate> {
    let (key, score) = rank_keys(ciphertext, scorer)[0];

    if score <= fail_threshold {
        trace!("best key {:#04x} scored {} <= {}", key, score, fail_threshold);
        return None;
    }

    trace!("best key {:#04x} scored {}", key, score);
    Some(KeyCandidate::new(key, score, ciphertext))
}

/// Keys whose plaintext passes the plausibility gate, in byte order.
pub fn find_plausible_keys<S: Scorer + ?Sized>(ciphertext: &[u8], scorer: &S) -> Vec<KeyCandidate> {
    (0..=255u8)
        .filter_map(|b| {
            let decrypted = repeating_xor(ciphertext, &[b]);
            if scorer.is_plausible(&decrypted) {
                Some(KeyCandidate {
                    key: vec![b],
                    score: scorer.score(&decrypted),
                    plaintext: decrypted,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Only plaintexts passing the plausibility gate count. The highest score
/// wins, the earliest ciphertext on a tie.
pub fn detect_single_byte_xor<'a, I, S>(ciphertexts: I, scorer: &S) -> Option<(usize, KeyCandidate)>
where
    I: IntoIterator<Item = &'a [u8]>,
    S: Scorer + ?Sized,
{
    let mut best: Option<(usize, KeyCandidate)> = None;

    for (index, ciphertext) in ciphertexts.into_iter().enumerate() {
        for candidate in find_plausible_keys(ciphertext, scorer) {
            let better = match &best {
                Some((_, current)) => candidate.score > current.score,
                None => true,
            };
            if better {
                best = Some((index, candidate));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dictionary::Dictionary;
    use crate::encoding::ByteArray;
    use crate::language::{LanguageModel, Strategy};
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;
    use std::sync::Arc;

    const COOKING: &str = "1b37373331363f78151b7f2b783431333d78397828372d363c78373e783a393b3736";

    fn model(strategy: Strategy) -> LanguageModel {
        let dictionary = Dictionary::from_words(vec!["cooking", "like", "a", "pound", "of", "bacon"]);
        LanguageModel::new(Arc::new(dictionary), strategy).unwrap()
    }

    #[test]
    fn test_find_key() {
        let encrypted = ByteArray::from_hex(COOKING).unwrap();
        let found = find_key(encrypted.bytes(), &model(Strategy::LetterFrequency), 0.0).unwrap();

        assert_eq!(found.key, b"X".to_vec());
        assert_eq!(found.plaintext, b"Cooking MC's like a pound of bacon".to_vec());
    }

    #[test]
    fn test_find_key_rank_frequency() {
        let encrypted = ByteArray::from_hex(COOKING).unwrap();
        let model = model(Strategy::RankFrequency);
        let found = find_key(encrypted.bytes(), &model, Strategy::RankFrequency.default_fail_threshold()).unwrap();

        assert_eq!(found.key, b"X".to_vec());
    }

    #[test]
    fn test_find_key_word_ratio() {
        let encrypted = ByteArray::from_hex(COOKING).unwrap();
        let found = find_key(encrypted.bytes(), &model(Strategy::WordRatio), 0.0).unwrap();

        assert_eq!(found.key, b"X".to_vec());
        assert!((found.score - 6.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_key_below_threshold() {
        let encrypted = ByteArray::from_hex(COOKING).unwrap();
        let model = model(Strategy::LetterFrequency);

        assert!(find_key(encrypted.bytes(), &model, 100.0).is_none());
        assert!(find_key(b"", &model, 0.0).is_none());
    }

    #[test]
    fn test_find_key_without_dictionary_words() {
        let dictionary = Arc::new(Dictionary::default());
        let model = LanguageModel::new(dictionary, Strategy::WordRatio).unwrap();
        let encrypted = ByteArray::from_hex(COOKING).unwrap();

        assert!(find_key(encrypted.bytes(), &model, 0.0).is_none());
    }

    #[test]
    fn test_ties_pick_lowest_byte() {
        // every key scores 0.0 under an empty dictionary
        let model = LanguageModel::new(Arc::new(Dictionary::default()), Strategy::WordRatio).unwrap();
        let ranked = rank_keys(b"anything", &model);

        assert_eq!(ranked.len(), 256);
        assert_eq!(ranked[0], (0, 0.0));
        assert_eq!(ranked[255], (255, 0.0));
        assert_eq!(find_key(b"anything", &model, -1.0).unwrap().key, vec![0]);
    }

    #[test]
    fn test_find_plausible_keys() {
        let encrypted = ByteArray::from_hex(COOKING).unwrap();
        let found = find_plausible_keys(encrypted.bytes(), &model(Strategy::LetterFrequency));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, b"X".to_vec());
        assert_eq!(found[0].plaintext, b"Cooking MC's like a pound of bacon".to_vec());
    }

    #[test]
    fn test_find_plausible_keys_empty() {
        assert!(find_plausible_keys(b"", &model(Strategy::LetterFrequency)).is_empty());
    }

    #[test]
    fn test_find_key_rejects_random_bytes() {
        let mut rng = StdRng::seed_from_u64(7);
        let model = model(Strategy::LetterFrequency);
        let threshold = Config::default().fail_threshold();

        for _ in 0..100 {
            let random: Vec<u8> = (0..30).map(|_| rng.gen()).collect();
            assert!(find_key(&random, &model, threshold).is_none());
        }

        let encrypted = ByteArray::from_hex(COOKING).unwrap();
        assert!(find_key(encrypted.bytes(), &model, threshold).is_some());
    }

    #[test]
    fn test_detect_single_byte_xor() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut ciphertexts: Vec<Vec<u8>> = (0..60)
            .map(|_| (0..34).map(|_| rng.gen()).collect())
            .collect();
        ciphertexts.insert(17, ByteArray::from_hex(COOKING).unwrap().bytes().to_vec());

        let model = model(Strategy::LetterFrequency);
        let (index, found) = detect_single_byte_xor(ciphertexts.iter().map(|c| c.as_slice()), &model).unwrap();

        assert_eq!(index, 17);
        assert_eq!(found.key, b"X".to_vec());
        assert_eq!(found.plaintext, b"Cooking MC's like a pound of bacon".to_vec());
    }

    #[test]
    fn test_detect_single_byte_xor_longer_decoys() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut ciphertexts: Vec<Vec<u8>> = (0..5)
            .map(|_| (0..200).map(|_| rng.gen()).collect())
            .collect();
        ciphertexts.insert(0, ByteArray::from_hex(COOKING).unwrap().bytes().to_vec());

        let model = model(Strategy::LetterFrequency);
        let (index, found) = detect_single_byte_xor(ciphertexts.iter().map(|c| c.as_slice()), &model).unwrap();

        assert_eq!(index, 0);
        assert_eq!(found.key, b"X".to_vec());
    }

    #[test]
    fn test_detect_single_byte_xor_nothing_found() {
        let model = model(Strategy::LetterFrequency);
        let empty: Vec<&[u8]> = vec![&b""[..], &b""[..]];

        assert!(detect_single_byte_xor(empty, &model).is_none());
    }
}
