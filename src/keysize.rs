use crate::error::{Error, Result};
use crate::xor::hamming_distance;
use itertools::Itertools;
use log::debug;
use std::cmp::Ordering;

pub const BLOCKS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyLengthCandidate {
    pub length: usize,
    /// Average pairwise Hamming distance between blocks, per byte. Lower is
    /// more likely.
    pub distance: f64,
}

/// Normalized distance between the first [`BLOCKS`] blocks of `length`
/// bytes, or `None` when the ciphertext does not hold that many blocks.
pub fn normalized_distance(ciphertext: &[u8], length: usize) -> Option<f64> {
    let too_long = length.checked_mul(BLOCKS).map_or(true, |n| n > ciphertext.len());
    if length == 0 || too_long {
        return None;
    }

    let blocks: Vec<&[u8]> = ciphertext.chunks_exact(length).take(BLOCKS).collect();
    let (total, pairs) = blocks
        .iter()
        .tuple_combinations::<(_, _)>()
        .fold((0usize, 0usize), |(total, pairs), (a, b)| {
            (total + hamming_distance(a, b), pairs + 1)
        });

    Some(total as f64 / pairs as f64 / length as f64)
}

/// Candidate lengths in `min_len..=max_len`, most likely first. Lengths
/// too long for the ciphertext are left out. Shorter lengths win ties.
///
/// Only the first [`BLOCKS`] blocks are compared, so the ranking is
/// unreliable below a few hundred bytes of ciphertext.
pub fn rank_key_lengths(ciphertext: &[u8], min_len: usize, max_len: usize) -> Vec<KeyLengthCandidate> {
    let longest = max_len.min(ciphertext.len() / BLOCKS);
    if longest < max_len {
        debug!(
            "skipping key lengths above {}: only {} bytes",
            longest,
            ciphertext.len()
        );
    }

    let mut candidates: Vec<KeyLengthCandidate> = (min_len.max(1)..=longest)
        .filter_map(|length| {
            normalized_distance(ciphertext, length).map(|distance| KeyLengthCandidate { length, distance })
        })
        .collect();

    candidates.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    candidates
}

pub fn estimate_key_length(ciphertext: &[u8], min_len: usize, max_len: usize) -> Result<usize> {
    rank_key_lengths(ciphertext, min_len, max_len)
        .first()
        .map(|candidate| candidate.length)
        .ok_or(Error::InsufficientData {
            min_len,
            max_len,
            available: ciphertext.len(),
        })
}
