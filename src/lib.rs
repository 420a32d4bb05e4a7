pub mod cipher;
pub mod config;
pub mod dictionary;
pub mod encoding;
pub mod error;
pub mod keysize;
pub mod language;
pub mod repeating;
pub mod xor;

pub use crate::cipher::{detect_single_byte_xor, find_key, find_plausible_keys, KeyCandidate};
pub use crate::config::Config;
pub use crate::dictionary::Dictionary;
pub use crate::encoding::ByteArray;
pub use crate::error::{Error, Result};
pub use crate::keysize::{estimate_key_length, rank_key_lengths, KeyLengthCandidate};
pub use crate::language::{LanguageModel, Scorer, Strategy};
pub use crate::repeating::{break_repeating_key_xor, recover_repeating_key, Recovery};
pub use crate::xor::{hamming_distance, repeating_xor, xor};
