use crate::error::Result;
use log::debug;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Known English words, stored upper-cased.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<Vec<u8>>,
}

impl Dictionary {
    /// Reads a newline-delimited word list. Blank lines are skipped and
    /// surrounding whitespace is trimmed.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Dictionary> {
        let mut words = HashSet::new();

        for line in reader.split(b'\n') {
            let line = line?;
            let word = trim(&line);
            if !word.is_empty() {
                words.insert(word.to_ascii_uppercase());
            }
        }

        debug!("loaded dictionary with {} words", words.len());
        Ok(Dictionary { words })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Dictionary> {
        let file = File::open(path)?;
        Dictionary::from_reader(BufReader::new(file))
    }

    pub fn from_words<I, W>(words: I) -> Dictionary
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[u8]>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().to_ascii_uppercase())
            .collect();

        Dictionary { words }
    }

    pub fn contains(&self, word: &[u8]) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);

    &line[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WORDS: &str = "COOKING\nlike\r\nA\n\n  pound \nOF\nBACON\n";

    #[test]
    fn test_from_reader() {
        let dictionary = Dictionary::from_reader(Cursor::new(WORDS)).unwrap();

        assert_eq!(dictionary.len(), 6);
        assert!(dictionary.contains(b"cooking"));
        assert!(dictionary.contains(b"LIKE"));
        assert!(dictionary.contains(b"Pound"));
        assert!(!dictionary.contains(b""));
        assert!(!dictionary.contains(b"bacon!"));
    }

    #[test]
    fn test_load_twice_is_equal() {
        let first = Dictionary::from_reader(Cursor::new(WORDS)).unwrap();
        let second = Dictionary::from_reader(Cursor::new(WORDS)).unwrap();
        assert_eq!(first, second);

        let words = Dictionary::from_words(vec!["cooking", "like", "a", "pound", "of", "bacon"]);
        assert_eq!(first, words);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Dictionary::load("data/no-such-dictionary.txt").is_err());
    }

    #[test]
    fn test_empty() {
        let dictionary = Dictionary::from_reader(Cursor::new("")).unwrap();
        assert!(dictionary.is_empty());
        assert_eq!(dictionary, Dictionary::default());
    }
}
