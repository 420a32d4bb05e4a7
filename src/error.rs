use failure::Fail;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "no key scored above the fail threshold")]
    NoPlausibleKey,

    #[fail(
        display = "ciphertext of {} bytes is too short for key lengths {}..={}",
        available, min_len, max_len
    )]
    InsufficientData {
        min_len: usize,
        max_len: usize,
        available: usize,
    },

    #[fail(display = "empty input")]
    EmptyInput,

    #[fail(
        display = "key length {} is invalid for a message of {} bytes",
        key_length, message_len
    )]
    InvalidKeyLength { key_length: usize, message_len: usize },

    #[fail(display = "no plausible key byte for column {}", column)]
    ColumnFailed { column: usize },

    #[fail(display = "unknown scoring strategy: {}", _0)]
    UnknownStrategy(String),

    #[fail(display = "invalid hex: {}", _0)]
    Hex(String),

    #[fail(display = "invalid base64: {}", _0)]
    Base64(#[cause] base64::DecodeError),

    #[fail(display = "invalid pattern: {}", _0)]
    Pattern(#[cause] regex::Error),

    #[fail(display = "{}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Base64(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err)
    }
}
