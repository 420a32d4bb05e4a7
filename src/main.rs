use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use xorcrack::{
    break_repeating_key_xor, detect_single_byte_xor, ByteArray, Config, Dictionary, LanguageModel, Strategy,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Recover plaintext from xor-encrypted data")]
struct Args {
    /// ciphertext file, base64 unless --hex is given
    input: PathBuf,

    /// input is hex, one ciphertext per line
    #[arg(long)]
    hex: bool,

    /// treat every line as a separate single-byte xor candidate
    #[arg(long)]
    single: bool,

    /// newline-delimited word list for the plausibility gate and word scoring
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// ranking strategy: letters, words or rank
    #[arg(short, long, default_value = "letters")]
    strategy: String,

    /// minimum length of key to try
    #[arg(long, default_value_t = 2)]
    min_key_len: usize,

    /// max length of key to try
    #[arg(long, default_value_t = 40)]
    max_key_len: usize,

    /// how many of the most likely key lengths to try
    #[arg(long, default_value_t = 3)]
    candidates: usize,
}

/// Non-blank lines with their 1-based line number in the file.
fn numbered_lines(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect()
}

fn decode(args: &Args, text: &str) -> Result<Vec<(usize, Vec<u8>)>, failure::Error> {
    if args.single {
        numbered_lines(text)
            .into_iter()
            .map(|(number, line)| Ok((number, decode_one(args, line)?)))
            .collect()
    } else {
        let joined: String = text.lines().map(str::trim).collect();
        Ok(vec![(1, decode_one(args, &joined)?)])
    }
}

fn decode_one(args: &Args, text: &str) -> Result<Vec<u8>, failure::Error> {
    let bytes = if args.hex {
        ByteArray::parse_hex(text)?
    } else {
        ByteArray::from_base64(text)?
    };

    Ok(bytes.into_bytes())
}

fn main() -> Result<(), failure::Error> {
    env_logger::init();
    let args = Args::parse();

    let config = Config {
        strategy: args.strategy.parse::<Strategy>()?,
        min_key_len: args.min_key_len,
        max_key_len: args.max_key_len,
        candidate_lengths: args.candidates,
        ..Config::default()
    };

    let dictionary = match &args.dictionary {
        Some(path) => Dictionary::load(path)?,
        None => Dictionary::default(),
    };
    info!("dictionary has {} words", dictionary.len());
    let model = LanguageModel::from_config(Arc::new(dictionary), &config)?;

    let text = fs::read_to_string(&args.input)?;
    let ciphertexts = decode(&args, &text)?;

    if args.single {
        let lines = ciphertexts.iter().map(|(_, c)| c.as_slice());
        match detect_single_byte_xor(lines, &model) {
            Some((index, candidate)) => {
                println!("line: {}", ciphertexts[index].0);
                println!("key: {:?}", String::from_utf8_lossy(&candidate.key));
                println!("{}", String::from_utf8_lossy(&candidate.plaintext));
            }
            None => println!("no plausible key found"),
        }
    } else {
        let recovery = break_repeating_key_xor(&ciphertexts[0].1, &model, &config)?;
        println!("key: {:?}", String::from_utf8_lossy(&recovery.key));
        println!("{}", String::from_utf8_lossy(&recovery.plaintext));
    }

    Ok(())
}
