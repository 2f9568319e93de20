use lazy_static::lazy_static;
use regex::Regex;

/// Tokens this short carry no identifying meaning ("a", "of", "my", ...)
const MIN_TOKEN_LEN: usize = 3;

lazy_static! {
    /// Everything that is not a lowercase ASCII letter, digit or whitespace
    static ref NON_WORD_REGEX: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
}

/// Normalize free text into comparable word tokens.
///
/// Lower-cases the input, strips punctuation and non-ASCII characters,
/// splits on whitespace and drops tokens shorter than three characters.
/// Order and duplicates are preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD_REGEX
        .replace_all(&lowered, "")
        .split_whitespace()
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}
