/// Splits `text` on ASCII spaces, yielding the non-empty words in order.
///
/// Words are compared byte-exact everywhere in the index, so no case folding
/// or Unicode segmentation happens here.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it carries no control bytes (codepoints below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    word.bytes().all(|byte| byte >= 0x20)
}

/// Exclusion syntax: a bare `-` and a `--` prefix are both malformed.
pub fn is_valid_minus_word(word: &str) -> bool {
    word != "-" && !word.starts_with("--")
}
