/// Reading speed used when no configuration is given.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Number of whitespace-delimited words.
pub fn count_words(source: &str) -> usize {
    source.split_whitespace().count()
}

/// Estimated reading time in whole minutes, rounded up.
///
/// Never reports less than one minute, including for empty input. A
/// reading speed of zero is treated as one word per minute.
pub fn reading_time(source: &str, words_per_minute: usize) -> usize {
    let minutes = count_words(source).div_ceil(words_per_minute.max(1));
    minutes.max(1)
}
