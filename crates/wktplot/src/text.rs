//! Title helpers: filename-safe slugs and random titles.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated titles.
pub const RANDOM_TITLE_LEN: usize = 6;

/// Lowercase `text` and join its ASCII alphanumeric runs with `_`.
///
/// `"wow 123_ @#$%    1"` becomes `"wow_123_1"`. Text without any
/// alphanumeric character yields an empty string.
pub fn sanitize_text(text: &str) -> String {
    text.to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// `len` characters drawn uniformly from `[A-Za-z0-9]`.
pub fn random_string<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    rng.sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
