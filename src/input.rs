//! Raw text to multiset conversion
//!
//! Inputs are written as comma-separated, space-separated, or bare character
//! lists: `"1, 2, 3"`, `"1 2 3"`, `"abc"`. Numbers are kept, single
//! characters become their code points.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn invalid_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s,]").expect("static regex"))
}

/// Reject text containing anything other than letters, digits, whitespace or commas
pub fn validate_string(input: &str) -> Result<()> {
    if invalid_chars().is_match(input) {
        return Err(Error::InvalidInput(
            "please use only spaces, commas, numbers, or alphabetical characters".into(),
        ));
    }
    Ok(())
}

/// Split raw text into tokens following the delimiter precedence
/// comma > space > character
pub fn split_tokens(input: &str) -> Vec<String> {
    let input = input.trim();
    if input.is_empty() {
        return Vec::new();
    }
    if input.contains(',') {
        input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .split(',')
            .map(str::to_string)
            .collect()
    } else if input.contains(' ') {
        input.split(' ').map(str::to_string).collect()
    } else {
        input.chars().map(String::from).collect()
    }
}

/// Resolve one token to a number, or to the code point of a single character
pub fn parse_token(token: &str) -> Option<i64> {
    if let Ok(n) = token.parse::<i64>() {
        return Some(n);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c as i64),
        _ => None,
    }
}

/// Convert raw text into an ordered sequence of integers
///
/// # Examples
/// ```
/// use enumerator::input::tokenize;
/// assert_eq!(tokenize("1, 2, 3").unwrap(), vec![1, 2, 3]);
/// assert_eq!(tokenize("ab").unwrap(), vec![97, 98]);
/// ```
pub fn tokenize(input: &str) -> Result<Vec<i64>> {
    split_tokens(input)
        .iter()
        .map(|token| {
            parse_token(token).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "'{}' is not a number or single character",
                    token
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_string() {
        assert!(validate_string("abc 123, 4").is_ok());
        assert!(validate_string("a-b").is_err());
        assert!(validate_string("1.5").is_err());
    }

    #[test]
    fn test_delimiter_precedence() {
        assert_eq!(split_tokens("1, 2 ,3"), vec!["1", "2", "3"]);
        assert_eq!(split_tokens("10 20 3"), vec!["10", "20", "3"]);
        assert_eq!(split_tokens("abc"), vec!["a", "b", "c"]);
        assert_eq!(split_tokens("  "), Vec::<String>::new());
    }

    #[test]
    fn test_tokenize_maps_characters_to_code_points() {
        assert_eq!(tokenize("abcd").unwrap(), vec![97, 98, 99, 100]);
        assert_eq!(tokenize("a, 5, Z").unwrap(), vec![97, 5, 90]);
        assert_eq!(tokenize("123").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_tokenize_rejects_words() {
        let err = tokenize("ab cd").unwrap_err();
        assert!(err.to_string().contains("'ab'"));
    }

    #[test]
    fn test_double_space_yields_empty_token() {
        assert!(tokenize("1  2").is_err());
    }
}
