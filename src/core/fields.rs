//! Field-name casing utilities.
//!
//! Error maps key violations by field name, and every field name that
//! flows through the execution core must be in canonical lowerCamelCase.
//! These helpers check that canonical form and render it as a
//! human-readable "Start Case" prefix for error messages.

/// Check whether a field name is canonical lowerCamelCase.
///
/// Canonical form: non-empty, starts with an ASCII lowercase letter,
/// and contains only ASCII alphanumeric characters after that.
///
/// # Example
///
/// ```rust
/// use groundwork::core::fields::is_lower_camel_case;
///
/// assert!(is_lower_camel_case("email"));
/// assert!(is_lower_camel_case("firstName"));
/// assert!(is_lower_camel_case("line1"));
/// assert!(!is_lower_camel_case("first_name"));
/// assert!(!is_lower_camel_case("FirstName"));
/// assert!(!is_lower_camel_case(""));
/// ```
pub fn is_lower_camel_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Render a lowerCamelCase field name in human-readable "Start Case".
///
/// Words are split at lower-to-upper boundaries, letter/digit
/// boundaries, and at the end of an uppercase run, then each word is
/// capitalized.
///
/// # Example
///
/// ```rust
/// use groundwork::core::fields::start_case;
///
/// assert_eq!(start_case("email"), "Email");
/// assert_eq!(start_case("firstName"), "First Name");
/// assert_eq!(start_case("userID"), "User ID");
/// assert_eq!(start_case("line1"), "Line 1");
/// ```
pub fn start_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !current.is_empty() && is_word_boundary(chars[i - 1], c, chars.get(i + 1).copied()) {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_word_boundary(prev: char, current: char, next: Option<char>) -> bool {
    if prev.is_ascii_lowercase() && current.is_ascii_uppercase() {
        return true;
    }
    if prev.is_ascii_alphabetic() && current.is_ascii_digit() {
        return true;
    }
    if prev.is_ascii_digit() && current.is_ascii_alphabetic() {
        return true;
    }
    // End of an uppercase run: "HTMLParser" splits before "Parser".
    prev.is_ascii_uppercase()
        && current.is_ascii_uppercase()
        && next.is_some_and(|n| n.is_ascii_lowercase())
}

fn capitalize(word: String) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_is_camel_case() {
        assert!(is_lower_camel_case("email"));
        assert!(is_lower_camel_case("x"));
    }

    #[test]
    fn multi_word_is_camel_case() {
        assert!(is_lower_camel_case("firstName"));
        assert!(is_lower_camel_case("responseStatusCode"));
    }

    #[test]
    fn digits_are_allowed_after_first_char() {
        assert!(is_lower_camel_case("line1"));
        assert!(is_lower_camel_case("addressLine2"));
        assert!(!is_lower_camel_case("1stLine"));
    }

    #[test]
    fn snake_and_kebab_are_rejected() {
        assert!(!is_lower_camel_case("first_name"));
        assert!(!is_lower_camel_case("first-name"));
        assert!(!is_lower_camel_case("first name"));
    }

    #[test]
    fn pascal_case_is_rejected() {
        assert!(!is_lower_camel_case("FirstName"));
    }

    #[test]
    fn empty_is_rejected() {
        assert!(!is_lower_camel_case(""));
    }

    #[test]
    fn start_case_single_word() {
        assert_eq!(start_case("email"), "Email");
    }

    #[test]
    fn start_case_splits_camel_words() {
        assert_eq!(start_case("firstName"), "First Name");
        assert_eq!(start_case("responseStatusCode"), "Response Status Code");
    }

    #[test]
    fn start_case_keeps_acronym_runs() {
        assert_eq!(start_case("userID"), "User ID");
    }

    #[test]
    fn start_case_splits_digits() {
        assert_eq!(start_case("line1"), "Line 1");
        assert_eq!(start_case("addressLine2"), "Address Line 2");
    }

    #[test]
    fn start_case_of_empty_is_empty() {
        assert_eq!(start_case(""), "");
    }
}
