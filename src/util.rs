//! Small shared helpers: text decoding and slug generation.

use std::borrow::Cow;

/// Decode bytes to a string, handling non-UTF-8 input.
///
/// Tries UTF-8 first (BOM handled automatically by encoding_rs). If the
/// input is malformed, falls back to Windows-1252, which is the most common
/// encoding for legacy static sites and a superset of ISO-8859-1.
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Generate a lowercase hyphenated slug from text.
///
/// Used for WordPress enqueue handles and the PHP function prefix in the
/// generated `functions.php`.
///
/// # Examples
///
/// ```
/// use pressgen::util::slugify;
///
/// assert_eq!(slugify("My Theme"), "my-theme");
/// assert_eq!(slugify("  Fancy  (2024)  "), "fancy-2024");
/// ```
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                // Skip other characters
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Slug variant usable as a PHP identifier (underscores, leading letter).
pub fn php_identifier(text: &str) -> String {
    let slug = slugify(text).replace('-', "_");
    if slug.is_empty() || slug.starts_with(|c: char| c.is_ascii_digit()) {
        format!("theme_{slug}")
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_utf8_passthrough() {
        assert_eq!(decode_text("čšž".as_bytes()), "čšž");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0xE9 is 'é' in Windows-1252 but invalid as a lone UTF-8 byte
        let bytes = b"caf\xe9";
        assert_eq!(decode_text(bytes), "café");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("RMK Theme"), "rmk-theme");
        assert_eq!(slugify("hello_world"), "hello-world");
        assert_eq!(slugify("--- "), "");
    }

    #[test]
    fn test_php_identifier() {
        assert_eq!(php_identifier("My Theme"), "my_theme");
        assert_eq!(php_identifier("2024 site"), "theme_2024_site");
        assert_eq!(php_identifier("!!!"), "theme_");
    }

    proptest! {
        #[test]
        fn prop_slugify_output_is_safe(s in ".{0,64}") {
            let slug = slugify(&s);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode_text(&bytes);
        }
    }
}
