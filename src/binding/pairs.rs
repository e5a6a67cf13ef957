//! Query-string payload parsing.
//!
//! The decrypted plaintext is an `application/x-www-form-urlencoded`
//! string.  Keys may repeat in the raw form; lookups return the first
//! occurrence.

use url::form_urlencoded;

/// Ordered key/value pairs decoded from a plaintext payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaintextPairs {
    pairs: Vec<(String, String)>,
}

impl PlaintextPairs {
    /// Look up the first value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values recorded for `key`, in payload order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` occurs at least once.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over every raw pair, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaintextPairs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decode a plaintext payload into key/value pairs.
///
/// Pairs are split on `&`, keys from values on the first `=`, `+` becomes
/// a space and `%XX` escapes are decoded.  A segment without `=` gets an
/// empty value.  Malformed escapes are kept literally; this never fails.
pub fn parse_pairs(plaintext: &str) -> PlaintextPairs {
    form_urlencoded::parse(plaintext.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_pairs() {
        let pairs = parse_pairs("number=42&name=Ada");
        assert_eq!(pairs.get("number"), Some("42"));
        assert_eq!(pairs.get("name"), Some("Ada"));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn parse_percent_and_plus_decoding() {
        let pairs = parse_pairs("q=a%26b%3Dc&name=Ada+Lovelace&emoji=%F0%9F%94%92");
        assert_eq!(pairs.get("q"), Some("a&b=c"));
        assert_eq!(pairs.get("name"), Some("Ada Lovelace"));
        assert_eq!(pairs.get("emoji"), Some("\u{1F512}"));
    }

    #[test]
    fn parse_missing_equals_is_empty_value() {
        let pairs = parse_pairs("flag&name=Ada");
        assert_eq!(pairs.get("flag"), Some(""));
    }

    #[test]
    fn parse_value_with_equals() {
        assert_eq!(parse_pairs("expr=a=b").get("expr"), Some("a=b"));
    }

    #[test]
    fn first_occurrence_wins() {
        let pairs = parse_pairs("id=1&id=2");
        assert_eq!(pairs.get("id"), Some("1"));
        assert_eq!(pairs.get_all("id").collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn parse_empty_payload() {
        assert!(parse_pairs("").is_empty());
        assert!(!parse_pairs("").contains_key("anything"));
    }

    #[test]
    fn parse_skips_empty_segments() {
        let pairs = parse_pairs("&&a=1&&");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs.get("a"), Some("1"));
    }
}
