use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::collections::HashSet;
use std::fmt;

/// Structural phone-number pattern: optional `+` and 1-3 digit prefix, an
/// optionally parenthesised 3-digit group, then 3 and 4 digit groups. Each
/// group may be followed by a single space, hyphen or period.
pub const PHONE_PATTERN: &str =
    r"(\+?[0-9]{1,3}[\s.\-]?)?\(?[0-9]{3}\)?[\s.\-]?[0-9]{3}[\s.\-]?[0-9]{4}";

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

/// A matched phone number, kept exactly as it appeared in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Single-line rendering for listings and documents. Separators other
    /// than a plain space (newline, tab, ...) come out escaped; the registry
    /// key is unchanged.
    pub fn printable(&self) -> Cow<'_, str> {
        if !self.0.chars().any(needs_escape) {
            return Cow::Borrowed(&self.0);
        }

        let mut shown = String::with_capacity(self.0.len() + 2);
        for c in self.0.chars() {
            if needs_escape(c) {
                shown.extend(c.escape_default());
            } else {
                shown.push(c);
            }
        }
        Cow::Owned(shown)
    }
}

fn needs_escape(c: char) -> bool {
    c != ' ' && (c.is_whitespace() || c.is_control())
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PhoneNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PhoneNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Outcome of scanning one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    /// Unique numbers in order of first appearance.
    pub numbers: Vec<PhoneNumber>,
    /// Raw match count, duplicates included.
    pub total_matches: usize,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn duplicates(&self) -> usize {
        self.total_matches - self.numbers.len()
    }
}

#[derive(Debug, Clone)]
pub struct NumberScanner {
    pattern: &'static Regex,
}

impl NumberScanner {
    pub fn new() -> Self {
        Self {
            pattern: &PHONE_REGEX,
        }
    }

    pub fn extract(&self, text: &str) -> Extraction {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut numbers = Vec::new();
        let mut total_matches = 0;

        for m in self.pattern.find_iter(text) {
            total_matches += 1;
            if seen.insert(m.as_str()) {
                numbers.push(PhoneNumber::new(m.as_str()));
            }
        }

        tracing::debug!(
            matches = total_matches,
            unique = numbers.len(),
            "scanned {} bytes of text",
            text.len()
        );

        Extraction {
            numbers,
            total_matches,
        }
    }

    /// True when the whole of `candidate` is one pattern match.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.pattern
            .find(candidate)
            .is_some_and(|m| m.start() == 0 && m.end() == candidate.len())
    }
}

impl Default for NumberScanner {
    fn default() -> Self {
        Self::new()
    }
}

pub fn extract_numbers(text: &str) -> Vec<PhoneNumber> {
    NumberScanner::new().extract(text).numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(numbers: &[PhoneNumber]) -> Vec<&str> {
        numbers.iter().map(|n| n.as_str()).collect()
    }

    #[test]
    fn test_mixed_formats_in_order() {
        let numbers = extract_numbers("Call 123-456-7890 or (987) 654-3210 today");
        assert_eq!(strings(&numbers), vec!["123-456-7890", "(987) 654-3210"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(extract_numbers("").is_empty());
        assert!(extract_numbers("no digits here").is_empty());
        assert!(NumberScanner::new().extract("").is_empty());
    }

    #[test]
    fn test_duplicates_collapse_to_first_occurrence() {
        let scanner = NumberScanner::new();
        let extraction =
            scanner.extract("555.123.4567, then 212 555 0000, then 555.123.4567 again");

        assert_eq!(
            strings(&extraction.numbers),
            vec!["555.123.4567", "212 555 0000"]
        );
        assert_eq!(extraction.total_matches, 3);
        assert_eq!(extraction.duplicates(), 1);
    }

    #[test]
    fn test_no_normalization_between_formats() {
        let numbers = extract_numbers("123-456-7890 and 1234567890");
        assert_eq!(strings(&numbers), vec!["123-456-7890", "1234567890"]);
    }

    #[test]
    fn test_country_code_prefix() {
        let numbers = extract_numbers("intl: +1 800-555-0199, uk: +44 207.946.0958");
        assert_eq!(strings(&numbers), vec!["+1 800-555-0199", "+44 207.946.0958"]);
    }

    #[test]
    fn test_spurious_digit_runs_are_kept() {
        // The pattern is structural; long digit runs still yield a match.
        let numbers = extract_numbers("order 98765432101234");
        assert_eq!(numbers.len(), 1);
        assert!(NumberScanner::new().is_match(numbers[0].as_str()));
    }

    #[test]
    fn test_too_short_runs_do_not_match() {
        assert!(extract_numbers("zip 12345-678 and 555-1234").is_empty());
    }

    #[test]
    fn test_non_ascii_digits_are_ignored() {
        assert!(extract_numbers("١٢٣-٤٥٦-٧٨٩٠").is_empty());
    }

    #[test]
    fn test_every_entry_matches_pattern_and_is_unique() {
        let scanner = NumberScanner::new();
        let text = "a 1-800-555-0100 b (212)555-0101 c 212.555.0101 d +33 612 345 678 \
                    e 1-800-555-0100 f 00000000000000000000 g (555)-123-4567";
        let extraction = scanner.extract(text);

        let unique: HashSet<&str> = extraction.numbers.iter().map(|n| n.as_str()).collect();
        assert_eq!(unique.len(), extraction.numbers.len());
        for number in &extraction.numbers {
            assert!(scanner.is_match(number.as_str()), "{} should match", number);
        }
    }

    #[test]
    fn test_is_match_requires_full_string() {
        let scanner = NumberScanner::new();
        assert!(scanner.is_match("(987) 654-3210"));
        assert!(!scanner.is_match("tel: (987) 654-3210"));
        assert!(!scanner.is_match("654-3210"));
    }

    #[test]
    fn test_phone_number_borrows_as_str() {
        let mut set = HashSet::new();
        set.insert(PhoneNumber::from("123-456-7890"));
        assert!(set.contains("123-456-7890"));
        assert_eq!(PhoneNumber::new("1").to_string(), "1");
    }

    #[test]
    fn test_line_breaks_inside_a_match_are_escaped_for_display() {
        let numbers = extract_numbers("call 123\n456-7890 or 212\t555 0000 now");
        assert_eq!(strings(&numbers), vec!["123\n456-7890", "212\t555 0000"]);

        assert_eq!(numbers[0].printable(), "123\\n456-7890");
        assert_eq!(numbers[1].printable(), "212\\t555 0000");
        assert!(matches!(
            PhoneNumber::from("(987) 654-3210").printable(),
            Cow::Borrowed("(987) 654-3210")
        ));
    }
}
