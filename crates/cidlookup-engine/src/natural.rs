//! Natural ordering of course numbers: 1, 1A, 1B, 2, 6A, 10, 40A

/// Sort key: leading digit run as an integer, then the rest as text
///
/// Numbers without leading digits sort as zero. Digit runs too long for a
/// `u64` sort after every representable number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey {
    number: u64,
    suffix: String,
}

impl NaturalKey {
    /// Build the key for a course number
    pub fn new(course_number: &str) -> Self {
        let s = course_number.trim();
        let split = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(s.len(), |(i, _)| i);
        let (digits, rest) = s.split_at(split);

        let number = if digits.is_empty() {
            0
        } else {
            digits.parse().unwrap_or(u64::MAX)
        };

        Self {
            number,
            suffix: rest.trim().to_string(),
        }
    }
}

/// Sort course numbers naturally; equal keys keep their input order
pub fn sort_course_numbers<S: AsRef<str>>(numbers: &mut [S]) {
    numbers.sort_by_cached_key(|n| NaturalKey::new(n.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cmp::Ordering;

    fn natural_cmp(a: &str, b: &str) -> Ordering {
        NaturalKey::new(a).cmp(&NaturalKey::new(b))
    }

    #[test]
    fn test_natural_order() {
        let mut numbers = vec!["10", "1A", "2", "1", "40A", "6A"];
        sort_course_numbers(&mut numbers);
        assert_eq!(numbers, vec!["1", "1A", "2", "6A", "10", "40A"]);
    }

    #[test]
    fn test_suffix_compared_as_text() {
        let mut numbers = vec!["1B", "1", "1AH", "1A"];
        sort_course_numbers(&mut numbers);
        assert_eq!(numbers, vec!["1", "1A", "1AH", "1B"]);
    }

    #[test]
    fn test_non_numeric_sorts_first() {
        assert_eq!(natural_cmp("X", "1"), Ordering::Less);
        assert_eq!(natural_cmp(" 2 ", "2"), Ordering::Equal);
        assert_eq!(natural_cmp("99999999999999999999999", "5"), Ordering::Greater);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut numbers = vec!["2 ", "2"];
        sort_course_numbers(&mut numbers);
        assert_eq!(numbers, vec!["2 ", "2"]);
    }
}
