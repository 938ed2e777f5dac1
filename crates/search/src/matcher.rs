//! Prefix-function (Knuth–Morris–Pratt) substring matching.
//!
//! Both the pattern and the text are lowercased before comparison and then
//! compared `char` by `char`. No normalization beyond simple case folding is
//! applied, so `"e\u{301}"` and `"é"` are different strings here.

/// Returns `true` if `pattern` occurs in `text`, ignoring case.
///
/// An empty pattern matches every text, including the empty one.
pub fn contains(text: &str, pattern: &str) -> bool {
    PrefixTable::new(pattern).is_found_in(text)
}

/// Lowercased pattern plus its failure (overlap) table.
///
/// Build once per query and reuse it across many texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    pattern: Vec<char>,
    lps: Vec<usize>,
}

impl PrefixTable {
    pub fn new(pattern: &str) -> Self {
        let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
        let lps = build_lps(&pattern);
        Self { pattern, lps }
    }

    /// Pattern length in `char`s (after lowercasing).
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// `lps[i]`: length of the longest proper prefix of `pattern[..=i]` that is
    /// also a suffix of it.
    pub fn overlaps(&self) -> &[usize] {
        &self.lps
    }

    /// Scans `text` once; never moves backwards in the text.
    pub fn is_found_in(&self, text: &str) -> bool {
        let m = self.pattern.len();
        if m == 0 {
            return true;
        }

        let text: Vec<char> = text.to_lowercase().chars().collect();
        if m > text.len() {
            return false;
        }

        let mut t = 0;
        let mut p = 0;
        while t < text.len() {
            if text[t] == self.pattern[p] {
                t += 1;
                p += 1;
                if p == m {
                    return true;
                }
            } else if p > 0 {
                p = self.lps[p - 1];
            } else {
                t += 1;
            }
        }
        false
    }
}

fn build_lps(pattern: &[char]) -> Vec<usize> {
    let mut lps = vec![0; pattern.len()];
    let mut len = 0;
    let mut i = 1;
    while i < pattern.len() {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len > 0 {
            // Retry the same `i` against the next shorter border.
            len = lps[len - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }
    lps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(text: &str, pattern: &str) -> bool {
        let text: Vec<char> = text.to_lowercase().chars().collect();
        let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
        if pattern.is_empty() {
            return true;
        }
        text.windows(pattern.len()).any(|w| w == pattern.as_slice())
    }

    #[test]
    fn empty_pattern_matches_everything() {
        assert!(contains("", ""));
        assert!(contains("Meja Kayu", ""));
    }

    #[test]
    fn empty_text_matches_only_empty_pattern() {
        assert!(!contains("", "a"));
    }

    #[test]
    fn matching_ignores_case() {
        assert!(contains("Apple", "APP"));
        assert!(contains("MEJA KAYU", "kayu"));
        assert!(contains("kursi", "KuRsI"));
    }

    #[test]
    fn pattern_longer_than_text_is_never_found() {
        assert!(!contains("abc", "abcd"));
    }

    #[test]
    fn repeated_characters_do_not_under_or_over_match() {
        assert!(contains("aaaaaaab", "aaaa"));
        assert!(contains("aaaaaaab", "aaab"));
        assert!(!contains("aaaaaaab", "aaaaaaaa"));
        assert!(!contains("aaabaaa", "aaaa"));
    }

    #[test]
    fn mismatch_after_partial_match_falls_back_correctly() {
        // "abab" partially matches at 0, real match starts at 2.
        assert!(contains("abacababc", "ababc"));
        assert!(!contains("abacabab", "ababc"));
    }

    #[test]
    fn match_at_end_of_text() {
        assert!(contains("xyzabc", "abc"));
        assert!(contains("abc", "abc"));
    }

    #[test]
    fn overlap_table_matches_known_values() {
        assert_eq!(PrefixTable::new("aabaaab").overlaps(), &[0, 1, 0, 1, 2, 2, 3]);
        assert_eq!(PrefixTable::new("abab").overlaps(), &[0, 0, 1, 2]);
        assert_eq!(PrefixTable::new("aaaa").overlaps(), &[0, 1, 2, 3]);
        assert_eq!(PrefixTable::new("abcd").overlaps(), &[0, 0, 0, 0]);
        assert!(PrefixTable::new("").overlaps().is_empty());
    }

    #[test]
    fn overlap_table_is_built_from_lowercased_pattern() {
        assert_eq!(PrefixTable::new("AbAB").overlaps(), &[0, 0, 1, 2]);
    }

    #[test]
    fn non_ascii_text_is_compared_per_char() {
        assert!(contains("Kopi Gayo Ñandú", "ñANDú"));
        assert!(!contains("cafe", "café"));
    }

    #[test]
    fn table_is_reusable_across_texts() {
        let table = PrefixTable::new("kayu");
        assert!(table.is_found_in("Meja Kayu"));
        assert!(table.is_found_in("Kursi Kayu"));
        assert!(!table.is_found_in("Lemari Besi"));
        assert_eq!(table.len(), 4);
        assert!(!table.is_empty());
    }

    #[test]
    fn agrees_with_brute_force_on_small_alphabet_grid() {
        let texts = ["", "a", "ab", "aab", "abab", "aabaab", "babbab", "aaaaaaab"];
        let patterns = ["", "a", "b", "aa", "ab", "ba", "aab", "abab", "baab", "aaaa"];
        for text in texts {
            for pattern in patterns {
                assert_eq!(
                    contains(text, pattern),
                    brute_force(text, pattern),
                    "text={text:?} pattern={pattern:?}"
                );
            }
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 2000,
                ..ProptestConfig::default()
            })]

            /// Small alphabets force many partial matches and fallbacks.
            #[test]
            fn equivalent_to_brute_force(
                text in "[abAB]{0,24}",
                pattern in "[abAB]{0,6}"
            ) {
                prop_assert_eq!(contains(&text, &pattern), brute_force(&text, &pattern));
            }

            #[test]
            fn every_substring_is_found(
                text in "[a-zA-Z ]{1,40}",
                start in 0usize..40,
                len in 0usize..10
            ) {
                let chars: Vec<char> = text.chars().collect();
                let start = start % chars.len();
                let end = (start + len).min(chars.len());
                let needle: String = chars[start..end].iter().collect();
                prop_assert!(contains(&text, &needle.to_uppercase()));
            }
        }
    }
}
