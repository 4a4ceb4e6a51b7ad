//! Bounded Levenshtein distance and the fuzzy-equality policy built on it.

use crate::config::MatcherConfig;

/// Levenshtein distance between `a` and `b`, counted in Unicode scalar values.
///
/// With `max = Some(k)` the computation gives up as soon as the result is
/// known to exceed `k` and returns `k + 1`. Any result `<= k` is exact.
pub fn distance(a: &str, b: &str, max: Option<usize>) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if let Some(max) = max.filter(|&max| a.len().abs_diff(b.len()) > max) {
        return max + 1;
    }

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];

        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
            row_min = row_min.min(curr[j + 1]);
        }

        // Row minima never decrease, so nothing below `max` is reachable anymore.
        if let Some(max) = max.filter(|&max| row_min > max) {
            return max + 1;
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Largest edit distance tolerated for a target word of `len` characters,
/// using the default [`MatcherConfig`].
pub fn max_allowed_distance(len: usize) -> usize {
    MatcherConfig::default().max_allowed_distance(len)
}

/// Exact or threshold-bounded fuzzy equality of two normalized words.
///
/// The threshold comes from the length of `target`, so a short function word
/// in the reference text only ever matches itself.
pub fn is_fuzzy_match(spoken: &str, target: &str, config: &MatcherConfig) -> bool {
    if spoken == target {
        return true;
    }

    let threshold = config.max_allowed_distance(target.chars().count());
    threshold > 0 && distance(spoken, target, Some(threshold)) <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];

        for (i, row) in table.iter_mut().enumerate() {
            row[0] = i;
        }
        for j in 0..=b.len() {
            table[0][j] = j;
        }
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let cost = usize::from(a[i - 1] != b[j - 1]);
                table[i][j] = (table[i - 1][j] + 1)
                    .min(table[i][j - 1] + 1)
                    .min(table[i - 1][j - 1] + cost);
            }
        }

        table[a.len()][b.len()]
    }

    #[derive(Debug, Clone)]
    struct ShortWord(String);

    impl quickcheck::Arbitrary for ShortWord {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let len = *g.choose(&[0usize, 1, 2, 3, 4, 5, 6, 7]).unwrap();
            let text = (0..len)
                .map(|_| *g.choose(&['ا', 'ب', 'ل', 'م', 'ه']).unwrap())
                .collect();
            Self(text)
        }
    }

    #[test]
    fn known_distances() {
        assert_eq!(distance("", "abc", None), 3);
        assert_eq!(distance("abc", "", None), 3);
        assert_eq!(distance("kitten", "sitting", None), 3);
        assert_eq!(distance("flaw", "lawn", None), 2);
        assert_eq!(distance("سبحان", "سبحان", None), 0);
        assert_eq!(distance("الحمد", "الحمدلله", None), 3);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(distance("الله", "اللة", None), 1);
        assert_eq!(distance("ب", "", None), 1);
    }

    #[test]
    fn length_gap_exits_early() {
        assert_eq!(distance("a", "abcdef", Some(2)), 3);
        assert_eq!(distance("", "abc", Some(1)), 2);
    }

    #[test]
    fn row_minimum_exits_early() {
        assert_eq!(distance("abcd", "wxyz", Some(1)), 2);
        assert_eq!(distance("kitten", "sitting", Some(3)), 3);
        assert_eq!(distance("kitten", "sitting", Some(2)), 3);
    }

    #[test]
    fn threshold_policy() {
        assert_eq!(max_allowed_distance(0), 0);
        assert_eq!(max_allowed_distance(1), 0);
        assert_eq!(max_allowed_distance(2), 0);
        assert_eq!(max_allowed_distance(3), 1);
        assert_eq!(max_allowed_distance(4), 1);
        assert_eq!(max_allowed_distance(5), 1);
        assert_eq!(max_allowed_distance(6), 2);
        assert_eq!(max_allowed_distance(12), 2);
    }

    #[test]
    fn short_words_never_fuzzy_match() {
        let config = MatcherConfig::default();
        assert!(is_fuzzy_match("من", "من", &config));
        assert!(!is_fuzzy_match("في", "من", &config));
        assert!(!is_fuzzy_match("ما", "من", &config));
        assert!(!is_fuzzy_match("عن", "من", &config));
    }

    #[test]
    fn long_words_tolerate_noise() {
        let config = MatcherConfig::default();
        assert!(is_fuzzy_match("سبحن", "سبحان", &config));
        assert!(!is_fuzzy_match("سبح", "سبحان", &config));
        assert!(!is_fuzzy_match("استغفر", "استغفرالله", &config));
        assert!(is_fuzzy_match("العظم", "العظيم", &config));
        assert!(is_fuzzy_match("لعظم", "العظيم", &config));
    }

    #[quickcheck_macros::quickcheck]
    fn prop_identity_is_zero(word: ShortWord) -> bool {
        distance(&word.0, &word.0, None) == 0 && distance(&word.0, &word.0, Some(0)) == 0
    }

    #[quickcheck_macros::quickcheck]
    fn prop_bounded_agrees_with_exact(a: ShortWord, b: ShortWord, k: u8) -> bool {
        let k = k as usize % 4;
        let exact = brute_force(&a.0, &b.0);
        let bounded = distance(&a.0, &b.0, Some(k));

        if exact > k {
            bounded > k
        } else {
            bounded == exact
        }
    }

    #[quickcheck_macros::quickcheck]
    fn prop_symmetric(a: ShortWord, b: ShortWord) -> bool {
        distance(&a.0, &b.0, None) == distance(&b.0, &a.0, None)
    }
}
