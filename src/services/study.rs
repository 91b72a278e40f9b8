use rand::seq::SliceRandom;

// Punctuation ignored when comparing a typed dictation answer against the
// expected sentence: fullwidth CJK marks plus their ASCII counterparts.
const IGNORED_PUNCTUATION: &[char] = &[
    '，', '。', '！', '？', '；', '：', '“', '”', '‘', '’', '（', '）', '【', '】', '《', '》',
    ',', '.', '!', '?', ';', ':',
];

/// Strips ignored punctuation and all whitespace, then lowercases.
pub fn normalize_answer(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !IGNORED_PUNCTUATION.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn check_answer(expected: &str, given: &str) -> bool {
    normalize_answer(expected) == normalize_answer(given)
}

/// Unbiased in-place shuffle for flashcard and review order.
pub fn shuffle<T>(items: &mut [T]) {
    items.shuffle(&mut rand::rng());
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalization_strips_punctuation_and_whitespace() {
        assert_eq!(normalize_answer("你好，世界！"), "你好世界");
        assert_eq!(normalize_answer("  Nǐ hǎo.  "), "nǐhǎo");
        assert_eq!(normalize_answer("（一、二）"), "一、二");
    }

    #[test]
    fn dictation_comparison_ignores_punctuation_differences() {
        assert!(check_answer("你好，我叫小明。", "你好我叫小明"));
        assert!(check_answer("谢谢你的帮助。", " 谢谢你的帮助！"));
        assert!(!check_answer("你好", "您好"));
    }

    #[test]
    fn empty_answers_match_empty_expectations() {
        assert!(check_answer("。！？", "  "));
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(text in ".{0,40}") {
            let once = normalize_answer(&text);
            prop_assert_eq!(normalize_answer(&once), once);
        }

        #[test]
        fn shuffle_preserves_the_multiset(mut items in proptest::collection::vec(0u32..100, 0..30)) {
            let mut shuffled = items.clone();
            shuffle(&mut shuffled);
            shuffled.sort_unstable();
            items.sort_unstable();
            prop_assert_eq!(shuffled, items);
        }
    }
}
