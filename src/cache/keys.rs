use crate::models::Scope;

pub fn lessons_key(scope: &Scope) -> String {
    format!("zw_v2_{}_lessons", scope.key())
}

pub fn vocabulary_key(lesson_id: &str) -> String {
    format!("zw_v2_vocab_{}", sanitize(lesson_id))
}

// Lesson ids become file names; anything outside a conservative charset is
// replaced so a store-assigned id cannot escape the cache directory.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lessons_key_uses_scope_key() {
        let scope: Scope = "hsk3".parse().unwrap();
        assert_eq!(lessons_key(&scope), "zw_v2_hsk3_lessons");
    }

    #[test]
    fn vocabulary_key_sanitizes_hostile_ids() {
        assert_eq!(vocabulary_key("custom-17-001"), "zw_v2_vocab_custom-17-001");
        assert_eq!(vocabulary_key("../etc/passwd"), "zw_v2_vocab_.._etc_passwd");
        assert_eq!(vocabulary_key("bài học"), "zw_v2_vocab_b_i_h_c");
    }
}
