use crate::models::{Category, CategoryType, Lesson, Scope, VocabularyItem};

pub const HSK_CATEGORIES: &[Category] = &[
    Category { id: "hsk1", name: "HSK 1", r#type: CategoryType::Hsk, level: Some(1), icon: "🌱" },
    Category { id: "hsk2", name: "HSK 2", r#type: CategoryType::Hsk, level: Some(2), icon: "🌿" },
    Category { id: "hsk3", name: "HSK 3", r#type: CategoryType::Hsk, level: Some(3), icon: "🌳" },
    Category { id: "hsk4", name: "HSK 4", r#type: CategoryType::Hsk, level: Some(4), icon: "⛰️" },
    Category { id: "hsk5", name: "HSK 5", r#type: CategoryType::Hsk, level: Some(5), icon: "🏔️" },
    Category { id: "hsk6", name: "HSK 6", r#type: CategoryType::Hsk, level: Some(6), icon: "🏆" },
];

pub const YCT_CATEGORIES: &[Category] = &[
    Category { id: "yct1", name: "YCT 1", r#type: CategoryType::Yct, level: Some(1), icon: "🐣" },
    Category { id: "yct2", name: "YCT 2", r#type: CategoryType::Yct, level: Some(2), icon: "🐥" },
    Category { id: "yct3", name: "YCT 3", r#type: CategoryType::Yct, level: Some(3), icon: "🐤" },
    Category { id: "yct4", name: "YCT 4", r#type: CategoryType::Yct, level: Some(4), icon: "🦅" },
];

pub const TOPIC_CATEGORIES: &[Category] = &[
    Category { id: "food", name: "Ẩm thực", r#type: CategoryType::Topic, level: None, icon: "🥟" },
    Category { id: "travel", name: "Du lịch", r#type: CategoryType::Topic, level: None, icon: "✈️" },
    Category { id: "business", name: "Kinh doanh", r#type: CategoryType::Topic, level: None, icon: "💼" },
    Category { id: "daily", name: "Đời sống", r#type: CategoryType::Topic, level: None, icon: "🏠" },
    Category { id: "tech", name: "Công nghệ", r#type: CategoryType::Topic, level: None, icon: "💻" },
    Category { id: "emotion", name: "Cảm xúc", r#type: CategoryType::Topic, level: None, icon: "❤️" },
];

pub fn all_categories() -> Vec<Category> {
    HSK_CATEGORIES
        .iter()
        .chain(YCT_CATEGORIES)
        .chain(TOPIC_CATEGORIES)
        .cloned()
        .collect()
}

struct SeedWord {
    id: &'static str,
    word: &'static str,
    pinyin: &'static str,
    part_of_speech: &'static str,
    definition_vi: &'static str,
    definition_en: &'static str,
    example_zh: &'static str,
    example_vi: &'static str,
}

struct SeedLesson {
    id: &'static str,
    scope_key: &'static str,
    number: i64,
    title: &'static str,
    description: &'static str,
    words: &'static [SeedWord],
}

// Curated starter content. Never merged with user lessons sharing an id:
// a static id always resolves to this data and rejects overwrites.
const SEED_LESSONS: &[SeedLesson] = &[
    SeedLesson {
        id: "hsk1-greetings",
        scope_key: "hsk1",
        number: 1,
        title: "Chào hỏi",
        description: "5 từ mới",
        words: &[
            SeedWord {
                id: "hsk1-greetings-001",
                word: "你好",
                pinyin: "nǐ hǎo",
                part_of_speech: "interj",
                definition_vi: "xin chào",
                definition_en: "hello",
                example_zh: "你好，我叫小明。",
                example_vi: "Xin chào, tôi tên là Tiểu Minh.",
            },
            SeedWord {
                id: "hsk1-greetings-002",
                word: "谢谢",
                pinyin: "xièxie",
                part_of_speech: "v",
                definition_vi: "cảm ơn",
                definition_en: "thanks",
                example_zh: "谢谢你的帮助。",
                example_vi: "Cảm ơn sự giúp đỡ của bạn.",
            },
            SeedWord {
                id: "hsk1-greetings-003",
                word: "再见",
                pinyin: "zàijiàn",
                part_of_speech: "v",
                definition_vi: "tạm biệt",
                definition_en: "goodbye",
                example_zh: "明天见，再见！",
                example_vi: "Hẹn mai gặp lại, tạm biệt!",
            },
            SeedWord {
                id: "hsk1-greetings-004",
                word: "不客气",
                pinyin: "bú kèqi",
                part_of_speech: "phrase",
                definition_vi: "không có gì",
                definition_en: "you're welcome",
                example_zh: "不客气，这是小事。",
                example_vi: "Không có gì, chuyện nhỏ thôi.",
            },
            SeedWord {
                id: "hsk1-greetings-005",
                word: "对不起",
                pinyin: "duìbuqǐ",
                part_of_speech: "v",
                definition_vi: "xin lỗi",
                definition_en: "sorry",
                example_zh: "对不起，我来晚了。",
                example_vi: "Xin lỗi, tôi đến muộn.",
            },
        ],
    },
    SeedLesson {
        id: "hsk1-numbers",
        scope_key: "hsk1",
        number: 2,
        title: "Số đếm",
        description: "3 từ mới",
        words: &[
            SeedWord {
                id: "hsk1-numbers-001",
                word: "一",
                pinyin: "yī",
                part_of_speech: "num",
                definition_vi: "một",
                definition_en: "one",
                example_zh: "我有一本书。",
                example_vi: "Tôi có một quyển sách.",
            },
            SeedWord {
                id: "hsk1-numbers-002",
                word: "二",
                pinyin: "èr",
                part_of_speech: "num",
                definition_vi: "hai",
                definition_en: "two",
                example_zh: "现在两点，不是二点。",
                example_vi: "Bây giờ là hai giờ.",
            },
            SeedWord {
                id: "hsk1-numbers-003",
                word: "三",
                pinyin: "sān",
                part_of_speech: "num",
                definition_vi: "ba",
                definition_en: "three",
                example_zh: "我们三个人一起去。",
                example_vi: "Ba chúng tôi cùng đi.",
            },
        ],
    },
];

pub fn static_lessons(scope: &Scope) -> Vec<Lesson> {
    let key = scope.key();
    SEED_LESSONS
        .iter()
        .filter(|seed| seed.scope_key == key)
        .map(|seed| Lesson {
            id: seed.id.to_string(),
            number: seed.number,
            title: seed.title.to_string(),
            description: seed.description.to_string(),
        })
        .collect()
}

pub fn static_vocabulary(lesson_id: &str) -> Option<Vec<VocabularyItem>> {
    let seed = SEED_LESSONS.iter().find(|seed| seed.id == lesson_id)?;
    Some(
        seed.words
            .iter()
            .map(|w| VocabularyItem {
                id: w.id.to_string(),
                word: w.word.to_string(),
                pinyin: w.pinyin.to_string(),
                part_of_speech: w.part_of_speech.to_string(),
                definition_vi: w.definition_vi.to_string(),
                definition_en: w.definition_en.to_string(),
                example_zh: w.example_zh.to_string(),
                example_vi: w.example_vi.to_string(),
                image_url: None,
            })
            .collect(),
    )
}

pub fn is_static_lesson(lesson_id: &str) -> bool {
    SEED_LESSONS.iter().any(|seed| seed.id == lesson_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_static_lesson_has_vocabulary() {
        for seed in SEED_LESSONS {
            let vocab = static_vocabulary(seed.id).expect("missing vocabulary");
            assert!(!vocab.is_empty());
            assert!(vocab.iter().all(|item| !item.word.is_empty()));
        }
    }

    #[test]
    fn static_ids_are_unique() {
        let mut ids: Vec<&str> = SEED_LESSONS.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SEED_LESSONS.len());
    }

    #[test]
    fn category_ids_parse_as_scopes() {
        for category in all_categories() {
            let scope = category.scope();
            assert_eq!(scope.key().parse::<Scope>().unwrap(), scope);
        }
    }

    #[test]
    fn hsk1_static_lessons_sorted_by_number() {
        let lessons = static_lessons(&Scope::Hsk(1));
        assert_eq!(lessons.len(), 2);
        assert!(lessons.windows(2).all(|w| w[0].number <= w[1].number));
    }

    #[test]
    fn unknown_scope_has_no_static_lessons() {
        assert!(static_lessons(&Scope::Hsk(6)).is_empty());
        assert!(static_lessons(&Scope::Topic("food".into())).is_empty());
    }
}
