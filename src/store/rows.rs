use serde::{Deserialize, Serialize};

use crate::models::{Lesson, Scope, VocabularyItem};

/// Row shape of the hosted `lessons` table. Column names are underscore
/// separated; the camelCase application shape exists only on our side of
/// this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRow {
    pub id: String,
    pub level: String,
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl LessonRow {
    pub fn from_lesson(scope: &Scope, lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.clone(),
            level: scope.key(),
            number: lesson.number,
            title: lesson.title.clone(),
            description: lesson.description.clone(),
        }
    }
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Lesson {
            id: row.id,
            number: row.number,
            title: row.title,
            description: row.description,
        }
    }
}

/// Row shape of the hosted `vocabulary` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyRow {
    pub id: String,
    pub lesson_id: String,
    pub word: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definition_vi: String,
    #[serde(default)]
    pub definition_en: String,
    #[serde(default)]
    pub example_zh: String,
    #[serde(default)]
    pub example_vi: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl VocabularyRow {
    pub fn from_item(lesson_id: &str, item: &VocabularyItem) -> Self {
        Self {
            id: item.id.clone(),
            lesson_id: lesson_id.to_string(),
            word: item.word.clone(),
            pinyin: item.pinyin.clone(),
            part_of_speech: item.part_of_speech.clone(),
            definition_vi: item.definition_vi.clone(),
            definition_en: item.definition_en.clone(),
            example_zh: item.example_zh.clone(),
            example_vi: item.example_vi.clone(),
            image_url: item.image_url.clone(),
        }
    }
}

impl From<VocabularyRow> for VocabularyItem {
    fn from(row: VocabularyRow) -> Self {
        VocabularyItem {
            id: row.id,
            word: row.word,
            pinyin: row.pinyin,
            part_of_speech: row.part_of_speech,
            definition_vi: row.definition_vi,
            definition_en: row.definition_en,
            example_zh: row.example_zh,
            example_vi: row.example_vi,
            image_url: row.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_row_translation_round_trips() {
        let scope: Scope = "hsk1".parse().unwrap();
        let lesson = Lesson {
            id: "lesson-1".into(),
            number: 3,
            title: "Chào hỏi".into(),
            description: "5 từ mới".into(),
        };
        let row = LessonRow::from_lesson(&scope, &lesson);
        assert_eq!(row.level, "hsk1");
        assert_eq!(Lesson::from(row), lesson);
    }

    #[test]
    fn vocabulary_row_uses_snake_case_on_the_wire() {
        let item = VocabularyItem {
            id: "v1".into(),
            word: "你好".into(),
            pinyin: "nǐ hǎo".into(),
            part_of_speech: "interj".into(),
            definition_vi: "xin chào".into(),
            definition_en: "hello".into(),
            example_zh: String::new(),
            example_vi: String::new(),
            image_url: None,
        };
        let row = VocabularyRow::from_item("lesson-1", &item);
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("part_of_speech").is_some());
        assert!(json.get("definition_vi").is_some());
        assert_eq!(json.get("lesson_id").unwrap(), "lesson-1");
        assert_eq!(VocabularyItem::from(row), item);
    }
}
