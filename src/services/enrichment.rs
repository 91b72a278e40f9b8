use serde::Deserialize;
use thiserror::Error;

use crate::models::VocabularyItem;
use crate::services::llm_provider::{LlmError, LlmProvider};

const SYSTEM_PROMPT: &str = "Bạn là một chuyên gia từ điển Tiếng Trung - Việt.";

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("AI response was not a vocabulary array: {0}")]
    Parse(serde_json::Error),
    #[error("AI returned {actual} entries for {expected} words")]
    CountMismatch { expected: usize, actual: usize },
    #[error("AI returned an entry with an empty word")]
    EmptyWord,
}

/// Model output before an id is assigned. Only `word` is required; the
/// remaining fields default to empty strings so a sparse model answer still
/// yields complete persisted records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichedWord {
    word: String,
    #[serde(default)]
    pinyin: String,
    #[serde(default)]
    part_of_speech: String,
    #[serde(default)]
    definition_vi: String,
    #[serde(default)]
    definition_en: String,
    #[serde(default)]
    example_zh: String,
    #[serde(default)]
    example_vi: String,
}

/// Turns a raw block of newline/comma-separated words into structured
/// vocabulary records via one generative text call.
///
/// A zero-item result always means "enrichment failed or nothing was
/// entered"; callers must not persist it as a successful import.
#[derive(Clone)]
pub struct Enricher {
    provider: LlmProvider,
}

impl Enricher {
    pub fn new(provider: LlmProvider) -> Self {
        Self { provider }
    }

    pub fn from_env() -> Self {
        Self::new(LlmProvider::from_env())
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    pub async fn enrich(&self, raw_words: &str) -> Result<Vec<VocabularyItem>, EnrichError> {
        let tokens = split_raw_words(raw_words);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let content = self
            .provider
            .complete_with_system(SYSTEM_PROMPT, &build_prompt(&tokens))
            .await?;
        let words = parse_enriched(&content, tokens.len())?;

        let batch = chrono::Utc::now().timestamp_millis();
        Ok(words
            .into_iter()
            .enumerate()
            .map(|(idx, w)| VocabularyItem {
                // Zero-padded index keeps lexicographic id order equal to
                // input order, which the remote store sorts by.
                id: format!("custom-{batch}-{idx:03}"),
                word: w.word,
                pinyin: w.pinyin,
                part_of_speech: w.part_of_speech,
                definition_vi: w.definition_vi,
                definition_en: w.definition_en,
                example_zh: w.example_zh,
                example_vi: w.example_vi,
                image_url: None,
            })
            .collect())
    }
}

pub fn split_raw_words(raw: &str) -> Vec<String> {
    raw.split(['\n', '\r', ',', '，'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_prompt(tokens: &[String]) -> String {
    format!(
        "Tôi có danh sách các từ vựng sau: \"{}\"\n\n\
         Hãy tra cứu và trả về một mảng JSON các đối tượng từ vựng với cấu trúc:\n\
         {{\n\
           \"word\": \"Chữ Hán\",\n\
           \"pinyin\": \"Phiên âm có dấu\",\n\
           \"partOfSpeech\": \"Từ loại (n, v, adj...)\",\n\
           \"definitionVi\": \"Nghĩa tiếng Việt ngắn gọn\",\n\
           \"definitionEn\": \"Short English definition\",\n\
           \"exampleZh\": \"Câu ví dụ tiếng Trung\",\n\
           \"exampleVi\": \"Dịch nghĩa câu ví dụ\"\n\
         }}\n\n\
         Yêu cầu: trả về đúng {} phần tử, theo đúng thứ tự danh sách. \
         Chỉ trả về JSON array, không thêm văn bản giải thích.",
        tokens.join(", "),
        tokens.len(),
    )
}

fn parse_enriched(content: &str, expected: usize) -> Result<Vec<EnrichedWord>, EnrichError> {
    let json = strip_code_fences(content);
    let words: Vec<EnrichedWord> =
        serde_json::from_str(json.trim()).map_err(EnrichError::Parse)?;

    if words.len() != expected {
        return Err(EnrichError::CountMismatch {
            expected,
            actual: words.len(),
        });
    }
    if words.iter().any(|w| w.word.trim().is_empty()) {
        return Err(EnrichError::EmptyWord);
    }
    Ok(words)
}

fn strip_code_fences(s: &str) -> &str {
    s.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::llm_provider::LlmConfig;

    #[test]
    fn splits_on_newlines_and_commas() {
        assert_eq!(
            split_raw_words("苹果\n西瓜, 香蕉，葡萄"),
            vec!["苹果", "西瓜", "香蕉", "葡萄"]
        );
    }

    #[test]
    fn discards_empty_tokens() {
        assert_eq!(split_raw_words(""), Vec::<String>::new());
        assert_eq!(split_raw_words("   "), Vec::<String>::new());
        assert_eq!(split_raw_words("\n, ,\n"), Vec::<String>::new());
        assert_eq!(split_raw_words("苹果\n\n\n西瓜"), vec!["苹果", "西瓜"]);
    }

    #[test]
    fn parses_a_plain_json_array() {
        let content = r#"[
            {"word": "苹果", "pinyin": "píngguǒ", "definitionVi": "quả táo"},
            {"word": "西瓜"}
        ]"#;
        let words = parse_enriched(content, 2).unwrap();
        assert_eq!(words[0].word, "苹果");
        assert_eq!(words[0].definition_vi, "quả táo");
        assert_eq!(words[1].pinyin, "");
    }

    #[test]
    fn strips_markdown_fences() {
        let content = "```json\n[{\"word\": \"苹果\"}]\n```";
        assert_eq!(parse_enriched(content, 1).unwrap().len(), 1);
    }

    #[test]
    fn rejects_count_mismatch() {
        let content = r#"[{"word": "苹果"}]"#;
        let err = parse_enriched(content, 2).unwrap_err();
        assert!(matches!(
            err,
            EnrichError::CountMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn rejects_empty_words() {
        let content = r#"[{"word": "  "}]"#;
        assert!(matches!(
            parse_enriched(content, 1).unwrap_err(),
            EnrichError::EmptyWord
        ));
    }

    #[test]
    fn rejects_non_array_payloads() {
        assert!(matches!(
            parse_enriched("tôi không hiểu", 1).unwrap_err(),
            EnrichError::Parse(_)
        ));
    }

    #[tokio::test]
    async fn empty_input_short_circuits_without_external_call() {
        // An unconfigured provider errors on any request, so an Ok here
        // proves no request was attempted.
        let enricher = Enricher::new(LlmProvider::new(LlmConfig::disabled()));
        assert!(enricher.enrich("").await.unwrap().is_empty());
        assert!(enricher.enrich("  \n , ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_empty_input_reaches_the_provider() {
        let enricher = Enricher::new(LlmProvider::new(LlmConfig::disabled()));
        assert!(matches!(
            enricher.enrich("苹果").await.unwrap_err(),
            EnrichError::Llm(LlmError::Disabled(_))
        ));
    }
}
