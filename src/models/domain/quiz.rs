use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::domain::GeneratedQuiz;

/// Longest prefix of the extracted source text stored with a quiz.
pub const RAW_CONTENT_LIMIT_CHARS: usize = 20_000;
/// Persisted titles are capped to keep list views sane.
pub const TITLE_LIMIT_CHARS: usize = 100;

/// A generated quiz with its questions and options embedded. The whole unit
/// is written as a single document, so it is created (and deleted)
/// atomically. Records are immutable once persisted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    /// Locator used for cache lookup: the source url, or "file_upload" for
    /// uploaded-file and topic sources.
    pub url: String,
    pub title: String,
    pub summary: String,
    pub raw_content: String,
    pub key_entities: HashMap<String, Vec<String>>,
    pub sections: Vec<String>,
    pub related_topics: Vec<String>,
    pub questions: Vec<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub difficulty: String,
    pub explanation: String,
    pub options: Vec<QuizOption>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    pub correct: bool,
}

impl Quiz {
    /// Assembles a persistable quiz from the extraction output and the
    /// parsed backend payload.
    ///
    /// The generated summary doubles as the title when non-empty, else the
    /// extracted title is used; either way it is capped at 100 chars.
    /// `sections` is
    /// populated from `related_topics`, mirroring the upstream mapping.
    /// An option is flagged correct only on an exact string match with the
    /// stated answer, so an answer that matches no option leaves every
    /// option unflagged.
    pub fn from_parts(
        url: &str,
        extracted_title: &str,
        extracted_text: &str,
        generated: GeneratedQuiz,
    ) -> Self {
        let title = if generated.summary.is_empty() {
            truncate_chars(extracted_title, TITLE_LIMIT_CHARS)
        } else {
            truncate_chars(&generated.summary, TITLE_LIMIT_CHARS)
        };

        let questions = generated
            .quiz
            .into_iter()
            .map(|q| {
                let options = q
                    .options
                    .into_iter()
                    .map(|text| QuizOption {
                        id: Uuid::new_v4().to_string(),
                        correct: text == q.answer,
                        text,
                    })
                    .collect();

                QuizQuestion {
                    id: Uuid::new_v4().to_string(),
                    text: q.question,
                    difficulty: q.difficulty,
                    explanation: q.explanation,
                    options,
                }
            })
            .collect();

        Quiz {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title,
            summary: generated.summary,
            raw_content: truncate_chars(extracted_text, RAW_CONTENT_LIMIT_CHARS),
            key_entities: generated.key_entities,
            sections: generated.related_topics.clone(),
            related_topics: generated.related_topics,
            questions,
            created_at: Some(Utc::now()),
        }
    }
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}
