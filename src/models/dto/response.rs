use serde::Serialize;
use std::collections::HashMap;

use crate::models::domain::{Quiz, QuizQuestion};

#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub key_entities: HashMap<String, Vec<String>>,
    pub sections: Vec<String>,
    pub quiz: Vec<QuestionResponse>,
    pub related_topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub difficulty: String,
    pub explanation: String,
}

impl From<QuizQuestion> for QuestionResponse {
    fn from(question: QuizQuestion) -> Self {
        // The answer is recovered from the flagged option; a question with
        // no flagged option answers with an empty string.
        let answer = question
            .options
            .iter()
            .find(|o| o.correct)
            .map(|o| o.text.clone())
            .unwrap_or_default();

        QuestionResponse {
            question: question.text,
            options: question.options.into_iter().map(|o| o.text).collect(),
            answer,
            difficulty: question.difficulty,
            explanation: question.explanation,
        }
    }
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        QuizResponse {
            id: quiz.id,
            url: quiz.url,
            title: quiz.title,
            summary: quiz.summary,
            key_entities: quiz.key_entities,
            sections: quiz.sections,
            quiz: quiz
                .questions
                .into_iter()
                .map(QuestionResponse::from)
                .collect(),
            related_topics: quiz.related_topics,
        }
    }
}
