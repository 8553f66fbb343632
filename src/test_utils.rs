use crate::models::domain::{GeneratedQuestion, GeneratedQuiz, Quiz};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a persisted-shape quiz for a given locator.
    pub fn test_quiz_with_url(url: &str) -> Quiz {
        Quiz::from_parts(
            url,
            "Test Article",
            "Some extracted text.",
            test_generated_quiz(2),
        )
    }

    /// Creates a backend payload with `question_count` questions of four
    /// options each, the first option being the stated answer.
    pub fn test_generated_quiz(question_count: usize) -> GeneratedQuiz {
        GeneratedQuiz {
            summary: "A test summary.".to_string(),
            quiz: (0..question_count)
                .map(|i| GeneratedQuestion {
                    question: format!("Question {}?", i),
                    options: vec![
                        format!("Answer {}", i),
                        "Wrong A".to_string(),
                        "Wrong B".to_string(),
                        "Wrong C".to_string(),
                    ],
                    answer: format!("Answer {}", i),
                    difficulty: "Medium".to_string(),
                    explanation: format!("Explanation {}", i),
                })
                .collect(),
            related_topics: vec!["Topic 1".to_string(), "Topic 2".to_string()],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_quiz_with_url() {
        let quiz = test_quiz_with_url("https://example.com/article");
        assert_eq!(quiz.url, "https://example.com/article");
        assert_eq!(quiz.questions.len(), 2);
    }

    #[test]
    fn test_fixtures_generated_quiz() {
        let generated = test_generated_quiz(5);
        assert_eq!(generated.quiz.len(), 5);
        assert!(generated
            .quiz
            .iter()
            .all(|q| q.options.contains(&q.answer)));
    }
}
