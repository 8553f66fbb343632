use crate::errors::{AppError, AppResult};

/// Locator stored for quizzes generated from an upload or a bare topic.
pub const FILE_UPLOAD_LOCATOR: &str = "file_upload";

/// An uploaded document, as received from the multipart form.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// The three ways a quiz can be sourced. Exactly one must be present;
/// when several are given the url wins, then the file, then the topic.
#[derive(Debug, Clone, Default)]
pub struct GenerateQuizRequest {
    pub url: Option<String>,
    pub file: Option<FileUpload>,
    pub topic: Option<String>,
}

#[derive(Debug, Clone)]
pub enum QuizSource {
    Url(String),
    File(FileUpload),
    Topic(String),
}

impl GenerateQuizRequest {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn from_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            ..Default::default()
        }
    }

    /// The cache key for this request: the url when given, else the
    /// literal upload marker (also used for topic requests, matching the
    /// original API).
    pub fn locator(&self) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| FILE_UPLOAD_LOCATOR.to_string())
    }

    pub fn into_source(self) -> AppResult<QuizSource> {
        if let Some(url) = self.url {
            return Ok(QuizSource::Url(url));
        }
        if let Some(file) = self.file {
            return Ok(QuizSource::File(file));
        }
        if let Some(topic) = self.topic {
            return Ok(QuizSource::Topic(topic));
        }
        Err(AppError::ValidationError(
            "Please provide a URL, a PDF file, or a Topic.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_is_a_validation_error() {
        let result = GenerateQuizRequest::default().into_source();
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn url_takes_precedence_over_topic() {
        let request = GenerateQuizRequest {
            url: Some("https://en.wikipedia.org/wiki/Rust".to_string()),
            topic: Some("Rust".to_string()),
            ..Default::default()
        };

        assert!(matches!(request.into_source(), Ok(QuizSource::Url(_))));
    }

    #[test]
    fn locator_defaults_to_upload_marker() {
        assert_eq!(
            GenerateQuizRequest::from_topic("Photosynthesis").locator(),
            FILE_UPLOAD_LOCATOR
        );

        let with_url = GenerateQuizRequest::from_url("https://example.com/a");
        assert_eq!(with_url.locator(), "https://example.com/a");
    }
}
