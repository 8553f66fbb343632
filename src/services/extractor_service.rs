use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use crate::{
    errors::{AppError, AppResult},
    models::dto::request::QuizSource,
};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.107 Safari/537.36",
];

static TITLE_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1#firstHeading").expect("TITLE_HEADING is a valid selector"));
static ANY_H1: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("ANY_H1 is a valid selector"));
static CONTENT_DIV: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#mw-content-text").expect("CONTENT_DIV is a valid selector"));
static ARTICLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article").expect("ARTICLE is a valid selector"));
static BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("BODY is a valid selector"));
static PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("PARAGRAPH is a valid selector"));
static SECTION_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, h3").expect("SECTION_HEADING is a valid selector"));

/// Plain text pulled out of a source, plus its title and any section
/// headings found along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSource {
    pub title: String,
    pub content: String,
    pub sections: Vec<String>,
}

/// Turns each of the three source variants into plain text and a title.
/// Either succeeds with non-silent content or fails with a typed error.
pub struct SourceExtractor {
    http: reqwest::Client,
}

impl SourceExtractor {
    pub fn new() -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    pub async fn extract(&self, source: &QuizSource) -> AppResult<ExtractedSource> {
        match source {
            QuizSource::Url(url) => self.scrape_article(url).await,
            QuizSource::File(file) => {
                let content = extract_pdf_text(&file.bytes)?;
                Ok(ExtractedSource {
                    title: file.filename.clone().unwrap_or_default(),
                    content,
                    sections: vec![],
                })
            }
            QuizSource::Topic(topic) => Ok(topic_source(topic)),
        }
    }

    /// Fetches an article page with a randomly chosen browser identity and
    /// a fixed timeout, then parses out title, body text and sections.
    pub async fn scrape_article(&self, url: &str) -> AppResult<ExtractedSource> {
        let user_agent = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);

        log::info!("Fetching article: {}", url);
        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?
            .error_for_status()?;

        let html = response.text().await?;
        parse_article_html(&html)
    }
}

/// Parses article markup: a title heading with fallbacks, a main-content
/// container with fallbacks, paragraph text joined by blank lines, and
/// h2/h3 section headings with any "[edit]" marker removed.
pub fn parse_article_html(html: &str) -> AppResult<ExtractedSource> {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_HEADING)
        .next()
        .or_else(|| document.select(&ANY_H1).next())
        .map(element_text)
        .unwrap_or_else(|| "Untitled Article".to_string());

    let container = document
        .select(&CONTENT_DIV)
        .next()
        .or_else(|| document.select(&ARTICLE).next())
        .or_else(|| document.select(&BODY).next())
        .ok_or_else(|| AppError::ExtractionError("Could not find article content.".to_string()))?;

    let mut content = String::new();
    for paragraph in container.select(&PARAGRAPH) {
        let text = element_text(paragraph);
        if !text.is_empty() {
            content.push_str(&text);
            content.push_str("\n\n");
        }
    }

    let sections = container
        .select(&SECTION_HEADING)
        .map(|heading| element_text(heading).replace("[edit]", "").trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    Ok(ExtractedSource {
        title,
        content,
        sections,
    })
}

/// Concatenates the text of every page of a PDF, each followed by a
/// newline.
pub fn extract_pdf_text(bytes: &[u8]) -> AppResult<String> {
    let document = lopdf::Document::load_mem(bytes).map_err(|e| {
        AppError::ExtractionError(format!("Failed to extract text from PDF: {}", e))
    })?;

    let mut text = String::new();
    for (page_number, _) in document.get_pages() {
        let page_text = document.extract_text(&[page_number]).map_err(|e| {
            AppError::ExtractionError(format!("Failed to extract text from PDF: {}", e))
        })?;
        text.push_str(&page_text);
        text.push('\n');
    }

    Ok(text)
}

/// A bare topic needs no extraction; the instruction itself becomes the
/// source text.
pub fn topic_source(topic: &str) -> ExtractedSource {
    ExtractedSource {
        title: format!("Quiz: {}", topic),
        content: format!("Generate a quiz about: {}", topic),
        sections: vec![],
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIKI_HTML: &str = r#"
        <html><body>
        <h1 id="firstHeading">Photosynthesis</h1>
        <div id="mw-content-text">
            <p>Photosynthesis is a process used by plants.</p>
            <p>   </p>
            <p>It converts light energy into chemical energy.</p>
            <h2>Overview[edit]</h2>
            <h3>Light reactions[edit]</h3>
            <h2></h2>
        </div>
        </body></html>
    "#;

    #[test]
    fn parses_title_content_and_sections() {
        let extracted = parse_article_html(WIKI_HTML).expect("should parse");

        assert_eq!(extracted.title, "Photosynthesis");
        assert_eq!(
            extracted.content,
            "Photosynthesis is a process used by plants.\n\n\
             It converts light energy into chemical energy.\n\n"
        );
        assert_eq!(extracted.sections, vec!["Overview", "Light reactions"]);
    }

    #[test]
    fn title_falls_back_to_any_h1() {
        let html = "<html><body><h1>Some Article</h1><article><p>Body.</p></article></body></html>";
        let extracted = parse_article_html(html).expect("should parse");

        assert_eq!(extracted.title, "Some Article");
        assert_eq!(extracted.content, "Body.\n\n");
    }

    #[test]
    fn title_defaults_when_no_heading_present() {
        let html = "<html><body><p>Just a paragraph.</p></body></html>";
        let extracted = parse_article_html(html).expect("should parse");

        assert_eq!(extracted.title, "Untitled Article");
        // No content div or article tag, so the whole body is the container.
        assert_eq!(extracted.content, "Just a paragraph.\n\n");
    }

    #[test]
    fn content_div_is_preferred_over_article() {
        let html = r#"
            <html><body>
            <div id="mw-content-text"><p>From the div.</p></div>
            <article><p>From the article.</p></article>
            </body></html>
        "#;
        let extracted = parse_article_html(html).expect("should parse");

        assert_eq!(extracted.content, "From the div.\n\n");
    }

    #[test]
    fn invalid_pdf_is_an_extraction_error() {
        let result = extract_pdf_text(b"this is not a pdf");
        assert!(matches!(result, Err(AppError::ExtractionError(_))));
    }

    #[test]
    fn topic_source_synthesizes_text_and_title() {
        let extracted = topic_source("Photosynthesis");

        assert_eq!(extracted.content, "Generate a quiz about: Photosynthesis");
        assert_eq!(extracted.title, "Quiz: Photosynthesis");
        assert!(extracted.sections.is_empty());
    }
}
