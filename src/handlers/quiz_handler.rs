use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::FileUpload, GenerateQuizRequest},
};

/// Multipart form for the generate endpoint: a url, an uploaded PDF, or a
/// bare topic. Exactly one is expected; the service validates.
#[derive(Debug, MultipartForm)]
pub struct GenerateQuizForm {
    pub url: Option<Text<String>>,
    pub topic: Option<Text<String>>,
    #[multipart(limit = "16MiB")]
    pub file: Option<Bytes>,
}

impl From<GenerateQuizForm> for GenerateQuizRequest {
    fn from(form: GenerateQuizForm) -> Self {
        GenerateQuizRequest {
            // Empty form fields count as absent, same as the upstream API.
            url: form.url.map(|t| t.0).filter(|s| !s.trim().is_empty()),
            topic: form.topic.map(|t| t.0).filter(|s| !s.trim().is_empty()),
            file: form.file.map(|f| FileUpload {
                filename: f.file_name.clone(),
                bytes: f.data.to_vec(),
            }),
        }
    }
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Welcome to the AI Quiz Generator API" }))
}

#[post("/api/generate")]
async fn generate_quiz(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<GenerateQuizForm>,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_service.generate(form.into()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/quizzes")]
async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes().await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/api/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}
