pub mod request;
pub mod response;

pub use request::{FileUpload, GenerateQuizRequest, QuizSource};
pub use response::{QuestionResponse, QuizResponse};
