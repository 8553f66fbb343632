pub mod generated;
pub mod quiz;

pub use generated::{GeneratedQuestion, GeneratedQuiz};
pub use quiz::{Quiz, QuizOption, QuizQuestion};
