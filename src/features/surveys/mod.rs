//! Satisfaction surveys: the surveys themselves, their ordered questions, and
//! the answers workers submit per course.

pub mod client;
pub mod types;

pub use types::{
    Answer, AnswerInput, CreateQuestionRequest, CreateSurveyRequest, NewQuestion, Question,
    SubmitAnswersRequest, Survey, UpdateQuestionRequest, UpdateSurveyRequest,
};
