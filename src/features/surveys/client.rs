//! Client wrappers for `/surveys`, `/questions` and `/answers`.

use super::types::{
    Answer, CreateQuestionRequest, CreateSurveyRequest, Question, SubmitAnswersRequest, Survey,
    UpdateQuestionRequest, UpdateSurveyRequest,
};
use crate::{
    client::{ApiClient, AppError},
    features::require_id,
};
use tracing::instrument;

/// # Errors
/// Returns `AppError` if the request fails or the response is invalid.
pub async fn list_surveys(api: &ApiClient) -> Result<Vec<Survey>, AppError> {
    api.get_items("/surveys").await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn get_survey(api: &ApiClient, id: &str) -> Result<Survey, AppError> {
    let id = require_id("Survey", id)?;
    api.get_json(&format!("/surveys/{id}")).await
}

/// Creates a survey along with its questions.
///
/// # Errors
/// Returns `AppError` if the backend rejects the survey.
#[instrument(skip_all, fields(name = %data.name, questions = data.questions.len()))]
pub async fn create_survey(api: &ApiClient, data: &CreateSurveyRequest) -> Result<Survey, AppError> {
    api.post_json("/surveys", data).await
}

/// Renames a survey.
///
/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api, data))]
pub async fn update_survey(
    api: &ApiClient,
    id: &str,
    data: &UpdateSurveyRequest,
) -> Result<Survey, AppError> {
    let id = require_id("Survey", id)?;
    api.put_json(&format!("/surveys/{id}"), data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api))]
pub async fn delete_survey(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let id = require_id("Survey", id)?;
    api.delete(&format!("/surveys/{id}")).await
}

/// Questions of a survey, in backend order.
///
/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn list_questions(api: &ApiClient, survey_id: &str) -> Result<Vec<Question>, AppError> {
    let survey_id = require_id("Survey", survey_id)?;
    api.get_json(&format!("/surveys/{survey_id}/questions")).await
}

/// # Errors
/// Returns `AppError` if the backend rejects the question.
#[instrument(skip_all, fields(survey_id = %data.survey_id))]
pub async fn create_question(
    api: &ApiClient,
    data: &CreateQuestionRequest,
) -> Result<Question, AppError> {
    api.post_json("/questions", data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api, data))]
pub async fn update_question(
    api: &ApiClient,
    id: &str,
    data: &UpdateQuestionRequest,
) -> Result<Question, AppError> {
    let id = require_id("Question", id)?;
    api.put_json(&format!("/questions/{id}"), data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api))]
pub async fn delete_question(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let id = require_id("Question", id)?;
    api.delete(&format!("/questions/{id}")).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn list_course_answers(api: &ApiClient, course_id: &str) -> Result<Vec<Answer>, AppError> {
    let course_id = require_id("Course", course_id)?;
    api.get_json(&format!("/courses/{course_id}/answers")).await
}

/// Submits the signed-in worker's answers for a course.
///
/// # Errors
/// Returns `AppError` if the backend rejects the submission.
#[instrument(skip_all, fields(course_id = %data.course_id, answers = data.answers.len()))]
pub async fn submit_answers(
    api: &ApiClient,
    data: &SubmitAnswersRequest,
) -> Result<Vec<Answer>, AppError> {
    api.post_json("/answers/submit", data).await
}

/// # Errors
/// Returns `AppError` if an id is blank or the request fails.
pub async fn list_worker_answers(
    api: &ApiClient,
    worker_id: &str,
    course_id: &str,
) -> Result<Vec<Answer>, AppError> {
    let worker_id = require_id("Worker", worker_id)?;
    let course_id = require_id("Course", course_id)?;
    api.get_json(&format!("/answers/worker/{worker_id}/course/{course_id}"))
        .await
}
