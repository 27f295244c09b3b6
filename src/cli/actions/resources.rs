//! Read-only queries over the resource clients. Results are printed as JSON.

use super::{print_json, session_store};
use crate::{
    client::{ApiClient, AppConfig, AppError},
    features::{
        attendances::client as attendances, courses::client as courses,
        departments::client as departments, enrollments::client as enrollments,
        periods::client as periods, surveys::client as surveys, workers::client as workers,
    },
};
use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourseView {
    Instructors,
    Enrollments,
    Attendances,
    Surveys,
    Answers,
}

impl CourseView {
    #[must_use]
    pub fn parse(view: &str) -> Option<Self> {
        match view {
            "instructors" => Some(Self::Instructors),
            "enrollments" => Some(Self::Enrollments),
            "attendances" => Some(Self::Attendances),
            "surveys" => Some(Self::Surveys),
            "answers" => Some(Self::Answers),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Courses {
        id: Option<String>,
        view: Option<CourseView>,
        date: Option<String>,
    },
    Departments {
        id: Option<String>,
    },
    Periods {
        id: Option<String>,
    },
    Workers {
        id: Option<String>,
        department: Option<String>,
    },
    Enrollments {
        id: Option<String>,
        mine: bool,
    },
    Attendances {
        id: Option<String>,
        course: Option<String>,
        date: Option<String>,
    },
    Surveys {
        id: Option<String>,
        questions: bool,
    },
}

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub query: Query,
}

/// Run a resource query with the stored token.
/// # Errors
/// Returns an error with the server's message if the request fails.
pub async fn execute(args: Args) -> Result<()> {
    let store = session_store(&args.config)?;
    let output = fetch(store.api(), &args.query).await.map_err(|err| {
        if err.is_unauthorized() {
            anyhow!("Not signed in or not allowed. Run `coursedesk login` first.")
        } else {
            anyhow!(err.detail().map_or_else(|| err.to_string(), str::to_string))
        }
    })?;
    print_json(&output)
}

/// Issues the request a query maps to.
///
/// # Errors
/// Returns `AppError` from the underlying client.
#[instrument(skip(api))]
pub async fn fetch(api: &ApiClient, query: &Query) -> Result<Value, AppError> {
    match query {
        Query::Courses { id: None, .. } => to_value(courses::list_courses(api).await?),
        Query::Courses {
            id: Some(id),
            view: None,
            ..
        } => to_value(courses::get_course(api, id).await?),
        Query::Courses {
            id: Some(id),
            view: Some(view),
            date,
        } => match view {
            CourseView::Instructors => to_value(courses::list_instructors(api, id).await?),
            CourseView::Enrollments => to_value(courses::list_course_enrollments(api, id).await?),
            CourseView::Attendances => {
                to_value(courses::list_course_attendances(api, id, date.as_deref()).await?)
            }
            CourseView::Surveys => to_value(courses::list_course_surveys(api, id).await?),
            CourseView::Answers => to_value(surveys::list_course_answers(api, id).await?),
        },
        Query::Departments { id: None } => to_value(departments::list_departments(api).await?),
        Query::Departments { id: Some(id) } => to_value(departments::get_department(api, id).await?),
        Query::Periods { id: None } => to_value(periods::list_periods(api).await?),
        Query::Periods { id: Some(id) } => to_value(periods::get_period(api, id).await?),
        Query::Workers { id: Some(id), .. } => to_value(workers::get_worker(api, id).await?),
        Query::Workers {
            id: None,
            department: Some(department),
        } => to_value(workers::list_by_department(api, department).await?),
        Query::Workers { id: None, department: None } => to_value(workers::list_workers(api).await?),
        Query::Enrollments { id: Some(id), .. } => {
            to_value(enrollments::get_enrollment(api, id).await?)
        }
        Query::Enrollments { id: None, mine: true } => {
            to_value(enrollments::list_my_enrollments(api).await?)
        }
        Query::Enrollments { id: None, mine: false } => {
            to_value(enrollments::list_enrollments(api).await?)
        }
        Query::Attendances { id: Some(id), .. } => {
            to_value(attendances::get_attendance(api, id).await?)
        }
        Query::Attendances {
            id: None,
            course: Some(course),
            date,
        } => to_value(attendances::list_by_course(api, course, date.as_deref()).await?),
        Query::Attendances { id: None, course: None, .. } => {
            to_value(attendances::list_attendances(api).await?)
        }
        Query::Surveys {
            id: Some(id),
            questions: true,
        } => to_value(surveys::list_questions(api, id).await?),
        Query::Surveys {
            id: Some(id),
            questions: false,
        } => to_value(surveys::get_survey(api, id).await?),
        Query::Surveys { id: None, .. } => to_value(surveys::list_surveys(api).await?),
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, AppError> {
    serde_json::to_value(value)
        .map_err(|err| AppError::Serialization(format!("Failed to encode output: {err}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::test_support::{api, can_bind_localhost};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn course_views_parse() {
        assert_eq!(CourseView::parse("answers"), Some(CourseView::Answers));
        assert_eq!(CourseView::parse("grades"), None);
    }

    #[tokio::test]
    async fn mine_uses_personal_endpoint() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/enrollments/me"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let value = fetch(&api(&server), &Query::Enrollments { id: None, mine: true })
            .await
            .unwrap();
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn course_attendance_view_passes_date() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses/c1/attendances"))
            .and(query_param("date", "2025-01-07"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"worker_id": "w1"}])))
            .expect(1)
            .mount(&server)
            .await;

        let value = fetch(
            &api(&server),
            &Query::Courses {
                id: Some("c1".to_string()),
                view: Some(CourseView::Attendances),
                date: Some("2025-01-07".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(value, json!([{"worker_id": "w1"}]));
    }

    #[tokio::test]
    async fn department_listing_is_unwrapped() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/departments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"id": "d1", "name": "Systems"}],
                "total_pages": 1,
                "page": 1,
                "total_count": 1
            })))
            .mount(&server)
            .await;

        let value = fetch(&api(&server), &Query::Departments { id: None })
            .await
            .unwrap();
        assert_eq!(value, json!([{"id": "d1", "name": "Systems"}]));
    }
}
