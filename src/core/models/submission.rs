use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::models::{
    answer::{AnswerWithQuestion, Submit as AnswerSubmit},
    survey::Survey,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<AnswerSubmit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    pub submission_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i32,
    pub survey_id: i32,
    pub created_at: DateTime<Utc>,
}

/// A submission with its survey and answers, as shown on the confirmation page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetail {
    pub id: i32,
    pub survey_id: i32,
    pub created_at: DateTime<Utc>,
    pub survey: Survey,
    pub answers: Vec<AnswerWithQuestion>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub survey_id: i32,
}

#[derive(Debug, Default)]
pub struct Query {
    pub survey_id_eq: Option<i32>,
}
