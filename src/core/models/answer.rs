use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::models::question::Question;

/// One entry of a submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submit {
    pub question_id: i32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i32,
    pub submission_id: i32,
    pub question_id: i32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerWithQuestion {
    #[serde(flatten)]
    pub answer: Answer,
    pub question: Question,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub submission_id: i32,
    pub question_id: i32,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct Query {
    pub submission_id_eq: Option<i32>,
}
