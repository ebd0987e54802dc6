use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(sqlx::Type)]
#[sqlx(type_name = "question_type")]
#[sqlx(rename_all = "UPPERCASE")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionType {
    #[default]
    Text,
    Number,
    Email,
    Date,
    Select,
    Multiselect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub survey_id: i32,
    pub text: String,
    #[serde(rename = "type")]
    pub type_: QuestionType,
    pub required: bool,
    pub options: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn is_choice(&self) -> bool {
        matches!(self.type_, QuestionType::Select | QuestionType::Multiselect)
    }

    /// Option labels in declaration order, trimmed, blanks dropped.
    pub fn option_list(&self) -> Vec<&str> {
        self.options
            .as_deref()
            .map(|opts| opts.split(',').map(str::trim).filter(|o| !o.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Whether `value` satisfies this question's required flag.
    pub fn accepts(&self, value: Option<&str>) -> bool {
        !self.required || value.map_or(false, |v| !v.trim().is_empty())
    }
}

#[derive(Debug, Default)]
pub struct Query {
    pub survey_id_eq: Option<i32>,
    pub id_in: Option<Vec<i32>>,
}
