use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::core::models::{question::Question, survey::Survey};

#[derive(Debug, Clone, FromRow)]
pub struct SurveyRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl SurveyRow {
    pub fn with_questions(self, questions: Vec<Question>) -> Survey {
        Survey {
            id: self.id,
            title: self.title,
            description: self.description,
            created_at: self.created_at,
            questions,
        }
    }
}

impl From<&Survey> for SurveyRow {
    fn from(survey: &Survey) -> Self {
        SurveyRow {
            id: survey.id,
            title: survey.title.clone(),
            description: survey.description.clone(),
            created_at: survey.created_at,
        }
    }
}
