use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::question::Question;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Sorted ascending by `order_index`.
    pub questions: Vec<Question>,
}

impl Survey {
    pub fn required_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.required)
    }
}
