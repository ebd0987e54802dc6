use chrono::Utc;

use crate::core::models::{
    question::{Question, QuestionType},
    survey::Survey,
};
use crate::core::ports::repository::Manager;
use crate::database::{
    memory::{MemorySession, MemoryStore},
    seed::intake_survey,
};
use crate::error::Error;

pub fn question(id: i32, survey_id: i32, type_: QuestionType, required: bool, order_index: i32) -> Question {
    Question {
        id,
        survey_id,
        text: format!("question {}", id),
        type_,
        required,
        options: None,
        order_index,
        created_at: Utc::now(),
    }
}

fn survey(id: i32, questions: Vec<Question>) -> Survey {
    Survey {
        id,
        title: format!("survey {}", id),
        description: String::new(),
        created_at: Utc::now(),
        questions,
    }
}

/// Survey 1: required TEXT question 10 and optional SELECT question 11 ("A,B").
/// Survey 2: optional question 20.
pub fn scenario_store() -> MemoryStore {
    let mut optional = question(11, 1, QuestionType::Select, false, 2);
    optional.options = Some("A,B".into());
    MemoryStore::with_surveys(vec![
        survey(1, vec![optional, question(10, 1, QuestionType::Text, true, 1)]),
        survey(2, vec![question(20, 2, QuestionType::Text, false, 1)]),
    ])
}

pub fn intake_store() -> MemoryStore {
    MemoryStore::with_surveys(vec![intake_survey()])
}

/// A manager whose storage can never be reached.
pub struct Unreachable;

impl Manager for Unreachable {
    type Store = MemorySession;
    type TxStore = MemorySession;

    async fn db(&self) -> Result<Self::Store, Error> {
        Err(Error::Internal("connection refused".into()))
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        Err(Error::Internal("connection refused".into()))
    }
}
