use chrono::Utc;

use crate::core::models::{
    question::{Question, QuestionType},
    survey::Survey,
};

/// The intake survey shipped in `sql/seed.sql`, for running without Postgres.
pub fn intake_survey() -> Survey {
    let now = Utc::now();
    let questions = [
        ("What is your name?", QuestionType::Text, true, None),
        ("What is your age?", QuestionType::Number, true, None),
        ("What is your email?", QuestionType::Email, true, None),
        ("What is your gender?", QuestionType::Select, true, Some("Male,Female,Other")),
        (
            "Do you have any of the following conditions?",
            QuestionType::Multiselect,
            true,
            Some("Diabetes,Hypertension,Heart Disease,Cancer,Other"),
        ),
        ("What is your preferred contact method?", QuestionType::Select, true, Some("Email,Phone,Text")),
        ("Date of birth", QuestionType::Date, true, None),
        ("State of residence", QuestionType::Select, true, Some("California,New York,Texas,Florida,Other")),
        ("What is your preferred contact method?", QuestionType::Select, false, Some("Email,Phone,Text")),
    ];
    Survey {
        id: 1,
        title: "Intake Survey".into(),
        description: "Basic demographic and health information".into(),
        created_at: now,
        questions: questions
            .into_iter()
            .zip(1..)
            .map(|((text, type_, required, options), n)| Question {
                id: n,
                survey_id: 1,
                text: text.into(),
                type_,
                required,
                options: options.map(String::from),
                order_index: n,
                created_at: now,
            })
            .collect(),
    }
}
