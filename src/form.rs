//! Headless state for filling in a survey page by page.
//!
//! A front end renders `current_questions()`, forwards edits through
//! `set_answer`/`toggle_option`, and drives navigation with `next`,
//! `previous` and `submit`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::models::{
    answer::Submit as AnswerSubmit,
    question::Question,
    submission::{SubmissionDetail, SubmitRequest},
    survey::Survey,
};

pub const QUESTIONS_PER_PAGE: usize = 5;

pub const REQUIRED: &str = "This question is required";

const NO_ANSWER: &str = "No answer provided";

#[derive(Debug, Clone)]
pub struct SurveyForm {
    survey: Survey,
    page: usize,
    answers: BTreeMap<i32, String>,
    errors: BTreeMap<i32, &'static str>,
}

impl SurveyForm {
    pub fn new(survey: Survey) -> Self {
        SurveyForm {
            survey,
            page: 0,
            answers: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        (self.survey.questions.len() + QUESTIONS_PER_PAGE - 1) / QUESTIONS_PER_PAGE
    }

    fn page_range(&self, page: usize) -> std::ops::Range<usize> {
        let len = self.survey.questions.len();
        let start = (page * QUESTIONS_PER_PAGE).min(len);
        start..(start + QUESTIONS_PER_PAGE).min(len)
    }

    pub fn current_questions(&self) -> &[Question] {
        &self.survey.questions[self.page_range(self.page)]
    }

    /// Percentage of pages reached, counting the current one. A survey without questions reports 100.
    pub fn progress(&self) -> f64 {
        match self.total_pages() {
            0 => 100.0,
            total => (self.page + 1) as f64 / total as f64 * 100.0,
        }
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.total_pages()
    }

    /// 1-based position of the `index`-th question on the current page, counted across pages.
    pub fn question_number(&self, index: usize) -> usize {
        self.page * QUESTIONS_PER_PAGE + index + 1
    }

    pub fn answer(&self, question_id: i32) -> &str {
        self.answers.get(&question_id).map(String::as_str).unwrap_or_default()
    }

    pub fn error(&self, question_id: i32) -> Option<&'static str> {
        self.errors.get(&question_id).copied()
    }

    pub fn errors(&self) -> &BTreeMap<i32, &'static str> {
        &self.errors
    }

    pub fn set_answer(&mut self, question_id: i32, value: impl Into<String>) {
        self.answers.insert(question_id, value.into());
        self.errors.remove(&question_id);
    }

    /// Adds or removes `label` in the comma-joined selection of a multi-select question.
    pub fn toggle_option(&mut self, question_id: i32, label: &str, checked: bool) {
        let mut selected: Vec<&str> = self.answer(question_id).split(',').filter(|s| !s.is_empty()).collect();
        if checked {
            selected.push(label);
        } else if let Some(pos) = selected.iter().position(|s| *s == label) {
            selected.remove(pos);
        }
        let joined = selected.join(",");
        self.set_answer(question_id, joined);
    }

    pub fn is_selected(&self, question_id: i32, label: &str) -> bool {
        self.answer(question_id).split(',').any(|s| s == label)
    }

    fn is_missing(&self, question: &Question) -> bool {
        !question.accepts(self.answers.get(&question.id).map(String::as_str))
    }

    /// Validates the current page and moves forward when it is complete. Returns whether the page was valid.
    pub fn next(&mut self) -> bool {
        let range = self.page_range(self.page);
        let missing: Vec<i32> = self.survey.questions[range]
            .iter()
            .filter(|q| self.is_missing(q))
            .map(|q| q.id)
            .collect();
        if !missing.is_empty() {
            self.errors.extend(missing.into_iter().map(|id| (id, REQUIRED)));
            return false;
        }
        if !self.is_last_page() {
            self.page += 1;
            self.errors.clear();
        }
        true
    }

    pub fn previous(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.errors.clear();
        }
    }

    /// Validates every page. On failure the form moves to the page of the first
    /// missing question and that page index is returned.
    pub fn submit(&mut self) -> Result<SubmitRequest, usize> {
        let missing: Vec<usize> = self
            .survey
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| self.is_missing(q))
            .map(|(i, _)| i)
            .collect();
        self.errors = missing.iter().map(|&i| (self.survey.questions[i].id, REQUIRED)).collect();
        if let Some(first) = missing.first() {
            self.page = first / QUESTIONS_PER_PAGE;
            return Err(self.page);
        }
        Ok(SubmitRequest {
            answers: self
                .answers
                .iter()
                .map(|(&question_id, value)| AnswerSubmit {
                    question_id,
                    value: value.trim().to_owned(),
                })
                .collect(),
        })
    }
}

/// Client route of the confirmation page for a stored submission.
pub fn confirmation_path(submission_id: i32) -> String {
    format!("/submission/{}", submission_id)
}

pub fn survey_path(survey_id: i32) -> String {
    format!("/survey/{}", survey_id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub number: usize,
    pub question: String,
    pub value: String,
}

impl Response {
    pub fn display(&self) -> &str {
        if self.value.is_empty() {
            NO_ANSWER
        } else {
            &self.value
        }
    }
}

/// What the confirmation page shows for a stored submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub title: String,
    pub description: String,
    pub submitted_on: NaiveDate,
    pub responses: Vec<Response>,
    pub retake_path: String,
}

impl From<&SubmissionDetail> for Confirmation {
    fn from(detail: &SubmissionDetail) -> Self {
        Confirmation {
            title: detail.survey.title.clone(),
            description: detail.survey.description.clone(),
            submitted_on: detail.created_at.date_naive(),
            responses: detail
                .answers
                .iter()
                .zip(1..)
                .map(|(a, number)| Response {
                    number,
                    question: a.question.text.clone(),
                    value: a.answer.value.clone(),
                })
                .collect(),
            retake_path: survey_path(detail.survey_id),
        }
    }
}
