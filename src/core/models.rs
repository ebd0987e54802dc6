pub mod answer;
pub mod question;
pub mod submission;
pub mod survey;
