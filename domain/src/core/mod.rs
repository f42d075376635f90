//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated multiple-choice question
//! - [`question::QuestionDraft`]: an unvalidated candidate from a generator
//! - [`topic::Topic`]: the category questions are requested by
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod question;
pub mod string;
pub mod topic;
