//! Request-data validation.
//!
//! Each operation that accepts user text declares an input struct whose
//! `validate` method checks the declared constraints (required, max length)
//! and returns either `Ok(())` or `DomainError::Invalid` naming every
//! offending field.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum length of a post message.
pub const MESSAGE_MAX_LEN: usize = 4000;

/// Maximum length of a topic subject.
pub const SUBJECT_MAX_LEN: usize = 255;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Input for starting a new topic: a subject plus the opening message.
#[derive(Debug, Clone)]
pub struct NewTopicInput {
    pub subject: String,
    pub message: String,
}

impl NewTopicInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        check_text(&mut errors, "subject", &self.subject, SUBJECT_MAX_LEN);
        check_text(&mut errors, "message", &self.message, MESSAGE_MAX_LEN);
        finish(errors)
    }
}

/// Input for replying to a topic or editing a post.
#[derive(Debug, Clone)]
pub struct ReplyInput {
    pub message: String,
}

impl ReplyInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        check_text(&mut errors, "message", &self.message, MESSAGE_MAX_LEN);
        finish(errors)
    }
}

/// Require a non-blank value no longer than `max_len` characters.
fn check_text(errors: &mut Vec<FieldError>, field: &'static str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message: "must not be empty".to_string(),
        });
    } else if value.chars().count() > max_len {
        errors.push(FieldError {
            field,
            message: format!("must not exceed {max_len} characters"),
        });
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), DomainError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Invalid(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_is_rejected() {
        let input = ReplyInput {
            message: "   ".to_string(),
        };

        let err = input.validate().unwrap_err();
        match err {
            DomainError::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "message");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn overlong_message_is_rejected() {
        let input = ReplyInput {
            message: "x".repeat(MESSAGE_MAX_LEN + 1),
        };

        assert!(matches!(
            input.validate(),
            Err(DomainError::Invalid(errors)) if errors[0].field == "message"
        ));
    }

    #[test]
    fn message_at_limit_passes() {
        let input = ReplyInput {
            message: "x".repeat(MESSAGE_MAX_LEN),
        };

        assert!(input.validate().is_ok());
    }

    #[test]
    fn new_topic_collects_all_field_errors() {
        let input = NewTopicInput {
            subject: String::new(),
            message: String::new(),
        };

        match input.validate().unwrap_err() {
            DomainError::Invalid(errors) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["subject", "message"]);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
