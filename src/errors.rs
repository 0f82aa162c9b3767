//! Typed error hierarchy for relay.
//!
//! Two enums cover the two subsystems:
//! - `BatchError` — batch configuration rejected before the loop starts
//! - `PublishError` — transport failures from the HTTP publisher

use thiserror::Error;

/// Invalid batch configuration, surfaced before any send is initiated.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("count must be at least 1")]
    ZeroCount,

    #[error("unknown template token {{{{.{name}}}}}")]
    UnknownToken { name: String },

    #[error("unterminated template token starting at byte {offset}")]
    UnterminatedToken { offset: usize },
}

/// Errors from the HTTP publish transport.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("publish rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_message_names_the_constraint() {
        let err = BatchError::ZeroCount;
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn unknown_token_message_carries_the_token() {
        let err = BatchError::UnknownToken {
            name: "Nope".into(),
        };
        assert_eq!(err.to_string(), "unknown template token {{.Nope}}");
    }

    #[test]
    fn unterminated_token_carries_offset() {
        let err = BatchError::UnterminatedToken { offset: 12 };
        match &err {
            BatchError::UnterminatedToken { offset } => assert_eq!(*offset, 12),
            _ => panic!("expected UnterminatedToken"),
        }
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn rejected_publish_carries_status_and_body() {
        let err = PublishError::Rejected {
            status: 401,
            body: "bad key".into(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("bad key"));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&BatchError::ZeroCount);
        assert_std_error(&PublishError::Rejected {
            status: 500,
            body: String::new(),
        });
    }
}
