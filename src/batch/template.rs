//! Message body templates.
//!
//! Bodies may interpolate `{{.Count}}` (the item's 1-based index) and
//! `{{.Timestamp}}` (epoch milliseconds at initiation time). Templates are
//! validated once, before the dispatch loop starts, so a malformed body never
//! enters the tracker.

use crate::errors::BatchError;
use chrono::Utc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Count,
    Timestamp,
}

/// A pre-validated message body template.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Parse and validate `raw`. Unknown `{{.Name}}` tokens and unterminated
    /// `{{.` sequences are configuration errors.
    pub fn parse(raw: &str) -> Result<Self, BatchError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = raw;
        let mut offset = 0;

        while let Some(start) = rest.find("{{.") {
            literal.push_str(&rest[..start]);
            let token_start = offset + start;
            let after = &rest[start + 3..];
            let end = after
                .find("}}")
                .ok_or(BatchError::UnterminatedToken { offset: token_start })?;
            let name = &after[..end];
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            match name {
                "Count" => segments.push(Segment::Count),
                "Timestamp" => segments.push(Segment::Timestamp),
                other => {
                    return Err(BatchError::UnknownToken {
                        name: other.to_string(),
                    });
                }
            }
            offset = token_start + 3 + end + 2;
            rest = &after[end + 2..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Render the payload for item `index`, stamping the current time.
    pub fn render(&self, index: usize) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Count => out.push_str(&index.to_string()),
                Segment::Timestamp => out.push_str(&Utc::now().timestamp_millis().to_string()),
            }
        }
        out
    }

    /// Whether the template interpolates anything at all.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }
}
