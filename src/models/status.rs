use std::fmt::{Display, Formatter, Result};

/// Result of a conditional insert into the dedupe store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStatus {
    Inserted,
    Duplicate,
}

/// Terminal state of a single record. Only `Sent` is reported in the batch
/// results; failures are reported through `RelayError` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordState {
    SkippedNoMessage,
    SkippedInvalidPayload,
    SkippedDuplicate,
    Sent { email: String },
}

impl Display for RecordState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            RecordState::SkippedNoMessage => write!(f, "skipped_no_message"),
            RecordState::SkippedInvalidPayload => write!(f, "skipped_invalid_payload"),
            RecordState::SkippedDuplicate => write!(f, "skipped_duplicate"),
            RecordState::Sent { .. } => write!(f, "sent"),
        }
    }
}
