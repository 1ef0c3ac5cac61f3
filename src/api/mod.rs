pub mod client;
pub mod models;

pub use client::{EvaluationTransport, HttpTransport, load_payload};
pub use models::{EvaluationReply, EvaluationResult, RawResponse, SubmissionPayload};
