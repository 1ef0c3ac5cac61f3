pub mod handler;

pub use handler::{SubmissionHandler, SubmitOutcome};
