pub mod model;
pub mod validate;

pub use model::{FormFields, ResultContent, SubmissionPage};
pub use validate::{ValidatedForm, ValidationError, ValidationRules, validate};
