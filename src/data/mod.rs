mod validator;

pub use validator::{RejectReason, ValidationWarning, validate_series};
