pub(crate) mod attempts;
pub(crate) mod enrollment_gate;
pub(crate) mod errors;
pub(crate) mod grading;
pub(crate) mod inbox;
pub(crate) mod lateness;
pub(crate) mod quiz_scoring;
pub(crate) mod submission_validator;
pub(crate) mod submissions;

pub(crate) use errors::EngineError;
