mod parsing;
mod settings;
mod types;

pub(crate) use types::{InboxSettings, SecuritySettings, Settings, SubmissionSettings};
