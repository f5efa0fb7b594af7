pub mod failure_log;
pub mod prompt_builder;
pub mod record_store;

pub use failure_log::FailureLog;
pub use prompt_builder::PromptBuilder;
pub use record_store::{filter_open_text, RecordStore};
