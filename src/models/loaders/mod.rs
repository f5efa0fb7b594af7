pub mod json_loader;

pub use json_loader::{load_questions, load_template, read_json};
