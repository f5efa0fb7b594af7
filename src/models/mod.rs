pub mod completion;
pub mod loaders;
pub mod question;

pub use completion::{ChatMessage, ChatRequest, ChatResponse, ProviderError, RequestTemplate};
pub use loaders::{load_questions, load_template};
pub use question::{GeneratedQuestion, Question, OPEN_TEXT};
