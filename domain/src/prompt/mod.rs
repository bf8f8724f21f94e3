//! Prompt domain
//!
//! Templates for each generation request and the JSON schemas used when the
//! provider is asked for structured output.

mod schema;
mod template;

pub use schema::ResponseSchema;
pub use template::PromptTemplate;
