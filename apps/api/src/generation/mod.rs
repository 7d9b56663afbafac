// AI generation endpoints: summary, bullets, improved text, skills.
// All completions go through llm_client::TextGenerator — no direct API calls here.

pub mod filters;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod sanitizer;
