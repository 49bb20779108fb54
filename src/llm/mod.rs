// LLM integration: the Gemini client and the prompt templates it sends.

pub mod client;
pub mod prompt;
