//! Component generation pipeline for RaynaUI.
//!
//! A free-text description becomes a prompt, the prompt goes to a hosted
//! chat-completion model, the reply is parsed into a generation record, and
//! the record is rendered into an in-memory bundle of files.

pub mod client;
pub mod config;
pub mod engine;
pub mod errors;
pub mod escape;
pub mod parser;
pub mod prompt;
pub mod templates;

pub use client::{
    AnthropicClient, CompletionClient, CompletionRequest, CompletionResponse, ContentBlock,
    Message, Role,
};
pub use config::EngineConfig;
pub use engine::{GenerationEngine, assemble_component};
pub use errors::{GenerateError, ParseError};
pub use parser::parse_response;
pub use prompt::{Prompts, build_prompts};
pub use templates::render_component_template;
