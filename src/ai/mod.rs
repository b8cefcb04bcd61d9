//! LLM Integration
//!
//! Provider abstraction for the external generation collaborator.
//!
//! ## Modules
//!
//! - `provider`: the `LlmProvider` trait and the OpenAI implementation

pub mod provider;

pub use provider::{
    ChatMessage, LlmProvider, OpenAiProvider, ProviderConfig, SharedProvider, create_provider,
};
