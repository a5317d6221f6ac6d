pub mod client;

pub use client::{build_prompt, create_client, LlmClient};
