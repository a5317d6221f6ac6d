pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::{AppError, ExtractError, LlmError, VerifyError};
pub use extract::{PdfExtractor, PdfSource, TextSource};
pub use llm::LlmClient;
pub use service::{extract_measurement_tokens, reconcile, verify, DocumentService};
