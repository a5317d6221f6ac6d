pub mod document;
pub mod reconciler;
pub mod report;
pub mod sessions;
pub mod tokenizer;
pub mod verifier;

pub use document::DocumentService;
pub use reconciler::reconcile;
pub use sessions::SessionStore;
pub use tokenizer::extract_measurement_tokens;
pub use verifier::verify;
