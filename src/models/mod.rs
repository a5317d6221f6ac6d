pub mod claim;
pub mod measurement;
pub mod session;

pub use claim::{ExpressionClaim, Verdict, VerificationResult};
pub use measurement::{MeasurementToken, ReconciliationReport};
pub use session::DocumentSession;
