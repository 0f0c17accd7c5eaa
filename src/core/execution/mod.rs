pub mod evaluator;
pub mod observer;

// Re-export commonly used types
pub use evaluator::Evaluator;
pub use observer::{CircuitObserver, DiagnosticLog, SharedDiagnostics};
