//! Core application primitives (orchestrator, HTTP surface)

pub mod error;
pub mod http;
pub mod orchestrator;

pub use error::AnalysisError;
pub use orchestrator::AnalysisOrchestrator;
