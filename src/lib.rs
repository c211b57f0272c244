pub mod core;

// Re-export commonly used types
pub use crate::core::config::{GeneratorConfig, StorePadding};
pub use crate::core::errors::TraceError;
pub use crate::core::generator::TraceGenerator;
pub use crate::core::record::AccessRecord;
