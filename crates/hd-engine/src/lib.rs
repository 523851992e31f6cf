//! Diagnostic engine for unexpected smart-home device state changes.
//!
//! Classifies a device's recent event window into a `Pattern`, gathers
//! health, automation and manufacturer context from external collaborators
//! (tolerating partial failure), and runs an ordered set of evidence rules
//! that only ever emit recommendations backed by an observed fact.

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod error;
pub mod guard;
pub mod manufacturer;
pub mod mock;
pub mod report;
pub mod rules;
pub mod service;
pub mod snapshot;
pub mod source;
pub mod window;

// Re-export key types for convenience
pub use assembler::ContextAssembler;
pub use classifier::classify;
pub use config::EngineConfig;
pub use error::{LookupError, LookupResult};
pub use mock::MockPlatform;
pub use rules::RuleEngine;
pub use service::DiagnosticService;
pub use snapshot::SnapshotFile;
pub use source::{
    AutomationLookup, Collaborators, DeviceMetaLookup, EventSource, HealthLookup, LookupKind,
};
pub use window::EventWindow;
