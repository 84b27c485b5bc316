//! Code generation core for firmware component plugins
//!
//! Components validate their YAML into typed records and emit ordered
//! [`Instruction`]s: construct a variable, register it with host
//! subsystems, call its setters. This crate owns everything around that:
//! - **Platforms** ([`ComponentPlatform`], [`PlatformRegistry`]): look up the
//!   plugin for a `platform:` entry
//! - **Generation** ([`Generator`]): validate every entry first, resolve IDs,
//!   then emit; a failure produces no instructions at all
//! - **Back ends** ([`Backend`]): render the instruction list as C++ or JSON

// Core modules
pub mod backend;
pub mod error;
pub mod expression;
pub mod generator;
pub mod id;
pub mod instruction;
pub mod plugin;
pub mod registry;
pub mod types;

// Re-exports
pub use backend::{Backend, CppBackend, JsonBackend};
pub use error::*;
pub use expression::*;
pub use generator::*;
pub use id::*;
pub use instruction::*;
pub use plugin::*;
pub use registry::*;
pub use types::*;
