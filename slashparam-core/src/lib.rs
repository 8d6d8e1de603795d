//! Core types for slashparam.
//!
//! This crate lets a program declare typed, labeled parameters, parse
//! `/label:value` command line tokens against them, and render status and
//! usage messages wrapped to a fixed width.
//!
//! ```
//! use slashparam_core::{ParameterRegistry, TypedParameter};
//!
//! let mut registry = ParameterRegistry::new();
//! let count = registry
//!     .register_parameter(TypedParameter::from_str_parser("count", 1u32)?)?;
//!
//! registry.process_parameters(["/count:5"])?;
//! assert_eq!(*registry.get(&count).unwrap().value(), 5);
//! # Ok::<(), slashparam_core::ParameterError>(())
//! ```

mod error;
mod parameter;
mod registry;
pub mod token;
mod wrap;

pub use error::{ConversionError, ParameterError, Result};
pub use parameter::{Parameter, ParameterBuilder, TypedParameter};
pub use registry::{ParameterHandle, ParameterRegistry, ParameterStatus, USAGE_WIDTH};
pub use wrap::{wrap, Wrap};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
