//! # tscat Config
//!
//! Layered configuration for the tscat catalog tools.
//!
//! Settings come from a YAML, TOML or JSON file, are overridden by `TSCAT_*`
//! environment variables and are validated before use.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
