//! # tscat Common
//!
//! Shared error type, logging setup and string utilities for the tscat
//! workspace.
//!
//! This crate provides the foundational pieces used by the configuration
//! crate and the command line front end.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use logging::*;
pub use utils::*;
