//! # tscat
//!
//! Command line front end for Qt Linguist translation catalogs: lookups,
//! progress statistics, validation, compilation and round-trip rewriting.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::*;
pub use cli::*;
pub use error::*;
