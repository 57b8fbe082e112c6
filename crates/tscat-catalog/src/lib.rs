//! Qt Linguist translation catalogs
//!
//! This crate reads and writes Qt Linguist `.ts` files and turns them into an
//! immutable lookup table. It includes:
//!
//! - A document model and a reader and writer for the `.ts` XML format
//! - Locale parsing and numerus (plural form) rules
//! - Source-text keyed lookups that fall back to the source string
//! - A compiled JSON form that loads without XML parsing
//! - Validation and translation progress statistics
//! - An optional process-wide catalog installed once at startup
//!
//! # Example
//!
//! ```rust
//! use tscat_catalog::{parse_str, Catalog};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = parse_str(r#"<?xml version="1.0" encoding="utf-8"?>
//! <!DOCTYPE TS>
//! <TS version="2.1" language="de">
//! <context>
//!     <name>MainWindow</name>
//!     <message>
//!         <source>Open</source>
//!         <translation>Öffnen</translation>
//!     </message>
//! </context>
//! </TS>"#)?;
//!
//! let catalog = Catalog::from_document(&document)?;
//! assert_eq!(catalog.lookup("MainWindow", "Open", None), "Öffnen");
//! assert_eq!(catalog.lookup("MainWindow", "Close", None), "Close");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod catalog;
pub mod compiled;
pub mod error;
pub mod global;
pub mod locale;
pub mod model;
pub mod parser;
pub mod placeholder;
pub mod plural;
pub mod resource;
pub mod stats;
pub mod validate;
pub mod writer;

pub use catalog::Catalog;
pub use compiled::{CompiledCatalog, CompiledEntry, COMPILED_FORMAT_VERSION};
pub use error::{CatalogError, CatalogResult};
pub use locale::Locale;
pub use model::{
    Context, LineRef, Location, Message, Translation, TranslationState, TranslationText,
    TsDocument,
};
pub use parser::parse_str;
pub use placeholder::{placeholders, substitute_args, substitute_count, Placeholder};
pub use plural::{PluralCategory, PluralRule};
pub use resource::{load_catalog, load_document, save_compiled, save_document, CatalogFormat};
pub use stats::{ContextCoverage, Counts, Statistics};
pub use validate::{validate, IssueKind, ValidationIssue, ValidationReport};
pub use writer::write_string;
