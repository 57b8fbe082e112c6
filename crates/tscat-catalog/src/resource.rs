//! Loading and saving catalog files

use crate::catalog::Catalog;
use crate::compiled::CompiledCatalog;
use crate::error::{CatalogError, CatalogResult};
use crate::model::TsDocument;
use crate::parser::parse_str;
use crate::writer::write_string;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// On-disk catalog format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// Qt Linguist XML (`.ts`)
    Ts,
    /// Compiled JSON (`.json`)
    Compiled,
}

impl CatalogFormat {
    /// Detect the format from a path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("ts") => Ok(Self::Ts),
            Some("json") => Ok(Self::Compiled),
            _ => Err(CatalogError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

fn read_file(path: &Path) -> CatalogResult<String> {
    debug!("Reading catalog file: {:?}", path);
    fs::read_to_string(path).map_err(|source| CatalogError::ResourceLoadError {
        path: path.display().to_string(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> CatalogResult<()> {
    fs::write(path, contents).map_err(|source| CatalogError::ResourceLoadError {
        path: path.display().to_string(),
        source,
    })
}

/// Read and parse a `.ts` file into its document model
pub fn load_document<P: AsRef<Path>>(path: P) -> CatalogResult<TsDocument> {
    let path = path.as_ref();
    let document = parse_str(&read_file(path)?)?;
    info!(
        "Loaded {} messages in {} contexts from {:?}",
        document.message_count(),
        document.contexts.len(),
        path
    );
    Ok(document)
}

/// Load a lookup catalog from a `.ts` or compiled `.json` file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    match CatalogFormat::from_path(path)? {
        CatalogFormat::Ts => Catalog::from_document(&load_document(path)?),
        CatalogFormat::Compiled => {
            let compiled = CompiledCatalog::from_json(&read_file(path)?)?;
            Catalog::from_compiled(&compiled)
        }
    }
}

/// Write a document back to disk as `.ts` XML
pub fn save_document<P: AsRef<Path>>(document: &TsDocument, path: P) -> CatalogResult<()> {
    let path = path.as_ref();
    write_file(path, &write_string(document))?;
    info!("Wrote {} messages to {:?}", document.message_count(), path);
    Ok(())
}

/// Compile a catalog and write it as JSON, returning the entry count
pub fn save_compiled<P: AsRef<Path>>(catalog: &Catalog, path: P) -> CatalogResult<usize> {
    let path = path.as_ref();
    let compiled = catalog.compile();
    write_file(path, &compiled.to_json()?)?;
    info!("Wrote {} compiled entries to {:?}", compiled.entries.len(), path);
    Ok(compiled.entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tscat_common::test_utils::{create_temp_dir, ts_fixtures, write_fixture};

    #[test]
    fn test_format_detection() {
        assert_eq!(CatalogFormat::from_path(Path::new("a/b_ug.ts")).unwrap(), CatalogFormat::Ts);
        assert_eq!(CatalogFormat::from_path(Path::new("x.TS")).unwrap(), CatalogFormat::Ts);
        assert_eq!(
            CatalogFormat::from_path(Path::new("x.json")).unwrap(),
            CatalogFormat::Compiled
        );
        assert!(matches!(
            CatalogFormat::from_path(Path::new("x.qm")),
            Err(CatalogError::UnsupportedFormat { .. })
        ));
        assert!(CatalogFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = create_temp_dir();
        let err = load_catalog(dir.path().join("missing.ts")).unwrap_err();
        assert!(matches!(err, CatalogError::ResourceLoadError { .. }));
    }

    #[test]
    fn test_load_ts_and_compiled_agree() {
        let dir = create_temp_dir();
        let ts = write_fixture(dir.path(), "app_de.ts", ts_fixtures::small_catalog_ts());
        let catalog = load_catalog(&ts).unwrap();

        let json = dir.path().join("app_de.json");
        let written = save_compiled(&catalog, &json).unwrap();
        assert_eq!(written, catalog.compile().entries.len());
        let compiled = load_catalog(&json).unwrap();

        assert_eq!(catalog.lookup("MainWindow", "Open", None), "Öffnen");
        assert_eq!(compiled.lookup("MainWindow", "Open", None), "Öffnen");
        assert_eq!(
            compiled.lookup_plural("MainWindow", "%n file(s) selected", 7),
            "7 Dateien ausgewählt"
        );
    }

    #[test]
    fn test_save_document_roundtrip() {
        let dir = create_temp_dir();
        let ts = write_fixture(dir.path(), "app_de.ts", ts_fixtures::small_catalog_ts());
        let document = load_document(&ts).unwrap();

        let out = dir.path().join("out.ts");
        save_document(&document, &out).unwrap();
        assert_eq!(load_document(&out).unwrap(), document);
    }
}
