//! Process-wide catalog installed once at startup.
//!
//! Until a catalog is installed every lookup returns the source text, so
//! code can call [`tr`] unconditionally.

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::placeholder::substitute_count;
use once_cell::sync::OnceCell;
use tracing::info;

static CATALOG: OnceCell<Catalog> = OnceCell::new();

/// Install the process-wide catalog. Fails if one is already installed.
pub fn install(catalog: Catalog) -> CatalogResult<()> {
    let language = catalog.language().map(str::to_string);
    let entries = catalog.len();
    CATALOG
        .set(catalog)
        .map_err(|_| CatalogError::AlreadyInstalled)?;
    info!(
        language = language.as_deref().unwrap_or("<none>"),
        entries,
        "Installed process-wide catalog"
    );
    Ok(())
}

/// The installed catalog, if any
pub fn installed() -> Option<&'static Catalog> {
    CATALOG.get()
}

/// Translate through the installed catalog
pub fn tr<'a>(context: &str, source: &'a str) -> &'a str {
    tr_disambiguated(context, source, None)
}

/// [`tr`] with a disambiguation
pub fn tr_disambiguated<'a>(context: &str, source: &'a str, disambiguation: Option<&str>) -> &'a str {
    match CATALOG.get() {
        Some(catalog) => catalog.lookup(context, source, disambiguation),
        None => source,
    }
}

/// Plural translation through the installed catalog
pub fn tr_n(context: &str, source: &str, n: u64) -> String {
    match CATALOG.get() {
        Some(catalog) => catalog.lookup_plural(context, source, n),
        None => substitute_count(source, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, Message, Translation, TsDocument};

    // One test owns the global so ordering between tests cannot matter.
    #[test]
    fn test_install_once_then_lookups_resolve() {
        assert_eq!(tr("MainWindow", "Open"), "Open");
        assert_eq!(tr_n("MainWindow", "%n file(s)", 2), "2 file(s)");

        let doc = TsDocument::new("de").with_context(
            Context::new("MainWindow")
                .with_message(Message::new("Open", Translation::finished("Öffnen")))
                .with_message(Message::new("Open", Translation::finished("Aufmachen")).with_comment("door"))
                .with_message(Message::new(
                    "%n file(s)",
                    Translation::plural(["%n Datei", "%n Dateien"]),
                )),
        );
        install(Catalog::from_document(&doc).unwrap()).unwrap();

        assert_eq!(tr("MainWindow", "Open"), "Öffnen");
        assert_eq!(tr_disambiguated("MainWindow", "Open", Some("door")), "Aufmachen");
        assert_eq!(tr_n("MainWindow", "%n file(s)", 1), "1 Datei");
        assert_eq!(tr("Elsewhere", "Open"), "Open");
        assert!(installed().is_some());

        assert!(matches!(
            install(Catalog::default()),
            Err(CatalogError::AlreadyInstalled)
        ));
        assert_eq!(tr("MainWindow", "Open"), "Öffnen");
    }
}
