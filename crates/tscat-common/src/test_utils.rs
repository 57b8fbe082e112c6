//! Test utilities and shared fixtures for the tscat workspace.
//!
//! Available to other crates through the `testing` feature.

use std::path::PathBuf;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Path to the Uyghur control center catalog shipped in `translations/`.
pub fn control_center_ts_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../translations/dde-control-center_ug.ts")
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_fixture(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Catalog fixtures in Qt Linguist `.ts` form.
pub mod ts_fixtures {
    /// A small German catalog touching every message shape.
    pub fn small_catalog_ts() -> &'static str {
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="de_DE" sourcelanguage="en">
<context>
    <name>MainWindow</name>
    <message>
        <location filename="../src/mainwindow.cpp" line="42"/>
        <source>Open</source>
        <translation>Öffnen</translation>
    </message>
    <message>
        <location filename="../src/mainwindow.cpp" line="57"/>
        <source>Open</source>
        <comment>verb, open a door</comment>
        <translation>Aufmachen</translation>
    </message>
    <message>
        <location filename="../src/mainwindow.cpp" line="60"/>
        <location filename="../src/toolbar.cpp" line="12"/>
        <source>Quit</source>
        <translation type="unfinished">Beenden</translation>
    </message>
    <message numerus="yes">
        <location filename="../src/mainwindow.cpp" line="88"/>
        <source>%n file(s) selected</source>
        <translation>
            <numerusform>%n Datei ausgewählt</numerusform>
            <numerusform>%n Dateien ausgewählt</numerusform>
        </translation>
    </message>
    <message>
        <source>Saved %1 of %2</source>
        <translation>%1 von %2 gespeichert</translation>
    </message>
</context>
<context>
    <name>AboutDialog</name>
    <message>
        <source>Version %1</source>
        <translation></translation>
    </message>
    <message>
        <source>Legacy</source>
        <translation type="vanished">Altlast</translation>
    </message>
</context>
</TS>
"#
    }

    /// A catalog with a single Russian plural message.
    pub fn russian_plural_ts() -> &'static str {
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="ru_RU">
<context>
    <name>Downloads</name>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n файл</numerusform>
            <numerusform>%n файла</numerusform>
            <numerusform>%n файлов</numerusform>
        </translation>
    </message>
</context>
</TS>
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        // Should not panic when called multiple times
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_control_center_fixture_exists() {
        assert!(control_center_ts_path().exists());
    }

    #[test]
    fn test_write_fixture() {
        let dir = create_temp_dir();
        let path = write_fixture(dir.path(), "a.ts", ts_fixtures::small_catalog_ts());
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("<name>MainWindow</name>"));
    }
}
