//! NAMASTE coding catalog.
//!
//! The catalog is an ordered, immutable list of terminology entries. It is loaded once at
//! startup (the built-in table, a NAMASTE CSV export or a YAML file) and then only read:
//!
//! - [`Catalog::search`] answers case-insensitive substring queries for the diagnosis lookup
//! - [`Catalog::find`] resolves an exact code for approvals
//! - [`Catalog::code_system`] publishes the catalog as a FHIR `CodeSystem`
//!
//! ## CSV layout
//!
//! The NAMASTE export. `NAMASTE_ID`, `System` and `Term_English` are required and
//! `Term_Sanskrit` is optional. Header spaces become underscores and every value is trimmed.
//!
//! ```text
//! NAMASTE_ID,System,Term_English,Term_Sanskrit
//! AYA0001,Ayurveda,Jwara,ज्वर
//! ```
//!
//! A row becomes `term = "Jwara (ज्वर)"` and `definition = "Jwara (Ayurveda)."`.
//!
//! ## YAML layout
//!
//! ```yaml
//! - code: AYA0001
//!   term: Jwara (ज्वर)
//!   definition: Fever, a symptom of imbalance (Ayurveda).
//!   system: Ayurveda
//! ```

use crate::{PortalError, PortalResult};
use fhir::{CodeSystem, CodeSystemResource, ConceptData};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

const CSV_REQUIRED_COLUMNS: [&str; 3] = ["NAMASTE_ID", "System", "Term_English"];

/// One row of a NAMASTE CSV export.
#[derive(Debug, Deserialize)]
struct NamasteRow {
    #[serde(rename = "NAMASTE_ID")]
    namaste_id: String,
    #[serde(rename = "System")]
    system: String,
    #[serde(rename = "Term_English")]
    term_english: String,
    #[serde(rename = "Term_Sanskrit", default)]
    term_sanskrit: Option<String>,
}

impl From<NamasteRow> for CatalogEntry {
    fn from(row: NamasteRow) -> Self {
        let term = match row.term_sanskrit.filter(|native| !native.is_empty()) {
            Some(native) => format!("{} ({})", row.term_english, native),
            None => row.term_english.clone(),
        };
        let definition = format!("{} ({}).", row.term_english, row.system);
        CatalogEntry::new(row.namaste_id, term, definition, row.system)
    }
}

/// A single terminology entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    /// Unique human-readable identifier, e.g. `AYA0001`.
    pub code: String,
    /// Display term, may mix scripts.
    pub term: String,
    /// Short free-text description.
    pub definition: String,
    /// Provenance tag: `Ayurveda`, `Siddha`, `Unani`, ...
    pub system: String,
}

impl CatalogEntry {
    pub fn new(
        code: impl Into<String>,
        term: impl Into<String>,
        definition: impl Into<String>,
        system: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            term: term.into(),
            definition: definition.into(),
            system: system.into(),
        }
    }

    /// Display string used by the lookup UI: `"<term> (<system>)"`.
    pub fn display(&self) -> String {
        format!("{} ({})", self.term, self.system)
    }

    /// Whether the already-lowercased `needle` occurs in the term, code or definition.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.term.to_lowercase().contains(needle)
            || self.code.to_lowercase().contains(needle)
            || self.definition.to_lowercase().contains(needle)
    }
}

/// Immutable, ordered terminology table.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from entries, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if an entry has a blank code and `DuplicateCatalogCode` if two
    /// entries share a code.
    pub fn new(entries: Vec<CatalogEntry>) -> PortalResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.code.trim().is_empty() {
                return Err(PortalError::InvalidInput(
                    "catalog code cannot be empty".into(),
                ));
            }
            if !seen.insert(entry.code.as_str()) {
                return Err(PortalError::DuplicateCatalogCode(entry.code.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in NAMASTE table.
    pub fn seeded() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new(
                    "AYA0001",
                    "Jwara (ज्वर)",
                    "Fever, a symptom of imbalance (Ayurveda).",
                    "Ayurveda",
                ),
                CatalogEntry::new(
                    "AYA0002",
                    "Amlapitta (अम्लपित्त)",
                    "Hyperacidity/Dyspepsia (Ayurveda).",
                    "Ayurveda",
                ),
                CatalogEntry::new(
                    "SID0003",
                    "Gunmam (குன்மம்)",
                    "Abdominal mass/Gaseous distension (Siddha).",
                    "Siddha",
                ),
                CatalogEntry::new(
                    "UNI0004",
                    "Nazla (نزلہ)",
                    "Common Cold/Catarrh (Unani).",
                    "Unani",
                ),
            ],
        }
    }

    /// Parse a catalog from YAML, reporting the path of the first offending field.
    pub fn from_yaml(input: &str) -> PortalResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(input);
        let entries: Vec<CatalogEntry> = serde_path_to_error::deserialize(deserializer)
            .map_err(|e| PortalError::CatalogParse(e.to_string()))?;
        Self::new(entries)
    }

    /// Parse a NAMASTE CSV export.
    ///
    /// # Errors
    ///
    /// `CatalogParse` when a required column is missing or a row is malformed, plus the
    /// checks of [`Catalog::new`].
    pub fn from_csv<R: Read>(input: R) -> PortalResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers: csv::StringRecord = reader
            .headers()
            .map_err(|e| PortalError::CatalogParse(e.to_string()))?
            .iter()
            .map(|h| h.trim().replace(' ', "_"))
            .collect();
        for column in CSV_REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(PortalError::CatalogParse(format!(
                    "CSV is missing required column: {column}"
                )));
            }
        }
        reader.set_headers(headers);

        let entries = reader
            .deserialize::<NamasteRow>()
            .map(|row| {
                row.map(CatalogEntry::from)
                    .map_err(|e| PortalError::CatalogParse(e.to_string()))
            })
            .collect::<PortalResult<Vec<_>>>()?;
        Self::new(entries)
    }

    /// Read and parse a catalog file: `.csv` as a NAMASTE export, anything else as YAML.
    pub fn load(path: &Path) -> PortalResult<Self> {
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let catalog = if is_csv {
            let file = std::fs::File::open(path).map_err(PortalError::CatalogRead)?;
            Self::from_csv(file)?
        } else {
            let raw = std::fs::read_to_string(path).map_err(PortalError::CatalogRead)?;
            Self::from_yaml(&raw)?
        };
        tracing::info!(
            "loaded {} catalog entries from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search over term, code and definition.
    ///
    /// An empty query returns every entry. Results keep catalog order.
    pub fn search(&self, term: &str) -> Vec<&CatalogEntry> {
        if term.is_empty() {
            return self.entries.iter().collect();
        }
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.matches_lowercase(&needle))
            .collect()
    }

    /// Exact code lookup.
    pub fn find(&self, code: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    /// Render the catalog as a FHIR `CodeSystem` resource published under `uri`.
    pub fn code_system(&self, uri: &str) -> PortalResult<CodeSystemResource> {
        let concepts: Vec<ConceptData> = self
            .entries
            .iter()
            .map(|entry| ConceptData {
                code: entry.code.clone(),
                system: entry.system.clone(),
                term: entry.term.clone(),
                definition: entry.definition.clone(),
            })
            .collect();
        Ok(CodeSystem::build(uri, &concepts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn codes(results: &[&CatalogEntry]) -> Vec<String> {
        results.iter().map(|e| e.code.clone()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let catalog = Catalog::seeded();
        let results = catalog.search("");
        assert_eq!(
            codes(&results),
            vec!["AYA0001", "AYA0002", "SID0003", "UNI0004"]
        );
    }

    #[test]
    fn finds_jwara_case_insensitively() {
        let catalog = Catalog::seeded();
        for query in ["jwara", "JWARA", "Jwa"] {
            let results = catalog.search(query);
            assert_eq!(codes(&results), vec!["AYA0001"], "query {query}");
        }
    }

    #[test]
    fn matches_code_and_definition_fields() {
        let catalog = Catalog::seeded();
        assert_eq!(codes(&catalog.search("aya")), vec!["AYA0001", "AYA0002"]);
        assert_eq!(codes(&catalog.search("catarrh")), vec!["UNI0004"]);
        // "(ayurveda)" only appears inside definitions
        assert_eq!(
            codes(&catalog.search("(ayurveda)")),
            vec!["AYA0001", "AYA0002"]
        );
    }

    #[test]
    fn matches_native_script() {
        let catalog = Catalog::seeded();
        assert_eq!(codes(&catalog.search("ज्वर")), vec!["AYA0001"]);
    }

    #[test]
    fn does_not_match_on_system_alone() {
        let catalog = Catalog::new(vec![CatalogEntry::new("X1", "Term", "Def", "Siddha")])
            .expect("valid catalog");
        assert!(catalog.search("siddha").is_empty());
    }

    #[test]
    fn every_result_contains_the_query() {
        let catalog = Catalog::seeded();
        for query in ["a", "Fever", "0", "SID", "x", "mass/", " "] {
            let needle = query.to_lowercase();
            for entry in catalog.search(query) {
                assert!(
                    entry.term.to_lowercase().contains(&needle)
                        || entry.code.to_lowercase().contains(&needle)
                        || entry.definition.to_lowercase().contains(&needle),
                    "{} should not match {query:?}",
                    entry.code
                );
            }
        }
    }

    #[test]
    fn unmatched_query_is_empty_not_an_error() {
        assert!(Catalog::seeded().search("zzz-no-such-thing").is_empty());
    }

    #[test]
    fn find_is_exact() {
        let catalog = Catalog::seeded();
        assert!(catalog.find("AYA0001").is_some());
        assert!(catalog.find("aya0001").is_none());
        assert!(catalog.find("AYA").is_none());
    }

    #[test]
    fn display_includes_system() {
        let catalog = Catalog::seeded();
        let entry = catalog.find("SID0003").unwrap();
        assert_eq!(entry.display(), "Gunmam (குன்மம்) (Siddha)");
    }

    #[test]
    fn new_rejects_duplicate_codes() {
        let err = Catalog::new(vec![
            CatalogEntry::new("A1", "One", "", "Unani"),
            CatalogEntry::new("A1", "Two", "", "Unani"),
        ])
        .expect_err("should reject");
        assert!(matches!(err, PortalError::DuplicateCatalogCode(code) if code == "A1"));
    }

    #[test]
    fn from_yaml_reads_entries() {
        let input = r#"- code: AYA0101
  term: Kasa
  definition: Cough (Ayurveda).
  system: Ayurveda
- code: UNI0102
  term: Suda
  definition: Headache (Unani).
  system: Unani
"#;
        let catalog = Catalog::from_yaml(input).expect("should parse");
        assert_eq!(catalog.len(), 2);
        assert_eq!(codes(&catalog.search("headache")), vec!["UNI0102"]);
    }

    #[test]
    fn from_yaml_rejects_unknown_fields() {
        let input = r#"- code: AYA0101
  term: Kasa
  definition: Cough
  system: Ayurveda
  severity: high
"#;
        let err = Catalog::from_yaml(input).expect_err("should reject unknown field");
        match err {
            PortalError::CatalogParse(msg) => assert!(msg.contains("severity")),
            other => panic!("expected CatalogParse, got {other:?}"),
        }
    }

    #[test]
    fn from_yaml_rejects_duplicate_codes() {
        let input = r#"- {code: A, term: T, definition: D, system: S}
- {code: A, term: U, definition: E, system: S}
"#;
        let err = Catalog::from_yaml(input).expect_err("should reject duplicates");
        assert!(matches!(err, PortalError::DuplicateCatalogCode(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "- {{code: SID0200, term: Vali, definition: Pain (Siddha)., system: Siddha}}"
        )
        .expect("write");

        let catalog = Catalog::load(file.path()).expect("should load");
        assert_eq!(catalog.entries()[0].code, "SID0200");
    }

    #[test]
    fn from_csv_reads_namaste_export() {
        let input = "NAMASTE_ID,System,Term_English,Term_Sanskrit\n\
                     AYA0101 , Ayurveda , Kasa , कास\n\
                     UNI0102,Unani,Suda,\n";
        let catalog = Catalog::from_csv(input.as_bytes()).expect("should parse");
        assert_eq!(catalog.len(), 2);

        let kasa = catalog.find("AYA0101").expect("trimmed code");
        assert_eq!(kasa.term, "Kasa (कास)");
        assert_eq!(kasa.system, "Ayurveda");
        assert_eq!(kasa.definition, "Kasa (Ayurveda).");

        let suda = catalog.find("UNI0102").unwrap();
        assert_eq!(suda.term, "Suda");
        assert_eq!(suda.display(), "Suda (Unani)");
    }

    #[test]
    fn from_csv_accepts_missing_sanskrit_column_and_spaced_headers() {
        let input = "NAMASTE ID, System ,Term English\nSID0200,Siddha,Vali\n";
        let catalog = Catalog::from_csv(input.as_bytes()).expect("should parse");
        assert_eq!(catalog.entries()[0].code, "SID0200");
        assert_eq!(catalog.entries()[0].term, "Vali");
    }

    #[test]
    fn from_csv_names_missing_required_column() {
        let input = "NAMASTE_ID,Term_English\nAYA0101,Kasa\n";
        let err = Catalog::from_csv(input.as_bytes()).expect_err("should reject");
        match err {
            PortalError::CatalogParse(msg) => {
                assert_eq!(msg, "CSV is missing required column: System")
            }
            other => panic!("expected CatalogParse, got {other:?}"),
        }
    }

    #[test]
    fn from_csv_rejects_duplicate_codes() {
        let input = "NAMASTE_ID,System,Term_English\nA1,Unani,One\nA1,Unani,Two\n";
        let err = Catalog::from_csv(input.as_bytes()).expect_err("should reject");
        assert!(matches!(err, PortalError::DuplicateCatalogCode(code) if code == "A1"));
    }

    #[test]
    fn load_reads_csv_file_from_disk() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        writeln!(file, "NAMASTE_ID,System,Term_English,Term_Sanskrit").expect("write");
        writeln!(file, "AYA0001,Ayurveda,Jwara,ज्वर").expect("write");

        let catalog = Catalog::load(file.path()).expect("should load");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.search("jwara")[0].term, "Jwara (ज्वर)");

        let resource = catalog.code_system("http://example.org/namaste").unwrap();
        assert_eq!(resource.concept[0].display, "[Ayurveda] Jwara");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = Catalog::load(&dir.path().join("missing.yaml")).expect_err("should fail");
        assert!(matches!(err, PortalError::CatalogRead(_)));
    }

    #[test]
    fn code_system_covers_every_entry() {
        let resource = Catalog::seeded()
            .code_system("http://example.org/namaste")
            .expect("should render");
        assert_eq!(resource.count, 4);
        assert_eq!(resource.concept[3].display, "[Unani] Nazla");
    }
}
