use arogya_core::{Catalog, CoreConfig, PatientStore, DEFAULT_NAMASTE_SYSTEM_URI};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "arogya")]
#[command(about = "Arogya portal catalog and record CLI")]
struct Cli {
    /// Catalog file (`.csv` NAMASTE export or YAML) to use instead of the built-in table
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog (empty term lists everything)
    Search {
        /// Case-insensitive substring of term, code or definition
        #[arg(default_value = "")]
        term: String,
    },
    /// List the demo patients
    Patients,
    /// Show a demo patient's history
    History {
        /// Patient display name (exact match)
        name: String,
    },
    /// List pending demo appointments
    Appointments,
    /// Show the audit trail of a freshly loaded demo store
    Audit,
    /// Print the catalog as a FHIR CodeSystem
    CodeSystem {
        /// FHIR system URI for the resource
        #[arg(long, default_value = DEFAULT_NAMASTE_SYSTEM_URI)]
        uri: String,
    },
    /// Check that a catalog file parses and has unique codes
    ValidateCatalog {
        /// Path to the catalog (`.csv` or YAML)
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cfg = CoreConfig::new(cli.catalog, true, DEFAULT_NAMASTE_SYSTEM_URI.into())?;

    match cli.command {
        Some(Commands::Search { term }) => {
            let catalog = cfg.load_catalog()?;
            let results = catalog.search(&term);
            if results.is_empty() {
                println!("No matching codes.");
            }
            for entry in results {
                println!("{}  {}  {}", entry.code, entry.display(), entry.definition);
            }
        }
        Some(Commands::Patients) => {
            let store = seeded_store(&cfg)?;
            for patient in store.list_patients()? {
                println!(
                    "Name: {}, Email: {}, Records: {}",
                    patient.name,
                    patient.email,
                    patient.history.len()
                );
            }
        }
        Some(Commands::History { name }) => {
            let store = seeded_store(&cfg)?;
            match store.get_history(&name) {
                Ok(profile) => {
                    println!("{} <{}>", profile.name, profile.email);
                    for entry in profile.history {
                        println!(
                            "  {}  {}  {}  [{}]  {}",
                            entry.date,
                            entry.diagnosis_term,
                            entry.code,
                            entry.catalog_code.as_deref().unwrap_or("legacy"),
                            entry.note
                        );
                    }
                }
                Err(e) => eprintln!("Error reading history: {}", e),
            }
        }
        Some(Commands::Appointments) => {
            let store = seeded_store(&cfg)?;
            let pending = store.pending_appointments()?;
            if pending.is_empty() {
                println!("No pending appointments.");
            }
            for a in pending {
                println!(
                    "#{} {} on {} with {}: {}",
                    a.id, a.patient, a.date, a.doctor, a.reason
                );
            }
        }
        Some(Commands::Audit) => {
            let store = seeded_store(&cfg)?;
            for event in store.audit_log()? {
                println!(
                    "#{} {} {} {} {} {}",
                    event.id,
                    event.timestamp.to_rfc3339(),
                    event.actor,
                    event.action,
                    event.resource_type,
                    event.resource_id.as_deref().unwrap_or("-")
                );
            }
        }
        Some(Commands::CodeSystem { uri }) => {
            let catalog = cfg.load_catalog()?;
            let resource = catalog.code_system(&uri)?;
            println!("{}", serde_json::to_string_pretty(&resource)?);
        }
        Some(Commands::ValidateCatalog { file }) => match Catalog::load(&file) {
            Ok(catalog) => {
                let resource = catalog.code_system(DEFAULT_NAMASTE_SYSTEM_URI)?;
                let concepts = fhir::CodeSystem::parse(&serde_json::to_string(&resource)?)?;
                println!(
                    "{}: {} entries OK ({} concepts)",
                    file.display(),
                    catalog.len(),
                    concepts.count
                );
            }
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            println!("Use 'arogya --help' for commands");
        }
    }

    Ok(())
}

fn seeded_store(cfg: &CoreConfig) -> Result<PatientStore, Box<dyn std::error::Error>> {
    let catalog = Arc::new(cfg.load_catalog()?);
    Ok(cfg.build_store(catalog))
}
