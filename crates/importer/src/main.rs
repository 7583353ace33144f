//! `fleetlog-import` -- one-off spreadsheet-to-SQL seed generator.
//!
//! Reads the legacy workbook exported as CSV sheets and writes a single
//! idempotent SQL script for seeding the fleetlog database.
//!
//! # Usage
//!
//! ```text
//! fleetlog-import <input-dir> <output.sql> [user-uuid]
//! ```
//!
//! Expected files under `<input-dir>`:
//!
//! | File                  | Required | Contents                        |
//! |-----------------------|----------|---------------------------------|
//! | `equipment.csv`       | no       | Equipment sheet                 |
//! | `suppliers.csv`       | no       | Supplier names                  |
//! | `service_types.csv`   | no       | Service type names              |
//! | `services.csv`        | no       | Service postings                |
//! | `meter_readings*.csv` | no       | One file per meter sheet        |
//!
//! Missing files are skipped with a warning. `user-uuid` is stamped as
//! `created_by` on imported fact rows and defaults to the all-zero UUID.

mod sheets;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fleetlog_core::import::{ImportReport, SqlScript, PLACEHOLDER_USER};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleetlog_importer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (input_dir, output_path, user_id) = match args.as_slice() {
        [input, output] => (PathBuf::from(input), PathBuf::from(output), None),
        [input, output, user] => (PathBuf::from(input), PathBuf::from(output), Some(user.clone())),
        _ => {
            eprintln!("Usage: fleetlog-import <input-dir> <output.sql> [user-uuid]");
            return ExitCode::from(2);
        }
    };

    let user_id = match user_id {
        Some(raw) => match uuid::Uuid::parse_str(&raw) {
            Ok(parsed) => parsed.to_string(),
            Err(error) => {
                tracing::error!(%error, raw = %raw, "user-uuid is not a valid UUID");
                return ExitCode::FAILURE;
            }
        },
        None => PLACEHOLDER_USER.to_string(),
    };

    if !input_dir.is_dir() {
        tracing::error!(path = %input_dir.display(), "input directory does not exist");
        return ExitCode::FAILURE;
    }

    let report = match generate(&input_dir, &output_path, &user_id) {
        Ok(report) => report,
        Err(error) => {
            tracing::error!(%error, "import failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        equipment = report.equipment,
        suppliers = report.suppliers,
        service_types = report.service_types,
        services = report.services,
        services_skipped = report.services_skipped,
        meter_readings = report.meter_readings,
        meter_readings_skipped = report.meter_readings_skipped,
        output = %output_path.display(),
        "seed script written"
    );
    ExitCode::SUCCESS
}

/// Read the sheets, build the script, and write it out.
fn generate(
    input_dir: &Path,
    output_path: &Path,
    user_id: &str,
) -> Result<ImportReport, std::io::Error> {
    let mut script = SqlScript::new(user_id);

    if let Some(text) = read_sheet(input_dir, "equipment.csv") {
        script.push_equipment(&sheets::parse_equipment_sheet(&text));
    }
    if let Some(text) = read_sheet(input_dir, "suppliers.csv") {
        script.push_suppliers(&sheets::parse_name_sheet(&text));
    }
    if let Some(text) = read_sheet(input_dir, "service_types.csv") {
        script.push_service_types(&sheets::parse_name_sheet(&text));
    }
    if let Some(text) = read_sheet(input_dir, "services.csv") {
        script.push_services(&sheets::parse_services_sheet(&text));
    }

    for name in meter_sheet_names(input_dir)? {
        if let Some(text) = read_sheet(input_dir, &name) {
            script.push_meter_readings(&sheets::parse_meter_sheet(&text), &name);
        }
    }

    let (sql, report) = script.finish();
    std::fs::write(output_path, sql)?;
    Ok(report)
}

/// Read one sheet file, warning (not failing) when it is absent.
fn read_sheet(input_dir: &Path, name: &str) -> Option<String> {
    let path = input_dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "sheet not read, skipping");
            None
        }
    }
}

/// All `meter_readings*.csv` files in the input directory, sorted by name so
/// re-runs emit sections in a stable order.
fn meter_sheet_names(input_dir: &Path) -> Result<Vec<String>, std::io::Error> {
    let mut names: Vec<String> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with("meter_readings") && name.ends_with(".csv"))
        .collect();
    names.sort();
    Ok(names)
}
