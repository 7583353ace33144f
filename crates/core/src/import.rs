//! Legacy spreadsheet import: row normalization and idempotent SQL
//! generation.
//!
//! The legacy workbook is exported sheet-by-sheet to CSV; this module turns
//! the parsed rows into one SQL seed script. It has no I/O: the importer
//! binary reads the files and writes the output.
//!
//! Generated statements are safe to re-run: reference data carries
//! `ON CONFLICT DO NOTHING`, and fact rows resolve their foreign keys by
//! code/name through subselects guarded by `WHERE EXISTS`, so rows pointing
//! at unknown equipment or service types are skipped rather than failing the
//! transaction.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// User id stamped on imported rows when no real user is supplied.
pub const PLACEHOLDER_USER: &str = "00000000-0000-0000-0000-000000000000";

/// Day zero of the 1900 Excel date system, accounting for the leap-year bug.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Serial-date bounds accepted by [`parse_date`]: roughly 1906..=2100.
const EXCEL_SERIAL_MIN: i64 = 2_200;
const EXCEL_SERIAL_MAX: i64 = 73_415;

// ---------------------------------------------------------------------------
// CSV line splitting
// ---------------------------------------------------------------------------

/// Split a single CSV line into fields, handling double-quoted fields and
/// `""` escapes. Workbook-export dialect only; full CSV mechanics are out of
/// scope.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            result.push(current.clone());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    result.push(current);
    result
}

// ---------------------------------------------------------------------------
// Cell normalization
// ---------------------------------------------------------------------------

/// Trim a cell value. Spreadsheet exports pad freely.
pub fn clean(value: &str) -> String {
    value.trim().to_string()
}

/// Parse a date cell.
///
/// Accepts `DD/MM/YYYY`, `YYYY-MM-DD`, and bare Excel serial numbers (days
/// since the 1900-system epoch). Returns `None` for anything else.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%d/%m/%Y") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d") {
        return Some(date);
    }

    // Excel serial date, as exported from unformatted date cells.
    if let Ok(serial) = cleaned.parse::<i64>() {
        if (EXCEL_SERIAL_MIN..=EXCEL_SERIAL_MAX).contains(&serial) {
            let (y, m, d) = EXCEL_EPOCH;
            return NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|epoch| epoch.checked_add_signed(chrono::Duration::days(serial)));
        }
    }

    None
}

/// Parse a numeric cell, tolerating currency prefixes and Brazilian
/// formatting (thousands dots, decimal comma).
///
/// `"R$ 1.234,56"` parses as `1234.56`; `"350"` and `"350.5"` parse as-is.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let normalized = if cleaned.contains(',') {
        // Comma is the decimal separator; dots are thousands separators.
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok()
}

/// Quote a string literal for SQL, escaping single quotes. Empty input
/// renders as `NULL`.
pub fn sql_string(value: &str) -> String {
    if value.is_empty() {
        "NULL".to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}

/// Render a date as a quoted SQL literal.
pub fn sql_date(date: NaiveDate) -> String {
    format!("'{}'", date.format("%Y-%m-%d"))
}

// ---------------------------------------------------------------------------
// Sheet rows
// ---------------------------------------------------------------------------

/// One row of the equipment sheet after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentRow {
    pub code: String,
    pub description: String,
}

/// One row of the services sheet after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRow {
    pub date: Option<NaiveDate>,
    pub equipment: String,
    pub supplier: String,
    pub cost: Option<f64>,
    pub description: String,
    pub service_type: String,
}

/// One row of a meter-reading sheet after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterRow {
    pub date: Option<NaiveDate>,
    pub equipment: String,
    pub value: Option<f64>,
    pub note: String,
}

/// Drop duplicate equipment rows, keyed case-insensitively on code. First
/// occurrence wins.
pub fn dedupe_equipment(rows: Vec<EquipmentRow>) -> Vec<EquipmentRow> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| !row.code.is_empty() && seen.insert(row.code.to_lowercase()))
        .collect()
}

/// Drop duplicate and empty names, preserving first-occurrence order.
pub fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| !name.is_empty() && seen.insert(name.to_lowercase()))
        .collect()
}

// ---------------------------------------------------------------------------
// Import report
// ---------------------------------------------------------------------------

/// Counts of what the generated script contains and what was left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub equipment: usize,
    pub suppliers: usize,
    pub service_types: usize,
    pub services: usize,
    pub services_skipped: usize,
    pub meter_readings: usize,
    pub meter_readings_skipped: usize,
}

// ---------------------------------------------------------------------------
// Script builder
// ---------------------------------------------------------------------------

/// Accumulates the SQL seed script section by section.
///
/// The finished script is one transaction: `BEGIN`, the sections in the
/// order they were pushed, `COMMIT`.
#[derive(Debug)]
pub struct SqlScript {
    lines: Vec<String>,
    report: ImportReport,
    user_id: String,
}

impl SqlScript {
    /// Start a script stamping `user_id` on imported fact rows.
    ///
    /// The import user is provisioned first so the `created_by` foreign
    /// keys on fact rows hold even on a fresh database.
    pub fn new(user_id: &str) -> Self {
        let mut lines = Vec::new();
        lines.push("-- Seed script generated by fleetlog-import".to_string());
        lines.push("BEGIN;".to_string());
        lines.push(String::new());
        lines.push(format!(
            "INSERT INTO users (id, name, role, active) VALUES ({}::uuid, 'import', 'admin', true) ON CONFLICT DO NOTHING;",
            sql_string(user_id),
        ));
        lines.push(String::new());
        Self {
            lines,
            report: ImportReport::default(),
            user_id: user_id.to_string(),
        }
    }

    fn section(&mut self, title: &str) {
        self.lines
            .push("-- ========================================".to_string());
        self.lines.push(format!("-- {title}"));
        self.lines
            .push("-- ========================================".to_string());
        self.lines.push(String::new());
    }

    /// Emit equipment inserts. Rows are expected to be deduplicated already
    /// (see [`dedupe_equipment`]); rows missing code or description are
    /// dropped.
    pub fn push_equipment(&mut self, rows: &[EquipmentRow]) {
        self.section("EQUIPMENT");
        for row in rows {
            if row.code.is_empty() || row.description.is_empty() {
                continue;
            }
            self.lines.push(format!(
                "INSERT INTO equipment (code, description, active) VALUES ({}, {}, true) ON CONFLICT DO NOTHING;",
                sql_string(&row.code),
                sql_string(&row.description),
            ));
            self.report.equipment += 1;
        }
        self.lines.push(String::new());
    }

    /// Emit supplier inserts. The sheet carries no category column; vendors
    /// default to `maintenance` and are reclassified by hand afterwards.
    pub fn push_suppliers(&mut self, names: &[String]) {
        self.section("SUPPLIERS");
        for name in names {
            self.lines.push(format!(
                "INSERT INTO suppliers (name, kind, active) VALUES ({}, 'maintenance', true) ON CONFLICT DO NOTHING;",
                sql_string(name),
            ));
            self.report.suppliers += 1;
        }
        self.lines.push(String::new());
    }

    /// Emit service-type inserts. The sheet has a bare name column; the
    /// name doubles as the description.
    pub fn push_service_types(&mut self, names: &[String]) {
        self.section("SERVICE TYPES");
        for name in names {
            self.lines.push(format!(
                "INSERT INTO service_types (name, description, active) VALUES ({}, {}, true) ON CONFLICT DO NOTHING;",
                sql_string(name),
                sql_string(name),
            ));
            self.report.service_types += 1;
        }
        self.lines.push(String::new());
    }

    /// Emit service-record inserts.
    ///
    /// Date, equipment, cost, and service type are required; rows missing
    /// any of them are counted as skipped. Foreign keys resolve by
    /// code/name; the `WHERE EXISTS` guard drops rows whose equipment or
    /// service type is not in the database.
    pub fn push_services(&mut self, rows: &[ServiceRow]) {
        self.section("SERVICE RECORDS");
        self.lines
            .push("-- Requires equipment, suppliers, and service types above.".to_string());
        self.lines.push(String::new());
        for row in rows {
            let (Some(date), Some(cost)) = (row.date, row.cost) else {
                self.report.services_skipped += 1;
                continue;
            };
            if row.equipment.is_empty() || row.service_type.is_empty() {
                self.report.services_skipped += 1;
                continue;
            }

            let equipment = sql_string(&row.equipment);
            let service_type = sql_string(&row.service_type);
            self.lines.push(
                "INSERT INTO service_records (equipment_id, service_type_id, supplier_id, service_date, description, cost, created_by)".to_string(),
            );
            self.lines.push("SELECT".to_string());
            self.lines.push(format!(
                "  (SELECT id FROM equipment WHERE code = {equipment} OR description = {equipment} LIMIT 1),",
            ));
            self.lines.push(format!(
                "  (SELECT id FROM service_types WHERE name = {service_type} LIMIT 1),",
            ));
            self.lines.push(format!(
                "  (SELECT id FROM suppliers WHERE name = {} LIMIT 1),",
                sql_string(&row.supplier),
            ));
            self.lines.push(format!("  {},", sql_date(date)));
            self.lines
                .push(format!("  {},", sql_string(&row.description)));
            self.lines.push(format!("  {cost},"));
            self.lines
                .push(format!("  {}::uuid", sql_string(&self.user_id)));
            self.lines.push(format!(
                "WHERE EXISTS (SELECT 1 FROM equipment WHERE code = {equipment} OR description = {equipment})",
            ));
            self.lines.push(format!(
                "  AND EXISTS (SELECT 1 FROM service_types WHERE name = {service_type});",
            ));
            self.lines.push(String::new());
            self.report.services += 1;
        }
    }

    /// Emit meter-reading inserts from one sheet. `source` names the sheet
    /// the rows came from and lands in the note column when the row has no
    /// note of its own.
    pub fn push_meter_readings(&mut self, rows: &[MeterRow], source: &str) {
        self.section(&format!("METER READINGS ({source})"));
        for row in rows {
            let (Some(date), Some(value)) = (row.date, row.value) else {
                self.report.meter_readings_skipped += 1;
                continue;
            };
            if row.equipment.is_empty() {
                self.report.meter_readings_skipped += 1;
                continue;
            }

            let note = if row.note.is_empty() {
                format!("Imported from: {source}")
            } else {
                row.note.clone()
            };
            let equipment = sql_string(&row.equipment);
            self.lines.push(
                "INSERT INTO meter_readings (equipment_id, reference_date, value, note, created_by)"
                    .to_string(),
            );
            self.lines.push("SELECT".to_string());
            self.lines.push(format!(
                "  (SELECT id FROM equipment WHERE code = {equipment} OR description = {equipment} LIMIT 1),",
            ));
            self.lines.push(format!("  {},", sql_date(date)));
            self.lines.push(format!("  {value},"));
            self.lines.push(format!("  {},", sql_string(&note)));
            self.lines
                .push(format!("  {}::uuid", sql_string(&self.user_id)));
            self.lines.push(format!(
                "WHERE EXISTS (SELECT 1 FROM equipment WHERE code = {equipment} OR description = {equipment});",
            ));
            self.lines.push(String::new());
            self.report.meter_readings += 1;
        }
    }

    /// Close the transaction and return the script text plus the report.
    pub fn finish(mut self) -> (String, ImportReport) {
        self.lines.push("COMMIT;".to_string());
        self.lines.push(String::new());
        (self.lines.join("\n"), self.report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- split_csv_line -------------------------------------------------------

    #[test]
    fn splits_plain_fields() {
        assert_eq!(split_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn splits_quoted_field_with_comma() {
        assert_eq!(
            split_csv_line(r#"EXC-01,"Excavator, tracked",350"#),
            vec!["EXC-01", "Excavator, tracked", "350"]
        );
    }

    #[test]
    fn unescapes_doubled_quotes() {
        assert_eq!(split_csv_line(r#""say ""hi""""#), vec![r#"say "hi""#]);
    }

    #[test]
    fn preserves_empty_fields() {
        assert_eq!(split_csv_line("a,,c,"), vec!["a", "", "c", ""]);
    }

    // -- parse_date -----------------------------------------------------------

    #[test]
    fn parses_brazilian_date() {
        assert_eq!(parse_date("15/03/2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("1/3/2024"), Some(date(2024, 3, 1)));
    }

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_date("2024-03-15"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn parses_excel_serial() {
        // 45292 is 2024-01-01 in the 1900 date system.
        assert_eq!(parse_date("45292"), Some(date(2024, 1, 1)));
    }

    #[test]
    fn rejects_out_of_range_serial() {
        assert_eq!(parse_date("12"), None);
        assert_eq!(parse_date("99999999"), None);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("32/13/2024"), None);
    }

    // -- parse_number ---------------------------------------------------------

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_number("350"), Some(350.0));
        assert_eq!(parse_number("350.5"), Some(350.5));
        assert_eq!(parse_number("-2"), Some(-2.0));
    }

    #[test]
    fn parses_brazilian_currency() {
        assert_eq!(parse_number("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_number("1,5"), Some(1.5));
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("n/a"), None);
    }

    // -- sql_string -----------------------------------------------------------

    #[test]
    fn quotes_and_escapes() {
        assert_eq!(sql_string("plain"), "'plain'");
        assert_eq!(sql_string("O'Neil"), "'O''Neil'");
    }

    #[test]
    fn empty_renders_null() {
        assert_eq!(sql_string(""), "NULL");
    }

    // -- dedup ----------------------------------------------------------------

    #[test]
    fn equipment_dedup_is_case_insensitive() {
        let rows = vec![
            EquipmentRow {
                code: "EXC-01".into(),
                description: "Excavator".into(),
            },
            EquipmentRow {
                code: "exc-01".into(),
                description: "Excavator copy".into(),
            },
            EquipmentRow {
                code: "TRK-02".into(),
                description: "Truck".into(),
            },
        ];
        let unique = dedupe_equipment(rows);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].description, "Excavator");
    }

    #[test]
    fn name_dedup_drops_empties() {
        let names = vec![
            "Alpha Diesel".to_string(),
            String::new(),
            "alpha diesel".to_string(),
            "Beta Parts".to_string(),
        ];
        assert_eq!(dedupe_names(names), vec!["Alpha Diesel", "Beta Parts"]);
    }

    // -- script generation ----------------------------------------------------

    #[test]
    fn script_is_one_transaction() {
        let (sql, _) = SqlScript::new(PLACEHOLDER_USER).finish();
        assert!(sql.contains("BEGIN;"));
        assert!(sql.trim_end().ends_with("COMMIT;"));
    }

    #[test]
    fn script_provisions_the_import_user() {
        let (sql, _) = SqlScript::new(PLACEHOLDER_USER).finish();
        assert!(sql.contains(&format!(
            "INSERT INTO users (id, name, role, active) VALUES ('{PLACEHOLDER_USER}'::uuid, 'import', 'admin', true) ON CONFLICT DO NOTHING;"
        )));
    }

    #[test]
    fn equipment_inserts_are_idempotent() {
        let mut script = SqlScript::new(PLACEHOLDER_USER);
        script.push_equipment(&[EquipmentRow {
            code: "EXC-01".into(),
            description: "Excavator".into(),
        }]);
        let (sql, report) = script.finish();
        assert!(sql.contains(
            "INSERT INTO equipment (code, description, active) VALUES ('EXC-01', 'Excavator', true) ON CONFLICT DO NOTHING;"
        ));
        assert_eq!(report.equipment, 1);
    }

    #[test]
    fn incomplete_service_rows_are_counted_not_emitted() {
        let mut script = SqlScript::new(PLACEHOLDER_USER);
        script.push_services(&[
            ServiceRow {
                date: Some(date(2024, 2, 10)),
                equipment: "EXC-01".into(),
                supplier: "Alpha Diesel".into(),
                cost: Some(450.0),
                description: "Oil change".into(),
                service_type: "Oil change".into(),
            },
            // Missing service type: must be skipped.
            ServiceRow {
                date: Some(date(2024, 2, 11)),
                equipment: "EXC-01".into(),
                supplier: String::new(),
                cost: Some(100.0),
                description: "???".into(),
                service_type: String::new(),
            },
        ]);
        let (sql, report) = script.finish();
        assert_eq!(report.services, 1);
        assert_eq!(report.services_skipped, 1);
        assert!(sql.contains("WHERE EXISTS (SELECT 1 FROM equipment WHERE code = 'EXC-01'"));
        assert!(sql.contains("AND EXISTS (SELECT 1 FROM service_types WHERE name = 'Oil change');"));
        assert!(!sql.contains("'???'"));
    }

    #[test]
    fn meter_rows_get_source_note_and_exists_guard() {
        let mut script = SqlScript::new(PLACEHOLDER_USER);
        script.push_meter_readings(
            &[
                MeterRow {
                    date: Some(date(2024, 1, 1)),
                    equipment: "EXC-01".into(),
                    value: Some(100.0),
                    note: String::new(),
                },
                // No value: skipped.
                MeterRow {
                    date: Some(date(2024, 1, 2)),
                    equipment: "EXC-01".into(),
                    value: None,
                    note: String::new(),
                },
            ],
            "meter_readings_2024.csv",
        );
        let (sql, report) = script.finish();
        assert_eq!(report.meter_readings, 1);
        assert_eq!(report.meter_readings_skipped, 1);
        assert!(sql.contains("'Imported from: meter_readings_2024.csv'"));
        assert!(sql.contains("WHERE EXISTS (SELECT 1 FROM equipment WHERE code = 'EXC-01'"));
    }

    #[test]
    fn fact_rows_carry_the_user_id() {
        let mut script = SqlScript::new("7a1d2c70-0000-4000-8000-000000000001");
        script.push_meter_readings(
            &[MeterRow {
                date: Some(date(2024, 1, 1)),
                equipment: "EXC-01".into(),
                value: Some(100.0),
                note: "checked".into(),
            }],
            "sheet1",
        );
        let (sql, _) = script.finish();
        assert!(sql.contains("'7a1d2c70-0000-4000-8000-000000000001'::uuid"));
        assert!(sql.contains("'checked'"));
    }
}
