//! Parsing of the exported workbook sheets into normalized rows.
//!
//! Each sheet is one CSV file with a single header line. Column positions
//! mirror the legacy workbook; anything the builders require that a row
//! lacks is left for them to count as skipped.

use fleetlog_core::import::{
    clean, dedupe_equipment, dedupe_names, parse_date, parse_number, split_csv_line, EquipmentRow,
    MeterRow, ServiceRow,
};

/// Return the data lines of a sheet: header dropped, blank lines skipped.
fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().skip(1).filter(|line| !line.trim().is_empty())
}

/// Field at `index`, cleaned, or empty when the row is short.
fn field(row: &[String], index: usize) -> String {
    row.get(index).map(|value| clean(value)).unwrap_or_default()
}

/// Parse the equipment sheet.
///
/// Columns: name, brand, model, identification, plate, type, operator.
/// The identification doubles as the code when present, otherwise the name
/// does; the description falls back the other way. Duplicates are dropped
/// case-insensitively by code.
pub fn parse_equipment_sheet(text: &str) -> Vec<EquipmentRow> {
    let rows = data_lines(text)
        .map(|line| {
            let row = split_csv_line(line);
            let name = field(&row, 0);
            let identification = field(&row, 3);
            let code = if identification.is_empty() {
                name.clone()
            } else {
                identification.clone()
            };
            let description = if name.is_empty() { identification } else { name };
            EquipmentRow { code, description }
        })
        .filter(|row| !row.code.is_empty())
        .collect();
    dedupe_equipment(rows)
}

/// Parse a single-name-column sheet (suppliers, service types), deduplicated.
pub fn parse_name_sheet(text: &str) -> Vec<String> {
    let names = data_lines(text)
        .map(|line| field(&split_csv_line(line), 0))
        .collect();
    dedupe_names(names)
}

/// Parse the services sheet.
///
/// Columns: date, equipment, supplier, cost, description. The description
/// column also names the service type; rows with no description fall back
/// to the supplier column for display purposes, matching the legacy sheet.
pub fn parse_services_sheet(text: &str) -> Vec<ServiceRow> {
    data_lines(text)
        .map(|line| {
            let row = split_csv_line(line);
            let supplier = field(&row, 2);
            let description_cell = field(&row, 4);
            let description = if description_cell.is_empty() {
                supplier.clone()
            } else {
                description_cell.clone()
            };
            ServiceRow {
                date: parse_date(&field(&row, 0)),
                equipment: field(&row, 1),
                supplier,
                cost: parse_number(&field(&row, 3)),
                description,
                service_type: description_cell,
            }
        })
        .filter(|row| !row.equipment.is_empty())
        .collect()
}

/// Parse one meter-reading sheet.
///
/// Columns: date, equipment, then per-period columns with the reading in
/// column 6, matching the legacy sheet layout.
pub fn parse_meter_sheet(text: &str) -> Vec<MeterRow> {
    data_lines(text)
        .map(|line| {
            let row = split_csv_line(line);
            MeterRow {
                date: parse_date(&field(&row, 0)),
                equipment: field(&row, 1),
                value: parse_number(&field(&row, 6)),
                note: String::new(),
            }
        })
        .filter(|row| !row.equipment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn equipment_sheet_prefers_identification_as_code() {
        let text = "name,brand,model,identification,plate,type,operator\n\
                    Tracked excavator,CAT,320,EXC-01,,heavy,J. Silva\n\
                    Water truck,,,,ABC1D23,truck,\n";
        let rows = parse_equipment_sheet(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "EXC-01");
        assert_eq!(rows[0].description, "Tracked excavator");
        // No identification column: the name serves as both.
        assert_eq!(rows[1].code, "Water truck");
        assert_eq!(rows[1].description, "Water truck");
    }

    #[test]
    fn equipment_sheet_drops_duplicates_and_blanks() {
        let text = "name,brand,model,identification\n\
                    Excavator,,,EXC-01\n\
                    Excavator again,,,exc-01\n\
                    \n\
                    ,,,\n";
        let rows = parse_equipment_sheet(text);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn name_sheet_dedupes() {
        let text = "name\nAlpha Diesel\nalpha diesel\nBeta Parts\n";
        assert_eq!(parse_name_sheet(text), vec!["Alpha Diesel", "Beta Parts"]);
    }

    #[test]
    fn services_sheet_normalizes_rows() {
        let text = "date,equipment,supplier,cost,description\n\
                    15/03/2024,EXC-01,Alpha Diesel,\"R$ 1.234,56\",Oil change\n\
                    16/03/2024,EXC-01,Beta Parts,,\n";
        let rows = parse_services_sheet(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(rows[0].cost, Some(1234.56));
        assert_eq!(rows[0].service_type, "Oil change");
        // Description falls back to the supplier; service type stays empty
        // so the builder counts the row as skipped.
        assert_eq!(rows[1].description, "Beta Parts");
        assert_eq!(rows[1].service_type, "");
        assert_eq!(rows[1].cost, None);
    }

    #[test]
    fn meter_sheet_reads_column_six() {
        let text = "date,equipment,a,b,c,d,reading\n\
                    01/02/2024,EXC-01,,,,,1520\n\
                    02/02/2024,,,,,,1530\n";
        let rows = parse_meter_sheet(text);
        // The second row has no equipment and is dropped.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, Some(1520.0));
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }
}
