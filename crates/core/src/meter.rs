//! Hour-meter derivation engine and write validator.
//!
//! Readings are stored raw; `previous_value` and `hours_worked` are a
//! read-time projection computed here, never persisted. This module has zero
//! external dependencies (no DB, no async, no I/O) so the same logic serves
//! the API handlers and any future reporting tooling.
//!
//! Ordering within one equipment is ascending by (`reference_date`, `id`).
//! Same-date readings resolve by ascending `id`, which under BIGSERIAL keys
//! is insertion order.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Derivation input / output
// ---------------------------------------------------------------------------

/// The fields of one stored reading that the derivation walk needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterPoint {
    pub id: DbId,
    pub equipment_id: DbId,
    pub reference_date: NaiveDate,
    pub value: f64,
}

/// Derived fields for one reading.
///
/// `previous_value` is the value of the chronologically preceding reading for
/// the same equipment, absent for the first reading. `hours_worked` is
/// `value - previous_value`, absent whenever `previous_value` is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MeterDerivation {
    pub previous_value: Option<f64>,
    pub hours_worked: Option<f64>,
}

// ---------------------------------------------------------------------------
// Derivation engine
// ---------------------------------------------------------------------------

/// Annotate a set of readings with per-equipment derived fields.
///
/// The output is index-aligned with `points`: callers keep whatever display
/// order they fetched (typically `reference_date` descending) and zip the
/// derivations back onto their rows. Every input produces exactly one output;
/// nothing is dropped, invented, or re-sorted.
///
/// Cost is one sort over the input plus a linear walk, O(n log n).
pub fn annotate(points: &[MeterPoint]) -> Vec<MeterDerivation> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (&points[a], &points[b]);
        pa.equipment_id
            .cmp(&pb.equipment_id)
            .then(pa.reference_date.cmp(&pb.reference_date))
            .then(pa.id.cmp(&pb.id))
    });

    let mut derived = vec![MeterDerivation::default(); points.len()];
    let mut last_seen: HashMap<DbId, f64> = HashMap::new();

    for idx in order {
        let point = &points[idx];
        let previous = last_seen.get(&point.equipment_id).copied();
        derived[idx] = MeterDerivation {
            previous_value: previous,
            hours_worked: previous.map(|p| point.value - p),
        };
        last_seen.insert(point.equipment_id, point.value);
    }

    derived
}

// ---------------------------------------------------------------------------
// Write validator
// ---------------------------------------------------------------------------

/// A rejected write: the new value would break per-equipment monotonicity.
///
/// Carries the neighbor value the write collided with so the caller can show
/// it to the user.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MeterRegression {
    /// The value is lower than the reading that precedes it by date.
    #[error("reading {attempted} is lower than the preceding reading {previous}")]
    BelowPrevious { attempted: f64, previous: f64 },

    /// The value is higher than the reading that follows it by date. Only
    /// reachable when backfilling before existing rows.
    #[error("reading {attempted} is higher than the following reading {next}")]
    AboveNext { attempted: f64, next: f64 },
}

impl MeterRegression {
    /// The neighbor value the write conflicted with.
    pub fn conflicting_value(&self) -> f64 {
        match self {
            Self::BelowPrevious { previous, .. } => *previous,
            Self::AboveNext { next, .. } => *next,
        }
    }
}

/// Validate a reading value against its chronological neighbors.
///
/// `previous` / `next` are the values of the readings immediately before and
/// after the prospective (`reference_date`, `id`) position for the same
/// equipment, excluding the reading's own row on update. Equal values are
/// allowed on both sides; the meter must be non-decreasing, not strictly
/// increasing.
///
/// When the reading lands at the end of the history (`next` absent) this is
/// exactly the "not below the latest reading" check.
pub fn validate_reading(
    value: f64,
    previous: Option<f64>,
    next: Option<f64>,
) -> Result<(), MeterRegression> {
    if let Some(previous) = previous {
        if value < previous {
            return Err(MeterRegression::BelowPrevious {
                attempted: value,
                previous,
            });
        }
    }
    if let Some(next) = next {
        if value > next {
            return Err(MeterRegression::AboveNext {
                attempted: value,
                next,
            });
        }
    }
    Ok(())
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

    fn point(id: DbId, equipment_id: DbId, reference_date: NaiveDate, value: f64) -> MeterPoint {
        MeterPoint {
            id,
            equipment_id,
            reference_date,
            value,
        }
    }

    // -- annotate: basics -----------------------------------------------------

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(annotate(&[]).is_empty());
    }

    #[test]
    fn single_reading_has_no_derived_fields() {
        let derived = annotate(&[point(1, 10, date(2024, 1, 1), 100.0)]);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].previous_value, None);
        assert_eq!(derived[0].hours_worked, None);
    }

    #[test]
    fn two_readings_chain() {
        // The EXC-01 scenario: (2024-01-01, 100), (2024-02-01, 180).
        let points = [
            point(1, 10, date(2024, 1, 1), 100.0),
            point(2, 10, date(2024, 2, 1), 180.0),
        ];
        let derived = annotate(&points);
        assert_eq!(derived[0], MeterDerivation::default());
        assert_eq!(derived[1].previous_value, Some(100.0));
        assert_eq!(derived[1].hours_worked, Some(80.0));
    }

    #[test]
    fn output_preserves_input_order() {
        // Display order is date-descending; derivations must line up by index.
        let points = [
            point(3, 10, date(2024, 3, 1), 250.0),
            point(2, 10, date(2024, 2, 1), 180.0),
            point(1, 10, date(2024, 1, 1), 100.0),
        ];
        let derived = annotate(&points);
        assert_eq!(derived[0].previous_value, Some(180.0));
        assert_eq!(derived[0].hours_worked, Some(70.0));
        assert_eq!(derived[1].previous_value, Some(100.0));
        assert_eq!(derived[1].hours_worked, Some(80.0));
        assert_eq!(derived[2].previous_value, None);
    }

    #[test]
    fn equipment_chains_are_independent() {
        let points = [
            point(1, 10, date(2024, 1, 1), 100.0),
            point(2, 20, date(2024, 1, 15), 500.0),
            point(3, 10, date(2024, 2, 1), 180.0),
            point(4, 20, date(2024, 2, 15), 520.0),
        ];
        let derived = annotate(&points);
        assert_eq!(derived[0].previous_value, None);
        assert_eq!(derived[1].previous_value, None);
        assert_eq!(derived[2].previous_value, Some(100.0));
        assert_eq!(derived[2].hours_worked, Some(80.0));
        assert_eq!(derived[3].previous_value, Some(500.0));
        assert_eq!(derived[3].hours_worked, Some(20.0));
    }

    #[test]
    fn conservation_every_input_annotated_once() {
        let points: Vec<MeterPoint> = (0..50)
            .map(|i| point(i, i % 5, date(2024, 1, 1 + (i / 5) as u32), i as f64 * 3.0))
            .collect();
        assert_eq!(annotate(&points).len(), points.len());
    }

    #[test]
    fn annotation_is_idempotent() {
        let points = [
            point(2, 10, date(2024, 2, 1), 180.0),
            point(1, 10, date(2024, 1, 1), 100.0),
            point(3, 20, date(2024, 1, 5), 40.0),
        ];
        assert_eq!(annotate(&points), annotate(&points));
    }

    #[test]
    fn monotonic_chain_yields_non_negative_hours() {
        let values = [100.0, 100.0, 130.5, 200.0, 260.25];
        let points: Vec<MeterPoint> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| point(i as DbId + 1, 10, date(2024, 1, 1 + i as u32), v))
            .collect();
        let derived = annotate(&points);
        assert_eq!(derived[0].hours_worked, None);
        for (i, d) in derived.iter().enumerate().skip(1) {
            assert_eq!(d.hours_worked, Some(values[i] - values[i - 1]));
            assert!(d.hours_worked.unwrap() >= 0.0);
        }
    }

    #[test]
    fn same_date_readings_resolve_by_id() {
        // Two readings on the same date: lower id counts as earlier.
        let points = [
            point(8, 10, date(2024, 1, 1), 110.0),
            point(7, 10, date(2024, 1, 1), 100.0),
        ];
        let derived = annotate(&points);
        assert_eq!(derived[0].previous_value, Some(100.0));
        assert_eq!(derived[0].hours_worked, Some(10.0));
        assert_eq!(derived[1].previous_value, None);
    }

    #[test]
    fn backfilled_reading_slots_between_neighbors() {
        // Reading 3 carries an earlier date than reading 2 and must be
        // treated as the middle of the chain despite its later insertion.
        let points = [
            point(1, 10, date(2024, 1, 1), 100.0),
            point(2, 10, date(2024, 3, 1), 200.0),
            point(3, 10, date(2024, 2, 1), 150.0),
        ];
        let derived = annotate(&points);
        assert_eq!(derived[1].previous_value, Some(150.0));
        assert_eq!(derived[1].hours_worked, Some(50.0));
        assert_eq!(derived[2].previous_value, Some(100.0));
        assert_eq!(derived[2].hours_worked, Some(50.0));
    }

    // -- validate_reading -----------------------------------------------------

    #[test]
    fn first_reading_always_valid() {
        assert_eq!(validate_reading(0.0, None, None), Ok(()));
        assert_eq!(validate_reading(1234.5, None, None), Ok(()));
    }

    #[test]
    fn regression_against_latest_rejected() {
        // Latest reading is 100: writing 50 must fail carrying the 100.
        let err = validate_reading(50.0, Some(100.0), None).unwrap_err();
        assert_eq!(
            err,
            MeterRegression::BelowPrevious {
                attempted: 50.0,
                previous: 100.0,
            }
        );
        assert_eq!(err.conflicting_value(), 100.0);
    }

    #[test]
    fn advance_against_latest_accepted() {
        assert_eq!(validate_reading(150.0, Some(100.0), None), Ok(()));
    }

    #[test]
    fn equal_to_previous_accepted() {
        // Non-decreasing, not strictly increasing.
        assert_eq!(validate_reading(100.0, Some(100.0), None), Ok(()));
    }

    #[test]
    fn exc01_third_reading_rejected() {
        // EXC-01 has (2024-01-01, 100) and (2024-02-01, 180); a new
        // (2024-03-01, 170) regresses against 180.
        let err = validate_reading(170.0, Some(180.0), None).unwrap_err();
        assert_eq!(err.conflicting_value(), 180.0);
    }

    #[test]
    fn backfill_between_neighbors_accepted() {
        assert_eq!(validate_reading(120.0, Some(100.0), Some(180.0)), Ok(()));
    }

    #[test]
    fn backfill_below_predecessor_rejected() {
        let err = validate_reading(90.0, Some(100.0), Some(180.0)).unwrap_err();
        assert_eq!(
            err,
            MeterRegression::BelowPrevious {
                attempted: 90.0,
                previous: 100.0,
            }
        );
    }

    #[test]
    fn backfill_above_successor_rejected() {
        let err = validate_reading(200.0, Some(100.0), Some(180.0)).unwrap_err();
        assert_eq!(
            err,
            MeterRegression::AboveNext {
                attempted: 200.0,
                next: 180.0,
            }
        );
        assert_eq!(err.conflicting_value(), 180.0);
    }

    #[test]
    fn backfill_before_whole_history_checks_successor_only() {
        assert_eq!(validate_reading(50.0, None, Some(100.0)), Ok(()));
        assert!(validate_reading(150.0, None, Some(100.0)).is_err());
    }

    #[test]
    fn regression_message_carries_values() {
        let err = validate_reading(50.0, Some(100.0), None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("50"));
        assert!(msg.contains("100"));
    }
}
