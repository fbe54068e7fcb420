//! End-to-end tests for the scoring pipeline
//! Verifies row count conservation, rank consistency, the column-count
//! gate, and JSON-safe serialization of the scored table.

use chrono::NaiveDate;
use serde_json::Value;
use shared::{score_table, Cell, PriorityLabel, TableError, VisitRecord};

const HEADER: &str = "Sr No,Date,Village,Taluka,District,State,Dairy Type,Time M,Time E,Milk M,Milk E,Sabhasad Count,Nature Sabhasad,Mantri Name,Support,Delivery Period,Demo Days,Dispatch Days,Decision Maker,Holder,Current Business";

/// Sub-label row under the header; skipped by the pipeline
const SUB_LABELS: &str = ",,,,,,,Morning,Evening,Morning,Evening,,,,,,,,,,";

fn june() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

fn december() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()
}

/// Assemble a sheet from header, sub-label row, and data rows
fn sheet(rows: &[&str]) -> Vec<u8> {
    let mut s = format!("{}\n{}\n", HEADER, SUB_LABELS);
    for row in rows {
        s.push_str(row);
        s.push('\n');
    }
    s.into_bytes()
}

/// A data row with the scoring-relevant fields parameterized
fn visit_row(
    village: &str,
    nature: &str,
    support: &str,
    period: &str,
    demo: &str,
    dispatch: &str,
    holder: &str,
    business: &str,
) -> String {
    format!(
        "1,2025-06-01,{village},Sangamner,Ahmednagar,Maharashtra,Co-op,06:30,18:30,420,390,210,\
         {nature},Ramesh Pawar,{support},{period},{demo},{dispatch},Chairman,{holder},{business}"
    )
}

fn complete_row(village: &str) -> String {
    visit_row(village, "Aware", "High", "Oct-Dec", "8", "6", "H", "Yes")
}

// =============================================================================
// Property 1: Row Count Conservation
// =============================================================================

mod row_counts {
    use super::*;

    #[test]
    fn total_raw_equals_scored_plus_dropped() {
        let data = sheet(&[
            &complete_row("Nimgaon"),
            &visit_row("Wadgaon", "Aware", "High", "Oct-Dec", "8", "pending", "H", "Yes"),
            &complete_row("Loni"),
            &visit_row("Akole", "Aware", "High", "", "8", "6", "H", "Yes"),
        ]);
        let report = score_table(&data, june()).unwrap();

        assert_eq!(report.stats.total_raw, 4);
        assert_eq!(report.stats.total_scored, 2);
        assert_eq!(report.stats.dropped, 2);
        assert_eq!(report.rows.len(), 2);
    }

    #[test]
    fn sub_label_row_is_not_counted() {
        let data = sheet(&[&complete_row("Nimgaon")]);
        let report = score_table(&data, june()).unwrap();
        assert_eq!(report.stats.total_raw, 1);
    }

    #[test]
    fn empty_sheet_produces_empty_report() {
        let report = score_table(&sheet(&[]), june()).unwrap();
        assert_eq!(report.stats.total_raw, 0);
        assert_eq!(report.stats.dropped, 0);
        assert!(report.rows.is_empty());
    }
}

// =============================================================================
// Property 7: Invalid-Row Exclusion
// =============================================================================

mod row_exclusion {
    use super::*;

    #[test]
    fn pending_holder_tier_is_dropped() {
        let data = sheet(&[
            &complete_row("Nimgaon"),
            &visit_row("Wadgaon", "Aware", "High", "Oct-Dec", "8", "6", "pending", "Yes"),
        ]);
        let report = score_table(&data, june()).unwrap();

        assert_eq!(report.stats.dropped, 1);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(
            report.rows[0].visit.village,
            Cell::Text("Nimgaon".to_string())
        );
    }

    #[test]
    fn all_blank_sentinels_drop_the_row() {
        for sentinel in ["", "nan", "-", "none", "0", "PENDING", " Nan "] {
            let data = sheet(&[&visit_row(
                "Nimgaon", "Aware", "High", "Oct-Dec", "8", "6", sentinel, "Yes",
            )]);
            let report = score_table(&data, june()).unwrap();
            assert_eq!(report.stats.dropped, 1, "sentinel {:?} not dropped", sentinel);
        }
    }

    #[test]
    fn dropped_rows_never_abort_the_batch() {
        let data = sheet(&[
            &visit_row("Wadgaon", "-", "-", "-", "-", "-", "-", "-"),
            &complete_row("Nimgaon"),
        ]);
        let report = score_table(&data, june()).unwrap();
        assert_eq!(report.stats.total_scored, 1);
    }
}

// =============================================================================
// Properties 2 and 3: Score Bounds and Rank Consistency
// =============================================================================

mod aggregation {
    use super::*;

    #[test]
    fn totals_stay_within_weight_budget() {
        let data = sheet(&[
            &complete_row("Nimgaon"),
            &visit_row("Wadgaon", "Not Aware", "low", "Jul-Aug", "50", "60", "L", "No"),
            &visit_row("Loni", "Aware", "med", "Nov-Feb", "25", "-", "M", "Mid"),
        ]);
        let report = score_table(&data, june()).unwrap();

        for row in &report.rows {
            assert!(row.total >= 0.0 && row.total <= 100.0);
        }
    }

    #[test]
    fn equal_totals_share_a_rank() {
        let data = sheet(&[
            &complete_row("Nimgaon"),
            &complete_row("Wadgaon"),
            &visit_row("Loni", "Not Aware", "low", "Jul-Aug", "50", "60", "L", "No"),
        ]);
        let report = score_table(&data, june()).unwrap();

        assert_eq!(report.rows[0].rank, 1);
        assert_eq!(report.rows[1].rank, 1);
        assert_eq!(report.rows[0].total, report.rows[1].total);
        // next distinct score resumes past the tie
        assert_eq!(report.rows[2].rank, 3);
    }

    #[test]
    fn rows_are_sorted_by_ascending_rank() {
        let data = sheet(&[
            &visit_row("Loni", "Not Aware", "low", "Jul-Aug", "50", "60", "L", "No"),
            &complete_row("Nimgaon"),
        ]);
        let report = score_table(&data, june()).unwrap();

        assert_eq!(report.rows[0].rank, 1);
        assert_eq!(
            report.rows[0].visit.village,
            Cell::Text("Nimgaon".to_string())
        );
        assert_eq!(report.rows[1].rank, 2);
    }

    #[test]
    fn known_row_scores_exactly() {
        // season Oct-Dec in June: distance 4 -> flat 2.0
        // payment: dispatch 6 -> 22, demo 8 -> 22 -> 22.0
        // holder H -> 20, business Yes -> 12, aware -> 12, support High -> 12
        let data = sheet(&[&complete_row("Nimgaon")]);
        let report = score_table(&data, june()).unwrap();

        let row = &report.rows[0];
        assert_eq!(row.scores.season, 2.0);
        assert_eq!(row.scores.payment, 22.0);
        assert_eq!(row.scores.holder, 20.0);
        assert_eq!(row.scores.business, 12.0);
        assert_eq!(row.scores.sabhasad, 12.0);
        assert_eq!(row.scores.support, 12.0);
        assert_eq!(row.total, 80.0);
        assert_eq!(row.label, PriorityLabel::Urgent);
    }

    #[test]
    fn labels_agree_with_totals() {
        let data = sheet(&[
            &complete_row("Nimgaon"),
            &visit_row("Wadgaon", "Not Aware", "low", "Jul-Aug", "50", "60", "L", "No"),
            &visit_row("Loni", "Aware", "Medium", "Nov-Feb", "25", "18", "M", "Mid"),
        ]);
        let report = score_table(&data, june()).unwrap();

        for row in &report.rows {
            assert_eq!(row.label, PriorityLabel::from_score(row.total));
        }
        let stats = &report.stats;
        assert_eq!(
            stats.urgent + stats.high + stats.medium + stats.low,
            stats.total_scored
        );
    }

    #[test]
    fn december_run_uses_wrapped_season() {
        // Nov-Feb in December scores the 0.85 tier (center is January)
        let data = sheet(&[&visit_row(
            "Nimgaon", "Aware", "High", "Nov-Feb", "8", "6", "H", "Yes",
        )]);
        let report = score_table(&data, december()).unwrap();
        assert_eq!(report.rows[0].scores.season, 18.7);
    }
}

// =============================================================================
// Property 9: Column-Count Gate
// =============================================================================

mod column_gate {
    use super::*;

    #[test]
    fn twenty_columns_are_rejected() {
        let header_20 = HEADER.rsplit_once(',').unwrap().0;
        let data = format!("{}\n", header_20).into_bytes();
        let err = score_table(&data, june()).unwrap_err();

        match err {
            TableError::TooFewColumns { required, found } => {
                assert_eq!(required, VisitRecord::FIELD_COUNT);
                assert_eq!(found, 20);
            }
            other => panic!("expected TooFewColumns, got {:?}", other),
        }
        // client-facing message names actual vs required counts
        let msg = score_table(&data, june()).unwrap_err().to_string();
        assert!(msg.contains("21"));
        assert!(msg.contains("20"));
    }

    #[test]
    fn exactly_twenty_one_columns_are_accepted() {
        let data = sheet(&[&complete_row("Nimgaon")]);
        assert!(score_table(&data, june()).is_ok());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let mut s = format!("{},Notes\n{},\n", HEADER, SUB_LABELS);
        s.push_str(&format!("{},remark\n", complete_row("Nimgaon")));
        let report = score_table(s.as_bytes(), june()).unwrap();
        assert_eq!(report.stats.total_scored, 1);
    }
}

// =============================================================================
// Property 8: Idempotence, and serializer shape
// =============================================================================

mod serialization {
    use super::*;

    #[test]
    fn two_runs_produce_identical_output() {
        let data = sheet(&[
            &complete_row("Nimgaon"),
            &visit_row("Wadgaon", "Aware", "med", "Nov-Feb", "25", "-", "M", "Mid"),
            &visit_row("Loni", "Not Aware", "low", "Jul-Aug", "50", "60", "L", "No"),
        ]);

        let first = serde_json::to_value(score_table(&data, june()).unwrap()).unwrap();
        let second = serde_json::to_value(score_table(&data, june()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rows_serialize_flat_and_json_safe() {
        let data = sheet(&[&complete_row("Nimgaon")]);
        let value = serde_json::to_value(score_table(&data, june()).unwrap()).unwrap();

        let row = &value["rows"][0];
        assert_eq!(row["VILLAGE"], Value::from("Nimgaon"));
        assert_eq!(row["DATE"], Value::from("2025-06-01"));
        // integer-valued numerics come out as plain integers
        assert_eq!(row["MILK_MORNING"], Value::from(420));
        assert_eq!(row["SR_NO"], Value::from(1));
        assert_eq!(row["PRIORITY_RANK"], Value::from(1));
        assert_eq!(row["PRIORITY_LABEL"], Value::from("URGENT"));
        assert_eq!(row["TOTAL_SCORE"], Value::from(80.0));
        assert_eq!(row["SCORE_PAYMENT"], Value::from(22.0));
        assert_eq!(row["HIGH_LOW_HOLDER"], Value::from("H"));
    }

    #[test]
    fn missing_cells_serialize_as_empty_strings() {
        // decision maker left blank
        let row = "1,2025-06-01,Nimgaon,Sangamner,Ahmednagar,Maharashtra,Co-op,06:30,18:30,\
                   420,390,210,Aware,Ramesh Pawar,High,Oct-Dec,8,6,,H,Yes";
        let data = sheet(&[row]);
        let value = serde_json::to_value(score_table(&data, june()).unwrap()).unwrap();
        assert_eq!(value["rows"][0]["DECISION_MAKER"], Value::from(""));
    }

    #[test]
    fn stats_include_month_label() {
        let data = sheet(&[&complete_row("Nimgaon")]);
        let report = score_table(&data, june()).unwrap();
        assert_eq!(report.stats.current_month, "June 2025");

        let report = score_table(&data, december()).unwrap();
        assert_eq!(report.stats.current_month, "December 2025");
    }
}
