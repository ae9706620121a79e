use census_scatter::core::{MarginOfError, Metric};
use census_scatter::data::{REQUIRED_COLUMNS, load_records_from_str};
use census_scatter::{ChartError, LoadError};

fn header() -> String {
    REQUIRED_COLUMNS.join(",")
}

#[test]
fn rows_keep_file_order_and_margins() {
    let document = format!(
        "{}\n\
         9,Connecticut,CT,10.1,0.3,40.8,0.2,71346,499,7.9,7,8.8,25.3,24.1,26.6,13.5,12.5,14.5\n\
         10,Delaware,DE,11.7,0.8,39.6,0.3,61017,1193,9.1,7.6,10.6,31.4,29.2,33.6,17.8,16,19.6\n",
        header()
    );
    let records = load_records_from_str(&document).expect("load");
    let abbrs: Vec<_> = records.iter().map(|record| record.abbr.as_str()).collect();
    assert_eq!(abbrs, vec!["CT", "DE"]);
    assert_eq!(records[1].id, 10);
    assert_eq!(
        records[0].margin(Metric::Income),
        Some(MarginOfError::PlusMinus(499.0))
    );
    assert_eq!(records[0].metrics().count(), 6);
}

#[test]
fn non_numeric_metric_is_load_failure() {
    let document = format!(
        "{}\n1,Alabama,AL,lots,0.5,38.6,0.2,42830,598,13.9,12.7,15.1,33.5,32.1,35,21.1,19.8,22.5\n",
        header()
    );
    let err = load_records_from_str(&document).expect_err("malformed");
    assert!(matches!(err, ChartError::LoadFailure(LoadError::Csv(_))));
}

#[test]
fn short_row_is_load_failure() {
    let document = format!("{}\n1,Alabama,AL,19.3\n", header());
    let err = load_records_from_str(&document).expect_err("short row");
    assert!(matches!(err, ChartError::LoadFailure(LoadError::Csv(_))));
}

#[test]
fn header_only_document_yields_no_records() {
    let records = load_records_from_str(&format!("{}\n", header())).expect("load");
    assert!(records.is_empty());
}
