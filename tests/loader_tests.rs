//! Loader tests: wholesale table replacement and source-header mapping.

mod common;

use common::{create_test_store, FIXTURE_ROWS};
use surveydb::{loader, SurveyStore};
use tempfile::TempDir;

fn load_from(csv: &str) -> (SurveyStore, loader::LoadReport, TempDir) {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = tmp_dir.path().join("users.csv");
    std::fs::write(&csv_path, csv).expect("Failed to write CSV");

    let store =
        SurveyStore::open(tmp_dir.path().join("survey.db")).expect("Failed to open store");
    let report = loader::load_csv(&store, &csv_path).expect("Failed to load CSV");
    (store, report, tmp_dir)
}

#[test]
fn test_rerun_replaces_table_wholesale() {
    let (store, tmp_dir) = create_test_store();
    assert_eq!(store.count().unwrap(), FIXTURE_ROWS as i64);

    // A second run drops and recreates; counts do not accumulate.
    let csv_path = tmp_dir.path().join("users.csv");
    let report = loader::load_csv(&store, &csv_path).unwrap();
    assert_eq!(report.inserted, FIXTURE_ROWS);
    assert_eq!(store.count().unwrap(), FIXTURE_ROWS as i64);
}

#[test]
fn test_spaced_headers_map_to_underscored_columns() {
    let csv = "\
user_id,name,email,password,Age,Gender,Marital Status,Occupation,Monthly Income,Educational Qualifications,Family size
1,Asha,asha@example.com,pw,31,Female,Married,Engineer,25001 to 50000,Graduate,4
";
    let (store, report, _tmp) = load_from(csv);
    assert_eq!(report.inserted, 1);

    let row = store.fetch_by_id(1).unwrap().expect("row should exist");
    assert_eq!(row.marital_status, "Married");
    assert_eq!(row.monthly_income, "25001 to 50000");
    assert_eq!(row.educational_qualifications, "Graduate");
    assert_eq!(row.family_size, 4);
}

#[test]
fn test_header_and_field_whitespace_is_trimmed() {
    let csv = "\
user_id , name ,email,password, Age ,Gender, Marital Status ,Occupation, Monthly Income , Educational Qualifications , Family size
1, Asha ,asha@example.com,pw, 31 ,Female, Married ,Engineer, 25001 to 50000 , Graduate , 4
";
    let (store, report, _tmp) = load_from(csv);
    assert_eq!(report.inserted, 1);

    let row = store.fetch_by_id(1).unwrap().expect("row should exist");
    assert_eq!(row.name, "Asha");
    assert_eq!(row.age, 31);
    assert_eq!(row.marital_status, "Married");
}

#[test]
fn test_underscored_headers_are_accepted() {
    let csv = "\
user_id,name,email,password,Age,Gender,Marital_Status,Occupation,Monthly_Income,Educational_Qualifications,Family_size
1,Asha,asha@example.com,pw,31,Female,Married,Engineer,25001 to 50000,Graduate,4
";
    let (_, report, _tmp) = load_from(csv);
    assert_eq!(report.inserted, 1);
}

#[test]
fn test_rows_with_non_numeric_integer_fields_are_skipped() {
    let csv = "\
user_id,name,email,password,Age,Gender,Marital Status,Occupation,Monthly Income,Educational Qualifications,Family size
1,Asha,asha@example.com,pw,31,Female,Married,Engineer,25001 to 50000,Graduate,4
oops,Bad,bad@example.com,pw,31,Male,Single,Student,No Income,Graduate,3
2,Worse,worse@example.com,pw,,Male,Single,Student,No Income,Graduate,3
";
    let (store, report, _tmp) = load_from(csv);
    assert_eq!(report.inserted, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_missing_column_is_an_error() {
    let csv = "\
user_id,name,email,password,Age,Gender,Occupation,Monthly Income,Educational Qualifications,Family size
1,Asha,asha@example.com,pw,31,Female,Engineer,25001 to 50000,Graduate,4
";
    let tmp_dir = TempDir::new().unwrap();
    let csv_path = tmp_dir.path().join("users.csv");
    std::fs::write(&csv_path, csv).unwrap();

    let store = SurveyStore::open(tmp_dir.path().join("survey.db")).unwrap();
    let err = loader::load_csv(&store, &csv_path).unwrap_err();
    assert!(matches!(err, loader::LoadError::MissingColumn(ref c) if c == "Marital Status"));
}
