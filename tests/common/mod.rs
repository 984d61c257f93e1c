//! Common test utilities: a seeded scratch database built the same way
//! production data arrives, through the CSV loader.

use surveydb::{create_router, loader, QueryGateway, SurveyStore, ValidationMode};
use tempfile::TempDir;

/// Twelve rows covering pagination boundaries, a duplicate `user_id` (2),
/// and multiple Engineer rows for filter and GROUP BY assertions.
pub const FIXTURE_CSV: &str = "\
user_id,name,email,password,Age,Gender,Marital Status,Occupation,Monthly Income,Educational Qualifications,Family size
1,Alice,alice@example.com,pw1,24,Female,Single,Student,No Income,Graduate,3
2,Bob,bob@example.com,pw2,27,Male,Married,Engineer,25001 to 50000,Graduate,4
3,Carol,carol@example.com,pw3,31,Female,Married,Engineer,More than 50000,Post Graduate,2
4,Dan,dan@example.com,pw4,29,Male,Single,Self Employeed,10001 to 25000,Graduate,5
5,Eve,eve@example.com,pw5,35,Female,Married,House wife,No Income,School,6
6,Frank,frank@example.com,pw6,22,Male,Single,Student,Below Rs.10000,Graduate,3
7,Grace,grace@example.com,pw7,26,Female,Single,Employee,10001 to 25000,Post Graduate,2
8,Heidi,heidi@example.com,pw8,41,Female,Married,Self Employeed,25001 to 50000,Ph.D,4
9,Ivan,ivan@example.com,pw9,30,Male,Married,Employee,25001 to 50000,Graduate,3
10,Judy,judy@example.com,pw10,28,Female,Single,Engineer,25001 to 50000,Graduate,1
2,Bobby,bobby@example.com,pw11,33,Male,Married,Employee,10001 to 25000,Graduate,4
12,Mallory,mallory@example.com,pw12,23,Female,Single,Student,No Income,Graduate,5
";

pub const FIXTURE_ROWS: usize = 12;

/// Seed a scratch database through the loader and open a store over it.
pub fn create_test_store() -> (SurveyStore, TempDir) {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = tmp_dir.path().join("users.csv");
    std::fs::write(&csv_path, FIXTURE_CSV).expect("Failed to write fixture CSV");

    let store =
        SurveyStore::open(tmp_dir.path().join("survey.db")).expect("Failed to open store");
    let report = loader::load_csv(&store, &csv_path).expect("Failed to load fixture CSV");
    assert_eq!(report.inserted, FIXTURE_ROWS);
    assert_eq!(report.skipped, 0);

    (store, tmp_dir)
}

pub fn create_test_gateway() -> (QueryGateway, TempDir) {
    let (store, tmp_dir) = create_test_store();
    (QueryGateway::new(store, ValidationMode::DenyList), tmp_dir)
}

pub fn create_test_app() -> (axum::Router, TempDir) {
    create_test_app_with_mode(ValidationMode::DenyList)
}

pub fn create_test_app_with_mode(mode: ValidationMode) -> (axum::Router, TempDir) {
    let (store, tmp_dir) = create_test_store();
    let gateway = QueryGateway::new(store, mode);
    (create_router(gateway), tmp_dir)
}
