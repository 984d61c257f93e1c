use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// One row of the imported survey dataset.
///
/// Field names serialize with the table's own column casing so the wire
/// shape matches what a raw `SELECT *` would produce. `user_id` carries no
/// uniqueness constraint; duplicates are possible. `password` arrives in
/// plain text from the source dataset and is returned as stored — a known
/// defect of the dataset, not something this gateway can redact without
/// changing the wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Marital_Status")]
    pub marital_status: String,
    #[serde(rename = "Occupation")]
    pub occupation: String,
    #[serde(rename = "Monthly_Income")]
    pub monthly_income: String,
    #[serde(rename = "Educational_Qualifications")]
    pub educational_qualifications: String,
    #[serde(rename = "Family_size")]
    pub family_size: i64,
}

impl Record {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Record {
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            password: row.get("password")?,
            age: row.get("Age")?,
            gender: row.get("Gender")?,
            marital_status: row.get("Marital_Status")?,
            occupation: row.get("Occupation")?,
            monthly_income: row.get("Monthly_Income")?,
            educational_qualifications: row.get("Educational_Qualifications")?,
            family_size: row.get("Family_size")?,
        })
    }
}
