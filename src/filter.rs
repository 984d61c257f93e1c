//! Turns the structured filter set into a parameterized predicate.
//!
//! Values are always bound, never spliced into statement text. Absent
//! filters contribute no clause; an empty filter set means "match all
//! rows".

use rusqlite::types::Value as SqlValue;

use crate::storage::Bindings;

/// Optional exact-match filters over the `users` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub occupation: Option<String>,
    pub gender: Option<String>,
    pub age: Option<AgeFilter>,
}

/// The age filter as supplied by the client.
///
/// Clients may send a `"min-max"` range or a single value. Two
/// dash-separated integers become an inclusive range; anything else is
/// bound as an opaque equality match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeFilter {
    Range(i64, i64),
    Exact(String),
}

impl AgeFilter {
    pub fn parse(raw: &str) -> AgeFilter {
        if let Some((min, max)) = raw.split_once('-') {
            if let (Ok(min), Ok(max)) = (min.trim().parse::<i64>(), max.trim().parse::<i64>()) {
                return AgeFilter::Range(min, max);
            }
        }
        AgeFilter::Exact(raw.to_string())
    }
}

impl RecordFilter {
    /// Build from the raw query-string parameters of `GET /api/plfs/data`.
    pub fn from_params(
        occupation: Option<String>,
        gender: Option<String>,
        age: Option<String>,
    ) -> RecordFilter {
        RecordFilter {
            occupation,
            gender,
            age: age.as_deref().map(AgeFilter::parse),
        }
    }

    /// The conjunction of clauses for the filters actually supplied, plus
    /// their bound parameters. `None` means no predicate (match all rows).
    pub fn predicate(&self) -> (Option<String>, Bindings) {
        let mut clauses: Vec<&str> = Vec::new();
        let mut bindings: Bindings = Vec::new();

        if let Some(occupation) = &self.occupation {
            clauses.push("Occupation = ?");
            bindings.push(SqlValue::Text(occupation.clone()));
        }
        if let Some(gender) = &self.gender {
            clauses.push("Gender = ?");
            bindings.push(SqlValue::Text(gender.clone()));
        }
        match &self.age {
            Some(AgeFilter::Range(min, max)) => {
                clauses.push("Age BETWEEN ? AND ?");
                bindings.push(SqlValue::Integer(*min));
                bindings.push(SqlValue::Integer(*max));
            }
            Some(AgeFilter::Exact(raw)) => {
                clauses.push("Age = ?");
                // Bind numerically when the value is a plain integer so the
                // INTEGER column compares by value, not text.
                match raw.parse::<i64>() {
                    Ok(age) => bindings.push(SqlValue::Integer(age)),
                    Err(_) => bindings.push(SqlValue::Text(raw.clone())),
                }
            }
            None => {}
        }

        if clauses.is_empty() {
            (None, bindings)
        } else {
            (Some(clauses.join(" AND ")), bindings)
        }
    }
}
