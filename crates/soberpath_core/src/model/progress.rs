//! Client progress notes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated progress comment for a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub client_id: u32,
    pub date: NaiveDate,
    pub comment: String,
}
