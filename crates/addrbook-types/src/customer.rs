//! Customer types

use serde::{Deserialize, Serialize};

/// A persisted customer row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "customerid")]
    pub id: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    #[serde(rename = "phonenumber")]
    pub phone_number: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "pincode")]
    pub pin_code: String,
}

/// Customer projection returned by the address-count aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    #[serde(rename = "customerid")]
    pub id: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
}

/// Customer creation request
///
/// Fields are not validated here; a missing field is stored as NULL and
/// rejected by the table's NOT NULL constraints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewCustomer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
}

/// Customer update request. Only the name and phone columns are writable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Exact-match customer search filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerSearch {
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
}

impl CustomerSearch {
    /// Supplied filters as `(column, value)` pairs, in City, State, PinCode order.
    /// Empty values count as not supplied.
    pub fn filters(&self) -> Vec<(&'static str, &str)> {
        [
            ("City", self.city.as_deref()),
            ("State", self.state.as_deref()),
            ("PinCode", self.pin_code.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| match value {
            Some(v) if !v.is_empty() => Some((column, v)),
            _ => None,
        })
        .collect()
    }
}
