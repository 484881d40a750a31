//! Address types

use serde::{Deserialize, Serialize};

/// A persisted address row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "addressid")]
    pub id: String,
    /// Owning customer. Nullable at the schema level.
    #[serde(rename = "customerid")]
    pub customer_id: Option<String>,
    #[serde(rename = "addressline")]
    pub address_line: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "pincode")]
    pub pin_code: String,
}

/// Address update request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressUpdate {
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
}
