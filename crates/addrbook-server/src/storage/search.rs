//! Conditional customer search statement

use addrbook_types::CustomerSearch;

pub(crate) const CUSTOMER_COLUMNS: &str = "CustomerID AS id, FirstName AS first_name, \
     LastName AS last_name, PhoneNumber AS phone_number, City AS city, State AS state, \
     PinCode AS pin_code";

/// A customer SELECT with one `AND <column> = ?n` condition per supplied
/// filter. Column names come from a fixed set; caller values are only ever
/// bound, never spliced into the SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerQuery {
    sql: String,
    params: Vec<String>,
}

impl CustomerQuery {
    pub fn search(search: &CustomerSearch) -> Self {
        let mut sql = format!("SELECT {} FROM Customers WHERE 1=1", CUSTOMER_COLUMNS);
        let mut params = Vec::new();

        for (column, value) in search.filters() {
            params.push(value.to_string());
            sql.push_str(&format!(" AND {} = ?{}", column, params.len()));
        }

        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}
