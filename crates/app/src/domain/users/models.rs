//! User Models

/// User Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub fullname: String,
    pub phone: Option<String>,
    pub address: Address,
}

/// Shipping address, flattened from the ward/district/province hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub line: Option<String>,
    pub ward: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
}
