use serde::{Deserialize, Serialize};

/// Contact-form submission. Fields default to empty so a missing field and an
/// empty field fail the same presence check.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
}
