//! Site Configuration Model

use serde::{Deserialize, Serialize};

/// A single site configuration entry (logo, phone, address, socials, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SiteConfig {
    pub key: String,
    pub value: String,
    /// Classification tag: "text" | "url" | "image". Informational only,
    /// no validation is enforced against it.
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub value_type: String,
}

/// Upsert payload; value and type are always supplied together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfigUpsert {
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default = "default_type")]
    pub value_type: String,
}

fn default_type() -> String {
    "text".to_string()
}
