use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A product that is announced but not yet on sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingProduct {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
    pub release_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUpcomingProduct {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
    pub release_date: NaiveDate,
}
