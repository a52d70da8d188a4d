//! Domain models for the catalog.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A product category (hierarchical via parent_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for creating a new category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub parent_id: Option<String>,
    pub name: String,
    /// Derived from the name when absent
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// A category together with its sub-categories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

/// A named bundle of specification labels (e.g. "Display": size, resolution)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecGroup {
    pub id: String,
    pub title: String,
    pub specs: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for creating a new specification group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpecGroup {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub specs: Vec<String>,
}

/// Link between a category and one of its own specification groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpecGroup {
    pub category_id: String,
    pub spec_group_id: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// One step of the walk up the category tree: the groups a category owns
/// directly, plus the id of the category to visit next.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpecLevel {
    pub category_id: String,
    pub parent_id: Option<String>,
    pub spec_groups: Vec<SpecGroup>,
}
