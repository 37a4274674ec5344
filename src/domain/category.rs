//! Category Entities
//!
//! Product categories form a tree through `parent`; `0` marks a root.

use serde::{Deserialize, Serialize};

pub type CategoryId = u32;

/// Parent id used by root categories
pub const ROOT_CATEGORY: CategoryId = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent: CategoryId,
    /// Number of products in the category
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_id: Option<u32>,
}

impl Category {
    pub fn new(id: CategoryId, name: &str, slug: &str, parent: CategoryId) -> Self {
        Self {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            parent,
            count: 0,
            description: String::new(),
            thumbnail_id: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent == ROOT_CATEGORY
    }
}

/// Product as listed in a category page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntry {
    pub id: u32,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
}
