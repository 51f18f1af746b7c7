/// Browse category
use crate::types::CategoryId;
use serde::{Deserialize, Serialize};

/// Category listed on the browse page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Record identifier
    pub id: CategoryId,
    /// URL-safe key, also used as the search term
    pub slug: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

impl Category {
    /// Display name, falling back to the slug
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.slug
        } else {
            &self.name
        }
    }
}
