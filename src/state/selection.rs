/// Category selection owned by the listing form
///
/// The selector never mutates this directly: it reads through
/// `is_selected` and the form applies toggles through `toggled`,
/// which returns a new selection instead of editing in place.

use std::collections::BTreeMap;

use super::data::{Category, CategoryId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),
}

/// Maps every fetched category ID to its checked state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    /// IDs in server order, so selected IDs come back in display order
    order: Vec<CategoryId>,
    checked: BTreeMap<CategoryId, bool>,
}

impl CategorySelection {
    /// One unchecked entry per fetched category
    pub fn for_categories(categories: &[Category]) -> Self {
        let mut order = Vec::with_capacity(categories.len());
        let mut checked = BTreeMap::new();

        for category in categories {
            // Duplicate IDs from the server collapse into a single entry
            if checked.insert(category.category_id.clone(), false).is_none() {
                order.push(category.category_id.clone());
            }
        }

        Self { order, checked }
    }

    /// Read accessor; unknown IDs read as unchecked
    pub fn is_selected(&self, id: &CategoryId) -> bool {
        self.checked.get(id).copied().unwrap_or(false)
    }

    /// Pure update: returns a copy with `id` set to `selected`
    pub fn toggled(&self, id: &CategoryId, selected: bool) -> Result<Self, SelectionError> {
        if !self.checked.contains_key(id) {
            return Err(SelectionError::UnknownCategory(id.clone()));
        }

        let mut next = self.clone();
        next.checked.insert(id.clone(), selected);
        Ok(next)
    }

    /// Checked IDs in server order
    pub fn selected_ids(&self) -> Vec<CategoryId> {
        self.order
            .iter()
            .filter(|id| self.is_selected(id))
            .cloned()
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.checked.values().filter(|checked| **checked).count()
    }
}
