/// Load state of the category list and the rows the selector renders

use std::sync::Arc;

use super::data::{Category, CategoryId};
use super::selection::CategorySelection;

/// The three states a mounted category selector can be in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryState {
    /// Request in flight
    Loading,
    /// Request failed; terminal for this mount (no retry)
    Failed(String),
    /// Categories in server order
    Loaded(Arc<Vec<Category>>),
}

impl CategoryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CategoryState::Loading)
    }
}

/// One checkbox row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxRow {
    pub id: CategoryId,
    pub label: String,
    pub checked: bool,
}

/// What the selector shows; exactly one of the three
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryView {
    Loading,
    Error(String),
    Rows(Vec<CheckboxRow>),
}

/// Derive the selector contents from the load state and the parent's selection
pub fn category_rows(state: &CategoryState, selection: &CategorySelection) -> CategoryView {
    match state {
        CategoryState::Loading => CategoryView::Loading,
        CategoryState::Failed(message) => CategoryView::Error(message.clone()),
        CategoryState::Loaded(categories) => CategoryView::Rows(
            categories
                .iter()
                .map(|category| CheckboxRow {
                    id: category.category_id.clone(),
                    label: category.title.clone(),
                    checked: selection.is_selected(&category.category_id),
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(count: usize) -> Vec<Category> {
        (0..count)
            .map(|i| Category {
                category_id: CategoryId::new(format!("cat-{i}")),
                title: format!("Category {i}"),
            })
            .collect()
    }

    #[test]
    fn test_loaded_renders_one_row_per_category() {
        for count in [0, 1, 7] {
            let categories = sample(count);
            let selection = CategorySelection::for_categories(&categories);
            let state = CategoryState::Loaded(Arc::new(categories.clone()));

            let CategoryView::Rows(rows) = category_rows(&state, &selection) else {
                panic!("expected rows");
            };

            assert_eq!(rows.len(), categories.len());
            for (row, category) in rows.iter().zip(&categories) {
                assert_eq!(row.label, category.title);
                assert_eq!(row.id, category.category_id);
                assert!(!row.checked);
            }
        }
    }

    #[test]
    fn test_rows_reflect_selection() {
        let categories = sample(3);
        let selection = CategorySelection::for_categories(&categories)
            .toggled(&CategoryId::new("cat-1"), true)
            .unwrap();
        let state = CategoryState::Loaded(Arc::new(categories));

        let CategoryView::Rows(rows) = category_rows(&state, &selection) else {
            panic!("expected rows");
        };

        let checked: Vec<bool> = rows.iter().map(|row| row.checked).collect();
        assert_eq!(checked, vec![false, true, false]);
    }

    #[test]
    fn test_failure_renders_only_error() {
        let state = CategoryState::Failed("connection refused".to_string());
        let view = category_rows(&state, &CategorySelection::default());

        assert_eq!(view, CategoryView::Error("connection refused".to_string()));
    }

    #[test]
    fn test_loading_renders_only_placeholder() {
        let view = category_rows(&CategoryState::Loading, &CategorySelection::default());
        assert_eq!(view, CategoryView::Loading);
    }
}
