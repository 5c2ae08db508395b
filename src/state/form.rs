/// State of one mounted listing form
///
/// The form is the parent of both components: it owns the category
/// selection and the upload batch. Dropping the form releases every
/// staged preview.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::categories::CategoryState;
use super::data::{Category, CategoryId};
use super::listing::{DraftError, ListingDraft};
use super::selection::{CategorySelection, SelectionError};
use super::uploads::UploadBatch;
use crate::api::cache::{QueryCache, QueryKey};
use crate::api::products::CreateProductRequest;

#[derive(Debug)]
pub struct ListingForm {
    /// Distinguishes this mount from earlier ones so stale
    /// responses can be told apart
    generation: u64,
    categories: CategoryState,
    selection: CategorySelection,
    pub uploads: UploadBatch,
    pub draft: ListingDraft,
    pub submitting: bool,
    /// Last validation or submit error, shown under the form
    pub error: Option<String>,
}

impl ListingForm {
    /// Mount a new form. Categories come straight from the cache when
    /// it has them; otherwise the form starts out loading.
    pub fn mount(generation: u64, cache: &QueryCache<Vec<Category>>) -> Self {
        let mut form = ListingForm {
            generation,
            categories: CategoryState::Loading,
            selection: CategorySelection::default(),
            uploads: UploadBatch::new(),
            draft: ListingDraft::default(),
            submitting: false,
            error: None,
        };

        match cache.get(QueryKey::Categories) {
            Some(categories) => {
                debug!(generation, "categories served from cache");
                form.load(categories);
            }
            None => info!(generation, "mounted listing form, fetching categories"),
        }

        form
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True until the category list has been resolved one way or the other
    pub fn needs_categories(&self) -> bool {
        self.categories.is_loading()
    }

    pub fn categories(&self) -> &CategoryState {
        &self.categories
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    /// Apply the outcome of this mount's category fetch.
    /// Ignored unless the form is still loading.
    pub fn categories_resolved(&mut self, result: Result<Arc<Vec<Category>>, String>) {
        if !self.categories.is_loading() {
            return;
        }

        match result {
            Ok(categories) => self.load(categories),
            Err(message) => {
                warn!(generation = self.generation, error = %message, "category fetch failed");
                self.categories = CategoryState::Failed(message);
            }
        }
    }

    fn load(&mut self, categories: Arc<Vec<Category>>) {
        self.selection = CategorySelection::for_categories(&categories);
        self.categories = CategoryState::Loaded(categories);
    }

    pub fn toggle_category(&mut self, id: &CategoryId, selected: bool) -> Result<(), SelectionError> {
        self.selection = self.selection.toggled(id, selected)?;
        Ok(())
    }

    /// Validate the form into a request body
    pub fn request(&self) -> Result<CreateProductRequest, DraftError> {
        self.draft.to_request(&self.selection)
    }
}
