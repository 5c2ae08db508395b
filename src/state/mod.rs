/// State management module
/// 
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Category load state and selector rows (categories.rs)
/// - Parent-owned category selection (selection.rs)
/// - Staged image attachments (uploads.rs)
/// - Listing fields and validation (listing.rs)
/// - One mounted listing form (form.rs)

pub mod categories;
pub mod data;
pub mod form;
pub mod listing;
pub mod selection;
pub mod uploads;
