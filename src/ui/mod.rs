/// Widgets for the listing form
///
/// Views are plain functions from state to `Element`; every
/// interaction comes back to `ListingEditor::update` as a `Message`.

pub mod category_selector;
pub mod listing_form;
pub mod upload_images;
