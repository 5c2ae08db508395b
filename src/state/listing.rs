/// Listing fields as typed into the form, and their conversion
/// into a create request

use super::selection::CategorySelection;
use crate::api::products::CreateProductRequest;

/// Which text input an edit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Content,
    BaseFee,
    FeePerDay,
    OverdueFee,
    MinimumRentalPeriod,
}

impl DraftField {
    pub fn label(self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Content => "Description",
            DraftField::BaseFee => "Base fee",
            DraftField::FeePerDay => "Fee per day",
            DraftField::OverdueFee => "Overdue fee per day",
            DraftField::MinimumRentalPeriod => "Minimum rental period (days)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Title is required")]
    MissingTitle,
    #[error("{} must be a whole number of 0 or more", .0.label())]
    InvalidNumber(DraftField),
    #[error("Pick at least one category")]
    NoCategories,
}

/// Raw text of every listing input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDraft {
    pub title: String,
    pub content: String,
    pub base_fee: String,
    pub fee_per_day: String,
    pub overdue_fee: String,
    pub minimum_rental_period: String,
}

impl ListingDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Content => &self.content,
            DraftField::BaseFee => &self.base_fee,
            DraftField::FeePerDay => &self.fee_per_day,
            DraftField::OverdueFee => &self.overdue_fee,
            DraftField::MinimumRentalPeriod => &self.minimum_rental_period,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Title => &mut self.title,
            DraftField::Content => &mut self.content,
            DraftField::BaseFee => &mut self.base_fee,
            DraftField::FeePerDay => &mut self.fee_per_day,
            DraftField::OverdueFee => &mut self.overdue_fee,
            DraftField::MinimumRentalPeriod => &mut self.minimum_rental_period,
        };
        *slot = value;
    }

    /// Validate the draft and build the request body.
    /// Category IDs come out in server order.
    pub fn to_request(&self, selection: &CategorySelection) -> Result<CreateProductRequest, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingTitle);
        }

        let base_fee = self.number(DraftField::BaseFee)?;
        let fee_per_day = self.number(DraftField::FeePerDay)?;
        let overdue_fee = self.number(DraftField::OverdueFee)?;
        let minimum_rental_period = self.number(DraftField::MinimumRentalPeriod)?;

        let category_ids = selection.selected_ids();
        if category_ids.is_empty() {
            return Err(DraftError::NoCategories);
        }

        Ok(CreateProductRequest {
            title: title.to_string(),
            content: self.content.trim().to_string(),
            base_fee,
            fee_per_day,
            overdue_fee,
            minimum_rental_period,
            category_ids,
        })
    }

    fn number(&self, field: DraftField) -> Result<u32, DraftError> {
        self.get(field)
            .trim()
            .parse::<u32>()
            .map_err(|_| DraftError::InvalidNumber(field))
    }
}
