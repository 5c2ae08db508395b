use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Element, Length};

use super::{category_selector, upload_images};
use crate::state::form::ListingForm;
use crate::state::listing::DraftField;
use crate::Message;

/// The whole "new listing" screen
pub fn view(form: &ListingForm) -> Element<'_, Message> {
    let fields = [
        DraftField::Title,
        DraftField::Content,
        DraftField::BaseFee,
        DraftField::FeePerDay,
        DraftField::OverdueFee,
        DraftField::MinimumRentalPeriod,
    ]
    .into_iter()
    .map(|field| input(form, field));

    let submit_label = if form.submitting { "Posting..." } else { "Post listing" };

    let mut content = fields
        .fold(column![text("New listing").size(32)], |col, field| col.push(field))
        .push(text(format!("Categories ({} selected)", form.selection().selected_count())).size(18))
        .push(category_selector::view(form.categories(), form.selection()))
        .push(text("Photos").size(18))
        .push(upload_images::view(&form.uploads))
        .spacing(16)
        .padding(32)
        .max_width(720.0);

    if let Some(error) = &form.error {
        content = content.push(text(error).size(14).color([0.9, 0.3, 0.3]));
    }

    content = content.push(
        row![
            button("Cancel").on_press(Message::CancelListing).padding(10),
            button(submit_label)
                .on_press_maybe((!form.submitting).then_some(Message::Submit))
                .padding(10),
        ]
        .spacing(12),
    );

    let page: Element<'_, Message> = container(scrollable(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .into();

    if form.uploads.overflow() {
        upload_images::overflow_modal(page, form.uploads.max())
    } else {
        page
    }
}

fn input(form: &ListingForm, field: DraftField) -> Element<'_, Message> {
    column![
        text(field.label()).size(14),
        text_input(field.label(), form.draft.get(field))
            .on_input(move |value| Message::DraftEdited(field, value))
            .padding(8),
    ]
    .spacing(4)
    .into()
}
