use iced::widget::{checkbox, column, text, Column};
use iced::Element;

use crate::state::categories::{category_rows, CategoryState, CategoryView};
use crate::state::selection::CategorySelection;
use crate::Message;

/// One checkbox per fetched category, or a single placeholder while
/// loading or after a failed fetch
pub fn view<'a>(state: &CategoryState, selection: &CategorySelection) -> Element<'a, Message> {
    match category_rows(state, selection) {
        CategoryView::Loading => text("Loading categories...").size(14).into(),
        CategoryView::Error(message) => column![
            text("Could not load categories.").size(14),
            text(message).size(12),
        ]
        .spacing(4)
        .into(),
        CategoryView::Rows(rows) => {
            let rows = rows.into_iter().map(|row| -> Element<'a, Message> {
                let id = row.id;
                checkbox(row.label, row.checked)
                    .on_toggle(move |checked| Message::CategoryToggled(id.clone(), checked))
                    .into()
            });

            Column::with_children(rows).spacing(8).into()
        }
    }
}
