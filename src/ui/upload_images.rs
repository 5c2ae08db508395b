use iced::widget::{button, center, column, container, image, opaque, stack, text};
use iced::{Alignment, Color, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::uploads::{StagedImage, UploadBatch};
use crate::Message;

const TILE_SIZE: f32 = 96.0;

/// Picker button with the `n/max` counter, followed by one tile per staged image
pub fn view<'a>(batch: &'a UploadBatch) -> Element<'a, Message> {
    let picker = button(
        column![
            text("+").size(28),
            text(format!("{}/{}", batch.len(), batch.max())).size(12),
        ]
        .align_x(Alignment::Center),
    )
    .on_press(Message::PickImages)
    .width(Length::Fixed(TILE_SIZE))
    .height(Length::Fixed(TILE_SIZE));

    let mut tiles: Vec<Element<'a, Message>> = Vec::with_capacity(batch.len() + 1);
    tiles.push(container(picker).padding(4).into());
    tiles.extend(
        batch
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| -> Element<'a, Message> { container(tile(index, entry)).padding(4).into() }),
    );

    Wrap::with_elements(tiles).into()
}

fn tile(index: usize, entry: &StagedImage) -> Element<'_, Message> {
    let preview: Element<'_, Message> = match entry.preview.image() {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(TILE_SIZE))
            .height(Length::Fixed(TILE_SIZE))
            .content_fit(ContentFit::Cover)
            .into(),
        // Not rendered yet, or not an image we can decode
        None => container(text(&entry.file.name).size(11))
            .center_x(Length::Fixed(TILE_SIZE))
            .center_y(Length::Fixed(TILE_SIZE))
            .style(container::bordered_box)
            .into(),
    };

    column![
        preview,
        button(text("Remove").size(11))
            .on_press(Message::RemoveImage(index))
            .width(Length::Fixed(TILE_SIZE)),
    ]
    .spacing(4)
    .into()
}

/// Lay the "too many images" dialog over `base`.
/// Only the close button dismisses it.
pub fn overflow_modal<'a>(base: Element<'a, Message>, max: usize) -> Element<'a, Message> {
    let dialog = container(
        column![
            text("!").size(32),
            text(format!("You can attach up to {max} images.")).size(18),
            button(text("Close")).on_press(Message::DismissOverflow).padding([8, 24]),
        ]
        .spacing(16)
        .align_x(Alignment::Center),
    )
    .padding(24)
    .style(container::rounded_box);

    stack![
        base,
        opaque(center(opaque(dialog)).style(|_theme| container::Style {
            background: Some(
                Color {
                    a: 0.7,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        })),
    ]
    .into()
}
