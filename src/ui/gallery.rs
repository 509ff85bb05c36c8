use iced::widget::{
    button, center, column, container, mouse_area, row, scrollable, text, Column, Space,
};
use iced::{Alignment, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use crate::state::data::PlantImage;
use crate::state::gallery::Gallery;
use crate::state::sort::SortCriterion;
use crate::Message;

const TILE_SIZE: f32 = 160.0;

/// Title bar: screen title, import and settings
fn top_bar<'a>(importing: bool) -> Element<'a, Message> {
    row![
        text("My Garden").size(28),
        Space::with_width(Length::Fill),
        button(text(if importing { "Importing..." } else { "Import Folder" }))
            .on_press_maybe((!importing).then_some(Message::ImportFolder))
            .padding(8),
        button(text("⚙").size(18))
            .on_press(Message::SettingsPressed)
            .style(button::text)
            .padding(8),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

/// "Sort" trigger and, when open, its two entries
fn sort_menu<'a>(open: bool) -> Element<'a, Message> {
    let trigger = button(text("Sort"))
        .on_press(Message::ToggleSortMenu)
        .padding(8);

    let mut menu: Column<'a, Message> = column![trigger].spacing(4);
    if open {
        let entries = SortCriterion::ALL
            .iter()
            .fold(column![].spacing(2), |col, criterion| {
                col.push(
                    button(text(criterion.label()))
                        .on_press(Message::SortBy(*criterion))
                        .style(button::text)
                        .width(Length::Fixed(180.0)),
                )
            });
        menu = menu.push(container(entries).padding(4).style(container::rounded_box));
    }
    menu.into()
}

fn tile(image: &PlantImage) -> Element<'_, Message> {
    let content = column![
        super::photo(image.thumbnail_source())
            .width(Length::Fixed(TILE_SIZE))
            .height(Length::Fixed(TILE_SIZE))
            .content_fit(ContentFit::Cover),
        text(image.name.as_str()).size(14),
    ]
    .spacing(6)
    .align_x(Alignment::Center);

    button(content)
        .on_press(Message::ThumbnailPressed(image.uri.clone()))
        .style(button::text)
        .padding(6)
        .into()
}

fn grid(images: &[PlantImage]) -> Element<'_, Message> {
    if images.is_empty() {
        return center(text("No plants saved yet. Import a folder to start your garden.").size(16))
            .into();
    }

    let tiles: Vec<Element<'_, Message>> = images.iter().map(tile).collect();
    scrollable(
        Wrap::with_elements(tiles)
            .spacing(Pixels(12.0))
            .line_spacing(Pixels(12.0)),
    )
    .height(Length::Fill)
    .width(Length::Fill)
    .into()
}

/// The gallery screen without overlays
pub fn view<'a>(gallery: &'a Gallery, status: &'a str, importing: bool) -> Element<'a, Message> {
    let screen = column![
        top_bar(importing),
        sort_menu(gallery.sort_menu_visible()),
        grid(gallery.images()),
        text(status).size(14),
    ]
    .spacing(16)
    .padding(24)
    .width(Length::Fill)
    .height(Length::Fill);

    // Buttons capture their own presses; any other click closes the open menu
    if gallery.sort_menu_visible() {
        mouse_area(screen).on_press(Message::CloseSortMenu).into()
    } else {
        screen.into()
    }
}
