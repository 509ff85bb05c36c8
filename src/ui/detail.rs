/// Detail modal: full photo, plant facts, close and delete
use iced::widget::{button, column, container, mouse_area, row, scrollable, text, Space};
use iced::{Alignment, ContentFit, Element, Length, Padding, Task};

use super::gesture::{ScrollRegion, SwipeDismiss, SwipeOutcome};
use crate::state::data::PlantImage;
use crate::state::gallery::DismissReason;
use crate::Message;

const SHEET_WIDTH: f32 = 520.0;
const SHEET_HEIGHT: f32 = 620.0;
/// Distance from the window top to the sheet at rest
const SHEET_TOP: f32 = 48.0;

fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("plant-details")
}

/// Scroll and swipe state owned by the modal, separate from the gallery
#[derive(Debug, Clone)]
pub struct DetailModal {
    scroll: ScrollRegion,
    swipe: SwipeDismiss,
    /// Last pointer height in window coordinates
    cursor_y: f32,
}

impl DetailModal {
    pub fn new(swipe_threshold: f32, scroll_offset_max: f32) -> Self {
        Self {
            scroll: ScrollRegion::default(),
            swipe: SwipeDismiss::new(swipe_threshold, scroll_offset_max),
            cursor_y: 0.0,
        }
    }

    /// Forget scroll position and any drag in progress
    pub fn reset(&mut self) {
        self.scroll.reset();
        self.swipe.cancel();
    }

    pub fn on_scrolled(&mut self, offset: f32) {
        self.scroll.on_scrolled(offset);
    }

    /// Track the pointer; while dragging this moves the sheet or its content
    pub fn cursor_moved(&mut self, y: f32) -> Task<Message> {
        self.cursor_y = y;
        if !self.swipe.is_dragging() {
            return Task::none();
        }

        self.swipe.drag_to(y, &mut self.scroll);
        match self.scroll.take_request() {
            Some(offset) => {
                scrollable::scroll_to(scroll_id(), scrollable::AbsoluteOffset { x: 0.0, y: offset })
            }
            None => Task::none(),
        }
    }

    pub fn press(&mut self) {
        self.swipe.begin(self.cursor_y);
    }

    pub fn release(&mut self) -> SwipeOutcome {
        self.swipe.release()
    }

    /// Where the sheet's top edge sits; follows the pointer while swiping
    pub fn sheet_top(&self) -> f32 {
        SHEET_TOP + self.swipe.translation()
    }

    pub fn view<'a>(&'a self, plant: &'a PlantImage, deleting: bool) -> Element<'a, Message> {
        let facts = plant
            .detail_lines()
            .into_iter()
            .fold(column![].spacing(6), |col, line| {
                col.push(text(format!("{}: {}", line.label, line.value)).size(16))
            });

        let content = column![
            super::photo(&plant.uri)
                .width(Length::Fill)
                .height(Length::Fixed(320.0))
                .content_fit(ContentFit::Cover),
            facts,
        ]
        .spacing(16)
        .padding(Padding {
            right: 12.0,
            ..Padding::ZERO
        });

        let body = scrollable(content)
            .id(scroll_id())
            .on_scroll(|viewport| Message::DetailScrolled(viewport.absolute_offset().y))
            .height(Length::Fill);

        let delete_label = if deleting { "Deleting..." } else { "Delete" };
        let actions = row![
            button(text("Close"))
                .on_press(Message::CloseModal(DismissReason::CloseButton))
                .style(button::secondary)
                .padding(10),
            Space::with_width(Length::Fill),
            button(text(delete_label))
                .on_press_maybe((!deleting).then_some(Message::DeletePressed))
                .style(button::danger)
                .padding(10),
        ]
        .align_y(Alignment::Center);

        let sheet = container(column![body, actions].spacing(16))
            .padding(20)
            .width(Length::Fixed(SHEET_WIDTH))
            .height(Length::Fixed(SHEET_HEIGHT))
            .style(container::rounded_box);

        // Pressing anywhere on the sheet that isn't a button starts a swipe
        mouse_area(sheet).on_press(Message::SwipeStarted).into()
    }
}

/// The Cancel / Delete confirmation shown before deleting
pub fn confirm_dialog<'a>() -> Element<'a, Message> {
    let actions = row![
        button(text("Cancel"))
            .on_press(Message::DeleteCancelled)
            .style(button::secondary)
            .padding(10),
        button(text("Delete"))
            .on_press(Message::DeleteConfirmed)
            .style(button::danger)
            .padding(10),
    ]
    .spacing(12);

    container(
        column![
            text("Delete Image").size(20),
            text("Are you sure you want to delete this image?").size(16),
            actions,
        ]
        .spacing(16)
        .align_x(Alignment::End),
    )
    .padding(24)
    .width(Length::Fixed(380.0))
    .style(container::rounded_box)
    .into()
}
