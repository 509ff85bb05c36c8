/// Widgets and view helpers for the garden screen

pub mod detail;
pub mod gallery;
pub mod gesture;
pub mod toast;

use iced::alignment::Horizontal;
use iced::widget::image::{Handle, Image};
use iced::widget::{center, container, image, mouse_area, opaque, stack, Container};
use iced::{Color, Element, Length, Padding};

/// A photo widget loaded from a file path
pub fn photo(path: &str) -> Image<Handle> {
    image(Handle::from_path(path))
}

/// Lay `content` over `base` with a dimmed backdrop.
/// Clicking the backdrop emits `on_blur`.
pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    overlay(base, center(opaque(content)), on_blur)
}

/// Like `modal`, but the content hangs from the top edge, `top` pixels down,
/// so changes to `top` move it by exactly that much.
pub fn sheet<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    top: f32,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let layer = container(opaque(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .padding(Padding {
            top,
            ..Padding::ZERO
        });

    overlay(base, layer, on_blur)
}

fn overlay<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    layer: Container<'a, Message>,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    stack![
        base.into(),
        opaque(
            mouse_area(layer.style(|_theme: &iced::Theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.75,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
