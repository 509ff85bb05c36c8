//! Toast notifications shown in the bottom-right corner.
//!
//! Info and success toasts expire on their own; errors stay until dismissed.

use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Color, Element, Length};
use std::time::{Duration, Instant};

const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn color(&self) -> Color {
        match self {
            Severity::Info => Color::from_rgb8(0x3b, 0x82, 0xf6),
            Severity::Success => Color::from_rgb8(0x22, 0xc5, 0x5e),
            Severity::Error => Color::from_rgb8(0xef, 0x44, 0x44),
        }
    }

    fn lifetime(&self) -> Option<Duration> {
        match self {
            Severity::Info | Severity::Success => Some(Duration::from_secs(3)),
            Severity::Error => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    id: u64,
    severity: Severity,
    message: String,
    created_at: Instant,
}

impl Toast {
    fn expired(&self, now: Instant) -> bool {
        self.severity
            .lifetime()
            .is_some_and(|lifetime| now.duration_since(self.created_at) >= lifetime)
    }
}

#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.push_at(severity, message, Instant::now());
    }

    fn push_at(&mut self, severity: Severity, message: impl Into<String>, now: Instant) {
        let toast = Toast {
            id: self.next_id,
            severity,
            message: message.into(),
            created_at: now,
        };
        self.next_id += 1;
        self.items.push(toast);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Severity::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    /// Drop expired toasts
    pub fn tick(&mut self, now: Instant) {
        self.items.retain(|t| !t.expired(now));
    }

    /// Whether anything is waiting to expire (drives the tick subscription)
    pub fn needs_tick(&self) -> bool {
        self.items.iter().any(|t| t.severity.lifetime().is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Newest toasts, at most `MAX_VISIBLE`
    fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter().rev().take(MAX_VISIBLE)
    }

    pub fn view<'a, Message: Clone + 'a>(
        &'a self,
        on_dismiss: impl Fn(u64) -> Message + 'a,
    ) -> Element<'a, Message> {
        let stack: Column<'a, Message> = self
            .visible()
            .fold(column![].spacing(8), |col, toast| {
                let accent = toast.severity.color();
                let body = row![
                    text(toast.message.as_str()).size(14).width(Length::Fill),
                    button(text("✕").size(12))
                        .on_press(on_dismiss(toast.id))
                        .style(button::text),
                ]
                .spacing(8)
                .align_y(Alignment::Center);

                col.push(
                    container(body)
                        .padding(10)
                        .width(Length::Fixed(320.0))
                        .style(move |theme: &iced::Theme| {
                            let base = container::rounded_box(theme);
                            container::Style {
                                border: iced::Border {
                                    color: accent,
                                    width: 2.0,
                                    radius: 6.0.into(),
                                },
                                ..base
                            }
                        }),
                )
            });

        container(stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(16)
            .align_x(Alignment::End)
            .align_y(Alignment::End)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_expires_error_stays() {
        let mut toasts = Toasts::default();
        let start = Instant::now();
        toasts.push_at(Severity::Info, "Settings button pressed", start);
        toasts.push_at(Severity::Error, "Could not delete", start);
        assert!(toasts.needs_tick());

        toasts.tick(start + Duration::from_secs(1));
        assert_eq!(toasts.items.len(), 2);

        toasts.tick(start + Duration::from_secs(4));
        assert_eq!(toasts.items.len(), 1);
        assert_eq!(toasts.items[0].severity, Severity::Error);
        assert!(!toasts.needs_tick());
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut toasts = Toasts::default();
        toasts.error("one");
        toasts.error("two");
        let first = toasts.items[0].id;

        toasts.dismiss(first);
        assert_eq!(toasts.items.len(), 1);
        assert_eq!(toasts.items[0].message, "two");
    }

    #[test]
    fn test_only_newest_are_visible() {
        let mut toasts = Toasts::default();
        for i in 0..5 {
            toasts.error(format!("error {i}"));
        }
        let shown: Vec<&str> = toasts.visible().map(|t| t.message.as_str()).collect();
        assert_eq!(shown, vec!["error 4", "error 3", "error 2"]);
    }
}
