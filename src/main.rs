use iced::event::{self, Event};
use iced::keyboard::{self, key::Named, Key};
use iced::widget::stack;
use iced::{mouse, time, window, Element, Point, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod error;
mod media;
mod settings;
mod state;
mod ui;

use media::import::{import_folder_async, ImportResult};
use settings::Settings;
use state::data::PlantImage;
use state::gallery::{DeleteEffect, DismissReason, Gallery};
use state::library::{self, Library};
use state::sort::SortCriterion;
use ui::detail::DetailModal;
use ui::gesture::SwipeOutcome;
use ui::toast::Toasts;

/// Main application state
struct Garden {
    settings: Settings,
    /// Catalog location; None if the catalog could not be opened
    db_path: Option<PathBuf>,
    gallery: Gallery,
    detail: DetailModal,
    toasts: Toasts,
    /// Status message to display to the user
    status: String,
    importing: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The window regained focus: reload the garden
    FocusGained,
    ImagesLoaded(Result<Vec<PlantImage>, String>),
    SettingsPressed,
    ToggleSortMenu,
    /// Click outside the open sort menu
    CloseSortMenu,
    SortBy(SortCriterion),
    /// A thumbnail was tapped (carries its uri)
    ThumbnailPressed(String),
    CloseModal(DismissReason),
    EscapePressed,
    DetailScrolled(f32),
    CursorMoved(Point),
    SwipeStarted,
    SwipeReleased,
    DeletePressed,
    DeleteCancelled,
    DeleteConfirmed,
    /// Store answered a delete: uri and whether a row existed
    DeleteFinished(String, Result<bool, String>),
    /// User clicked the "Import Folder" button
    ImportFolder,
    ImportComplete(Result<ImportResult, String>),
    Tick(time::Instant),
    DismissToast(u64),
}

impl Garden {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = settings::load();
        let mut toasts = Toasts::default();

        let opened = settings
            .database_path
            .clone()
            .map_or_else(Library::new, Library::open);

        let (db_path, status) = match opened {
            Ok(library) => {
                let count = library.image_count().unwrap_or(0);
                tracing::info!("🌱 My Garden initialized with {} plants", count);
                (Some(library.path().clone()), "Loading your garden...".to_string())
            }
            Err(e) => {
                tracing::error!("❌ Could not open the plant catalog: {}", e);
                toasts.error(format!("Could not open the plant catalog: {e}"));
                (None, "Plant catalog unavailable.".to_string())
            }
        };

        let detail = DetailModal::new(settings.swipe_threshold, settings.scroll_offset_max);
        let garden = Garden {
            settings,
            db_path,
            gallery: Gallery::new(),
            detail,
            toasts,
            status,
            importing: false,
        };
        let task = garden.reload();

        (garden, task)
    }

    /// Fetch the full list again; the result replaces what we show
    fn reload(&self) -> Task<Message> {
        match &self.db_path {
            Some(db_path) => Task::perform(library::load_images(db_path.clone()), |result| {
                Message::ImagesLoaded(result.map_err(|e| e.to_string()))
            }),
            None => Task::none(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FocusGained => return self.reload(),
            Message::ImagesLoaded(Ok(images)) => {
                self.status = format!("{} plants in your garden.", images.len());
                self.gallery.replace_images(images);
            }
            Message::ImagesLoaded(Err(e)) => {
                tracing::error!("❌ Loading the garden failed: {}", e);
                self.toasts.error(format!("Could not load your garden: {e}"));
            }
            Message::SettingsPressed => {
                self.toasts.info("Settings button pressed");
            }
            Message::ToggleSortMenu => self.gallery.toggle_sort_menu(),
            Message::CloseSortMenu => self.gallery.close_sort_menu(),
            Message::SortBy(criterion) => self.gallery.sort_by(criterion),
            Message::ThumbnailPressed(uri) => {
                if self.gallery.select(&uri) {
                    self.detail.reset();
                }
            }
            Message::CloseModal(reason) => self.close_modal(reason),
            Message::EscapePressed => {
                if self.gallery.confirm_visible() {
                    self.gallery.cancel_delete();
                } else if self.gallery.modal_visible() {
                    self.close_modal(DismissReason::Escape);
                } else {
                    self.gallery.close_sort_menu();
                }
            }
            Message::DetailScrolled(offset) => self.detail.on_scrolled(offset),
            Message::CursorMoved(position) => return self.detail.cursor_moved(position.y),
            Message::SwipeStarted => {
                if self.gallery.modal_visible() && !self.gallery.confirm_visible() {
                    self.detail.press();
                }
            }
            Message::SwipeReleased => {
                if self.detail.release() == SwipeOutcome::Dismissed {
                    self.close_modal(DismissReason::Swipe);
                }
            }
            Message::DeletePressed => {
                self.gallery.request_delete();
            }
            Message::DeleteCancelled => self.gallery.cancel_delete(),
            Message::DeleteConfirmed => return self.start_delete(),
            Message::DeleteFinished(uri, result) => self.finish_delete(uri, result),
            Message::ImportFolder => return self.start_import(),
            Message::ImportComplete(result) => {
                self.importing = false;
                match result {
                    Ok(result) => {
                        self.status = format!(
                            "Import complete! Added {} plants, skipped {} duplicates.",
                            result.imported_count, result.skipped_count
                        );
                        self.toasts.success(self.status.clone());
                        return self.reload();
                    }
                    Err(e) => {
                        tracing::error!("❌ Import failed: {}", e);
                        self.status = "Import failed.".to_string();
                        self.toasts.error(format!("Import failed: {e}"));
                    }
                }
            }
            Message::Tick(now) => self.toasts.tick(now),
            Message::DismissToast(id) => self.toasts.dismiss(id),
        }

        Task::none()
    }

    fn close_modal(&mut self, reason: DismissReason) {
        self.gallery.close_modal(reason);
        self.detail.reset();
    }

    fn start_delete(&mut self) -> Task<Message> {
        let Some(uri) = self.gallery.confirm_delete() else {
            return Task::none();
        };

        match &self.db_path {
            Some(db_path) => {
                let key = uri.clone();
                Task::perform(library::remove_image(db_path.clone(), uri), move |result| {
                    Message::DeleteFinished(key.clone(), result.map_err(|e| e.to_string()))
                })
            }
            None => {
                self.finish_delete(uri, Err("plant catalog unavailable".to_string()));
                Task::none()
            }
        }
    }

    fn finish_delete(&mut self, uri: String, result: Result<bool, String>) {
        if let Ok(false) = result {
            tracing::warn!("⚠️  {} was already gone from the catalog", uri);
        }

        match self.gallery.finish_delete(&uri, result.map(|_| ())) {
            DeleteEffect::Removed => {
                tracing::info!("🗑️  Deleted {}", uri);
                if !self.gallery.modal_visible() {
                    self.detail.reset();
                }
                self.status = format!("{} plants in your garden.", self.gallery.images().len());
            }
            DeleteEffect::Kept(reason) => {
                tracing::error!("❌ Deleting {} failed: {}", uri, reason);
                self.toasts.error(format!("Could not delete image: {reason}"));
            }
            DeleteEffect::Stale => {}
        }
    }

    fn start_import(&mut self) -> Task<Message> {
        let Some(db_path) = self.db_path.clone() else {
            self.toasts.error("Plant catalog unavailable");
            return Task::none();
        };
        let thumbnail_dir = match self.settings.thumbnail_dir() {
            Ok(dir) => dir,
            Err(e) => {
                self.toasts.error(e.to_string());
                return Task::none();
            }
        };

        // Show the native folder picker dialog
        let Some(folder) = FileDialog::new()
            .set_title("Select Folder with Plant Photos")
            .pick_folder()
        else {
            return Task::none();
        };

        self.status = format!("Importing from {}...", folder.display());
        self.importing = true;

        Task::perform(
            import_folder_async(folder, db_path, thumbnail_dir),
            |result| Message::ImportComplete(result.map_err(|e| e.to_string())),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let mut screen = ui::gallery::view(&self.gallery, &self.status, self.importing);

        if let Some(plant) = self.gallery.visible_selection() {
            screen = ui::sheet(
                screen,
                self.detail.view(plant, self.gallery.delete_in_flight()),
                self.detail.sheet_top(),
                Message::CloseModal(DismissReason::Backdrop),
            );

            if self.gallery.confirm_visible() {
                screen = ui::modal(screen, ui::detail::confirm_dialog(), Message::DeleteCancelled);
            }
        }

        if self.toasts.is_empty() {
            screen
        } else {
            stack![screen, self.toasts.view(Message::DismissToast)].into()
        }
    }

    /// Theme comes from settings rather than the system
    fn theme(&self) -> Theme {
        self.settings.theme.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![event::listen_with(lifecycle_event)];

        if self.gallery.modal_visible() {
            subscriptions.push(event::listen_with(pointer_event));
        }
        if self.toasts.needs_tick() {
            subscriptions.push(time::every(Duration::from_millis(500)).map(Message::Tick));
        }

        Subscription::batch(subscriptions)
    }
}

/// Window focus and keyboard events the garden reacts to
fn lifecycle_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::Focused) => Some(Message::FocusGained),
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(Named::Escape),
            ..
        }) => Some(Message::EscapePressed),
        _ => None,
    }
}

/// Pointer tracking for the swipe gesture while details are open
fn pointer_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::CursorMoved(position)),
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::SwipeReleased)
        }
        _ => None,
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    iced::application("My Garden", Garden::update, Garden::view)
        .theme(Garden::theme)
        .subscription(Garden::subscription)
        .centered()
        .run_with(Garden::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn garden_with(images: Vec<PlantImage>) -> Garden {
        let settings = Settings::default();
        let mut gallery = Gallery::new();
        gallery.replace_images(images);
        Garden {
            detail: DetailModal::new(settings.swipe_threshold, settings.scroll_offset_max),
            settings,
            db_path: None,
            gallery,
            toasts: Toasts::default(),
            status: String::new(),
            importing: false,
        }
    }

    fn fern_and_aloe() -> Vec<PlantImage> {
        vec![
            PlantImage::new("a", "Fern", "Polypodiopsida"),
            PlantImage::new("b", "Aloe", "Asphodelaceae"),
        ]
    }

    #[test]
    fn test_tap_confirm_delete_flow() {
        let mut garden = garden_with(fern_and_aloe());

        let _ = garden.update(Message::ThumbnailPressed("b".to_string()));
        assert_eq!(garden.gallery.visible_selection().unwrap().uri, "b");

        let _ = garden.update(Message::DeletePressed);
        assert!(garden.gallery.confirm_visible());

        assert_eq!(garden.gallery.confirm_delete(), Some("b".to_string()));
        let _ = garden.update(Message::DeleteFinished("b".to_string(), Ok(true)));

        let names: Vec<&str> = garden.gallery.images().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Fern"]);
        assert!(!garden.gallery.modal_visible());
    }

    #[test]
    fn test_window_focus_triggers_reload() {
        let message = lifecycle_event(
            Event::Window(window::Event::Focused),
            event::Status::Ignored,
            window::Id::unique(),
        );
        assert!(matches!(message, Some(Message::FocusGained)));

        let unfocused = lifecycle_event(
            Event::Window(window::Event::Unfocused),
            event::Status::Ignored,
            window::Id::unique(),
        );
        assert!(unfocused.is_none());

        // A focus gain leaves the shown list alone until the reload answers
        let mut garden = garden_with(fern_and_aloe());
        let _ = garden.update(Message::FocusGained);
        assert_eq!(garden.gallery.images().len(), 2);

        let _ = garden.update(Message::ImagesLoaded(Ok(vec![PlantImage::new(
            "c", "Ivy", "Araliaceae",
        )])));
        assert_eq!(garden.gallery.images()[0].uri, "c");
    }

    #[test]
    fn test_confirmed_delete_waits_for_catalog() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("garden.db");
        let library = Library::open(&db_path).unwrap();
        for plant in fern_and_aloe() {
            library.save_image(&plant).unwrap();
        }

        let mut garden = garden_with(fern_and_aloe());
        garden.db_path = Some(db_path);

        let _ = garden.update(Message::ThumbnailPressed("b".to_string()));
        let _ = garden.update(Message::DeletePressed);
        let _ = garden.update(Message::DeleteConfirmed);

        // Handed to the catalog; nothing removed yet
        assert!(garden.gallery.delete_in_flight());
        assert!(!garden.gallery.confirm_visible());
        assert!(garden.gallery.modal_visible());
        assert_eq!(garden.gallery.images().len(), 2);
        assert!(garden.toasts.is_empty());

        let _ = garden.update(Message::DeleteFinished("b".to_string(), Ok(true)));

        let names: Vec<&str> = garden.gallery.images().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Fern"]);
        assert!(!garden.gallery.modal_visible());
        assert!(!garden.gallery.delete_in_flight());
        assert_eq!(garden.status, "1 plants in your garden.");
    }

    #[test]
    fn test_click_outside_closes_sort_menu() {
        let mut garden = garden_with(fern_and_aloe());
        let _ = garden.update(Message::ToggleSortMenu);
        assert!(garden.gallery.sort_menu_visible());

        let _ = garden.update(Message::CloseSortMenu);
        assert!(!garden.gallery.sort_menu_visible());
        // Order untouched
        assert_eq!(garden.gallery.images()[0].uri, "a");
    }

    #[test]
    fn test_delete_without_catalog_keeps_entry() {
        let mut garden = garden_with(fern_and_aloe());

        let _ = garden.update(Message::ThumbnailPressed("a".to_string()));
        let _ = garden.update(Message::DeletePressed);
        let _ = garden.update(Message::DeleteConfirmed);

        assert_eq!(garden.gallery.images().len(), 2);
        assert!(garden.gallery.modal_visible());
        assert!(!garden.toasts.is_empty());
    }

    #[test]
    fn test_swipe_down_closes_modal() {
        let mut garden = garden_with(fern_and_aloe());
        let _ = garden.update(Message::ThumbnailPressed("a".to_string()));

        let _ = garden.update(Message::CursorMoved(Point::new(10.0, 100.0)));
        let _ = garden.update(Message::SwipeStarted);
        let _ = garden.update(Message::CursorMoved(Point::new(10.0, 260.0)));
        let _ = garden.update(Message::SwipeReleased);

        assert!(!garden.gallery.modal_visible());
    }

    #[test]
    fn test_escape_backs_out_one_layer_at_a_time() {
        let mut garden = garden_with(fern_and_aloe());
        let _ = garden.update(Message::ThumbnailPressed("a".to_string()));
        let _ = garden.update(Message::DeletePressed);

        let _ = garden.update(Message::EscapePressed);
        assert!(!garden.gallery.confirm_visible());
        assert!(garden.gallery.modal_visible());

        let _ = garden.update(Message::EscapePressed);
        assert!(!garden.gallery.modal_visible());
    }

    #[test]
    fn test_load_failure_surfaces_toast() {
        let mut garden = garden_with(fern_and_aloe());
        let _ = garden.update(Message::ImagesLoaded(Err("disk unplugged".to_string())));

        assert_eq!(garden.gallery.images().len(), 2);
        assert!(!garden.toasts.is_empty());
    }

    #[test]
    fn test_sort_and_reload() {
        let mut garden = garden_with(fern_and_aloe());
        let _ = garden.update(Message::ToggleSortMenu);
        assert!(garden.gallery.sort_menu_visible());

        let _ = garden.update(Message::SortBy(SortCriterion::Species));
        assert!(!garden.gallery.sort_menu_visible());
        assert_eq!(garden.gallery.images()[0].uri, "b");

        let _ = garden.update(Message::ImagesLoaded(Ok(vec![PlantImage::new(
            "c", "Ivy", "Araliaceae",
        )])));
        assert_eq!(garden.gallery.images().len(), 1);
        assert_eq!(garden.status, "1 plants in your garden.");
    }

    #[test]
    fn test_catalog_backed_delete() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("garden.db");
        let library = Library::open(&db_path).unwrap();
        for plant in fern_and_aloe() {
            library.save_image(&plant).unwrap();
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let existed = runtime
            .block_on(library::remove_image(db_path.clone(), "b".to_string()))
            .unwrap();
        assert!(existed);

        let remaining = runtime.block_on(library::load_images(db_path)).unwrap();
        assert_eq!(remaining, vec![PlantImage::new("a", "Fern", "Polypodiopsida")]);
    }
}
