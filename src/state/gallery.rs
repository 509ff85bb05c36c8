/// Screen state for the garden gallery
///
/// Everything here is plain data mutated from `update`. Catalog calls happen
/// elsewhere; this type only decides what the screen shows before and after.
use super::data::PlantImage;
use super::sort::{sort_images, SortCriterion};

/// Ways the detail modal can be closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Backdrop,
    Swipe,
    CloseButton,
    Escape,
    /// The shown entry was deleted
    Deleted,
}

/// What `finish_delete` did to the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteEffect {
    /// Entry removed from the list (and the modal closed if it showed it)
    Removed,
    /// Store refused; list left untouched
    Kept(String),
    /// Result for a delete we weren't waiting on
    Stale,
}

#[derive(Debug, Default)]
pub struct Gallery {
    images: Vec<PlantImage>,
    selected_image: Option<PlantImage>,
    modal_visible: bool,
    sort_menu_visible: bool,
    confirm_visible: bool,
    /// uri handed to the store and not yet acknowledged
    pending_delete: Option<String>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[PlantImage] {
        &self.images
    }

    /// Replace the whole list with a fresh load from the catalog
    pub fn replace_images(&mut self, images: Vec<PlantImage>) {
        self.images = images;
    }

    pub fn sort_menu_visible(&self) -> bool {
        self.sort_menu_visible
    }

    pub fn open_sort_menu(&mut self) {
        self.sort_menu_visible = true;
    }

    pub fn close_sort_menu(&mut self) {
        self.sort_menu_visible = false;
    }

    pub fn toggle_sort_menu(&mut self) {
        if self.sort_menu_visible {
            self.close_sort_menu();
        } else {
            self.open_sort_menu();
        }
    }

    /// Re-sort every entry by `criterion` and close the sort menu
    pub fn sort_by(&mut self, criterion: SortCriterion) {
        sort_images(&mut self.images, criterion);
        self.sort_menu_visible = false;
    }

    /// Open the detail modal for the entry with this uri.
    ///
    /// Returns false (and changes nothing) if no such entry is listed.
    pub fn select(&mut self, uri: &str) -> bool {
        let Some(image) = self.images.iter().find(|i| i.uri == uri) else {
            return false;
        };

        self.selected_image = Some(image.clone());
        self.modal_visible = true;
        self.sort_menu_visible = false;
        self.confirm_visible = false;
        true
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible
    }

    /// The entry the modal shows, if the modal is open
    pub fn visible_selection(&self) -> Option<&PlantImage> {
        self.selected_image.as_ref().filter(|_| self.modal_visible)
    }

    pub fn close_modal(&mut self, reason: DismissReason) {
        tracing::debug!(?reason, "closing plant details");
        self.modal_visible = false;
        self.confirm_visible = false;
    }

    pub fn confirm_visible(&self) -> bool {
        self.confirm_visible
    }

    pub fn delete_in_flight(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Ask for confirmation before deleting the shown entry
    pub fn request_delete(&mut self) -> bool {
        if self.visible_selection().is_none() || self.pending_delete.is_some() {
            return false;
        }
        self.confirm_visible = true;
        true
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_visible = false;
    }

    /// User confirmed. Returns the uri the store must delete.
    ///
    /// The local list is left alone until `finish_delete` reports the
    /// store's answer.
    pub fn confirm_delete(&mut self) -> Option<String> {
        if !self.confirm_visible {
            return None;
        }
        self.confirm_visible = false;

        let uri = self.visible_selection()?.uri.clone();
        self.pending_delete = Some(uri.clone());
        Some(uri)
    }

    /// Apply the store's answer to a delete started by `confirm_delete`
    pub fn finish_delete(&mut self, uri: &str, outcome: Result<(), String>) -> DeleteEffect {
        if self.pending_delete.as_deref() != Some(uri) {
            return DeleteEffect::Stale;
        }
        self.pending_delete = None;

        match outcome {
            Ok(()) => {
                self.images.retain(|image| image.uri != uri);
                if self.visible_selection().is_some_and(|s| s.uri == uri) {
                    self.close_modal(DismissReason::Deleted);
                }
                DeleteEffect::Removed
            }
            Err(reason) => DeleteEffect::Kept(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garden() -> Gallery {
        let mut gallery = Gallery::new();
        gallery.replace_images(vec![
            PlantImage::new("a", "Fern", "Polypodiopsida"),
            PlantImage::new("b", "Aloe", "Asphodelaceae"),
        ]);
        gallery
    }

    #[test]
    fn test_select_opens_modal_with_entry() {
        let mut gallery = garden();
        assert!(gallery.visible_selection().is_none());

        assert!(gallery.select("b"));
        assert!(gallery.modal_visible());
        assert_eq!(gallery.visible_selection().unwrap().uri, "b");
    }

    #[test]
    fn test_select_unknown_uri_is_ignored() {
        let mut gallery = garden();
        assert!(!gallery.select("missing"));
        assert!(!gallery.modal_visible());
    }

    #[test]
    fn test_every_dismissal_closes_modal() {
        for reason in [
            DismissReason::Backdrop,
            DismissReason::Swipe,
            DismissReason::CloseButton,
            DismissReason::Escape,
        ] {
            let mut gallery = garden();
            gallery.select("a");
            gallery.request_delete();
            gallery.close_modal(reason);

            assert!(!gallery.modal_visible(), "{:?}", reason);
            assert!(!gallery.confirm_visible(), "{:?}", reason);
            assert!(gallery.visible_selection().is_none());
        }
    }

    #[test]
    fn test_sort_closes_menu() {
        let mut gallery = garden();
        gallery.open_sort_menu();
        gallery.sort_by(SortCriterion::Name);

        assert!(!gallery.sort_menu_visible());
        assert_eq!(gallery.images()[0].name, "Aloe");
    }

    #[test]
    fn test_confirmed_delete_removes_entry_after_store_ack() {
        let mut gallery = garden();
        gallery.select("b");
        assert!(gallery.request_delete());
        assert!(gallery.confirm_visible());

        let uri = gallery.confirm_delete().unwrap();
        assert_eq!(uri, "b");
        // Nothing removed until the store answers
        assert_eq!(gallery.images().len(), 2);
        assert!(gallery.modal_visible());

        assert_eq!(gallery.finish_delete(&uri, Ok(())), DeleteEffect::Removed);
        assert_eq!(gallery.images().len(), 1);
        assert_eq!(gallery.images()[0].name, "Fern");
        assert!(!gallery.modal_visible());
        assert!(!gallery.delete_in_flight());
    }

    #[test]
    fn test_failed_delete_keeps_entry_and_modal() {
        let mut gallery = garden();
        gallery.select("a");
        gallery.request_delete();
        let uri = gallery.confirm_delete().unwrap();

        let effect = gallery.finish_delete(&uri, Err("disk full".to_string()));
        assert_eq!(effect, DeleteEffect::Kept("disk full".to_string()));
        assert_eq!(gallery.images().len(), 2);
        assert_eq!(gallery.visible_selection().unwrap().uri, "a");
    }

    #[test]
    fn test_cancel_keeps_everything() {
        let mut gallery = garden();
        gallery.select("a");
        gallery.request_delete();
        gallery.cancel_delete();

        assert!(!gallery.confirm_visible());
        assert!(gallery.confirm_delete().is_none());
        assert!(gallery.modal_visible());
        assert_eq!(gallery.images().len(), 2);
    }

    #[test]
    fn test_delete_requires_open_modal() {
        let mut gallery = garden();
        assert!(!gallery.request_delete());

        gallery.select("a");
        gallery.close_modal(DismissReason::Backdrop);
        assert!(!gallery.request_delete());
    }

    #[test]
    fn test_delete_ack_after_modal_closed_still_removes() {
        let mut gallery = garden();
        gallery.select("a");
        gallery.request_delete();
        let uri = gallery.confirm_delete().unwrap();
        gallery.close_modal(DismissReason::Backdrop);

        assert_eq!(gallery.finish_delete(&uri, Ok(())), DeleteEffect::Removed);
        assert_eq!(gallery.images().len(), 1);
        assert_eq!(gallery.finish_delete(&uri, Ok(())), DeleteEffect::Stale);
    }

    #[test]
    fn test_reload_replaces_list() {
        let mut gallery = garden();
        gallery.replace_images(vec![PlantImage::new("c", "Ivy", "Araliaceae")]);
        assert_eq!(gallery.images().len(), 1);
        assert_eq!(gallery.images()[0].uri, "c");
    }
}
