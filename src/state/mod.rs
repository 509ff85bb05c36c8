/// State management module
///
/// This module handles all application state, including:
/// - The plant catalog database (library.rs)
/// - Shared data structures (data.rs)
/// - Gallery screen state: selection, modal, delete flow (gallery.rs)
/// - Sorting (sort.rs)

pub mod data;
pub mod gallery;
pub mod library;
pub mod sort;
