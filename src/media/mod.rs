/// Photo handling module
///
/// This module handles:
/// - Importing folders of plant photos into the catalog
/// - Generating gallery thumbnails
/// - Caching thumbnails to disk

pub mod import;
pub mod thumbnail;
