/// Sorting for the garden gallery
use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::data::PlantImage;

/// Field the gallery can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    Name,
    Species,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 2] = [SortCriterion::Name, SortCriterion::Species];

    /// Label of the sort menu entry
    pub fn label(&self) -> &'static str {
        match self {
            SortCriterion::Name => "Sort by Name",
            SortCriterion::Species => "Sort by Species",
        }
    }

    pub fn key<'a>(&self, image: &'a PlantImage) -> &'a str {
        match self {
            SortCriterion::Name => &image.name,
            SortCriterion::Species => &image.species,
        }
    }
}

/// Base letters only: decomposed, accents dropped, lower-cased
fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Letters and accents, case folded
fn accented_letters(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Lower case sorts before upper case at equal letters
fn case_pattern(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).map(char::is_uppercase)
}

/// Compare two labels the way a person reading them would expect.
///
/// Letters compare first ignoring accents and case ("aloe" == "Aloë"),
/// then accents ("e" < "é"), then case ("a" < "A"), then raw text so the
/// order is total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented_letters(a).cmp(&accented_letters(b)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

/// Re-sort the whole list in ascending order of `criterion`.
///
/// Stable: entries with equal keys keep their current relative order.
pub fn sort_images(images: &mut [PlantImage], criterion: SortCriterion) {
    images.sort_by(|a, b| locale_compare(criterion.key(a), criterion.key(b)));
}
