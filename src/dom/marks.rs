//! Formatting marks contributed by inline elements.

use super::{attribute, local_name, Handle};
use crate::model::Mark;

/// The mark an element contributes by its own tag, if any.
///
/// A link without an `href` links to the empty string.
pub fn mark_for(handle: &Handle) -> Option<Mark> {
    match local_name(handle)? {
        "b" => Some(Mark::bold()),
        "i" => Some(Mark::italic()),
        "sup" => Some(Mark::superscript()),
        "a" => Some(Mark::link(attribute(handle, "href").unwrap_or_default())),
        _ => None,
    }
}

/// Marks for one element. Each tag contributes at most one; combined
/// formatting comes from nesting and is accumulated by the converter.
pub fn marks_for(handle: &Handle) -> Vec<Mark> {
    mark_for(handle).into_iter().collect()
}
