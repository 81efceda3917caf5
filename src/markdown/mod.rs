//! Markdown rendering of editor documents.
//!
//! - [`escape`]: escaping and code fence sizing
//! - [`render`]: document → Markdown
//!
//! Rendering follows the usual Markdown writer conventions:
//!
//! - **Text escaping**: characters that would start Markdown syntax are
//!   backslash-escaped
//! - **Tight/loose lists**: lists whose items are single paragraphs render
//!   without blank lines between items
//! - **Dynamic code fence length**: code blocks use the shortest backtick
//!   fence that does not occur in their content
//! - **Marks**: bold `**`, italic `*`, strikethrough `~~`, superscript as
//!   `<sup>`, links as `[text](href)`; colors are dropped

mod escape;
mod render;

pub use escape::{calculate_fence_length, escape_markdown};
pub use render::{render_document, RenderContext};
