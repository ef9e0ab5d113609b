//! Markdown to HTML rendering driven by bitflag options.
//!
//! Parsing is delegated to `pulldown-cmark`. Parser features are selected
//! with [`Extensions`], HTML output is tuned with [`RenderFlags`], and the
//! output format can be replaced entirely by implementing [`Renderer`].
//!
//! # Example
//!
//! ```
//! use cmark_render::{Extensions, RenderFlags, html, smartypants};
//!
//! let output = html(
//!     "That's ~~wrong~~ right!",
//!     Extensions::STRIKETHROUGH,
//!     RenderFlags::empty(),
//! )
//! .unwrap();
//! assert_eq!(
//!     smartypants(&output),
//!     "<p>That&rsquo;s <del>wrong</del> right!</p>\n"
//! );
//! ```

mod autolink;
mod document;
mod error;
mod flags;
mod html;
mod renderer;
mod smartypants;
mod state;

pub use document::{Document, parse};
pub use error::RenderError;
pub use flags::{Extensions, RenderFlags};
pub use html::HtmlRenderer;
pub use renderer::{Markdown, Renderer, html};
pub use smartypants::smartypants;
pub use state::{escape_html, slugify};

// Event types seen by custom renderers.
pub use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
