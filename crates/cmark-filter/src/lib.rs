//! Markdown template filter for `tera`.
//!
//! Named boolean options select parser extensions and HTML render flags of
//! [`cmark_render`]. A [`MarkdownFilter`] holds default options, merges
//! per-call overrides over them and renders text to safe [`Markup`]. Installed
//! on a template host it becomes the `markdown` filter:
//!
//! ```
//! use cmark_filter::{MarkdownFilter, OptionSet, TemplateHost};
//! use tera::Context;
//!
//! let mut host = TemplateHost::new();
//! MarkdownFilter::new(OptionSet::new().with("strikethrough", true)).init_app(&mut host);
//!
//! let html = host
//!     .render_str("{{ 'That is ~~wrong~~ right!' | markdown(smartypants=true) }}", &Context::new())
//!     .unwrap();
//! assert_eq!(html, "<p>That is <del>wrong</del> right!</p>\n");
//! ```
//!
//! ## Options
//!
//! Extension names are listed in [`EXTENSION_ALIASES`], render flag names in
//! [`RENDER_FLAG_ALIASES`]. A `no_X` entry is also selected by `X = false`,
//! so `html = false` skips raw HTML. `smartypants = true` applies typographic
//! quotes and dashes to the output. Unknown names are ignored.

mod config;
mod filter;
mod flags;
mod markup;
mod options;
mod registry;
mod render;

pub use config::{Config, ConfigError};
pub use filter::{FILTER_NAME, MarkdownFilter};
pub use flags::{EXTENSION_ALIASES, RENDER_FLAG_ALIASES, is_recognized, make_flags, translate};
pub use markup::Markup;
pub use options::OptionSet;
pub use registry::{FilterRegistry, TemplateHost};
pub use render::{SmartypantsScope, markdown, render_with_scope};
