//! Template hosts that accept named filters.

use std::collections::BTreeSet;

use tera::{Context, Filter, Tera};

/// A template environment holding filters by name.
pub trait FilterRegistry {
    /// Whether a filter with this name is registered.
    fn has_filter(&self, name: &str) -> bool;

    /// Register a filter, replacing any filter of the same name.
    fn register_filter<F: Filter + 'static>(&mut self, name: &str, filter: F);
}

/// A [`Tera`] instance that also remembers which filters were registered
/// through it.
///
/// # Example
///
/// ```
/// use cmark_filter::{MarkdownFilter, OptionSet, TemplateHost};
/// use tera::Context;
///
/// let mut host = TemplateHost::new();
/// MarkdownFilter::install(&mut host, OptionSet::new());
///
/// let mut context = Context::new();
/// context.insert("text", "*hi*");
/// let html = host.render_str("{{ text | markdown }}", &context).unwrap();
/// assert_eq!(html, "<p><em>hi</em></p>\n");
/// ```
#[derive(Default)]
pub struct TemplateHost {
    tera: Tera,
    filters: BTreeSet<String>,
}

impl TemplateHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing engine.
    ///
    /// Filters it already holds count as registered but are not listed by
    /// [`filter_names`](Self::filter_names).
    #[must_use]
    pub fn with_tera(tera: Tera) -> Self {
        Self {
            tera,
            filters: BTreeSet::new(),
        }
    }

    /// Add a named template.
    ///
    /// Names ending in `.html`, `.htm` or `.xml` are auto-escaped.
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> tera::Result<()> {
        self.tera.add_raw_template(name, content)
    }

    pub fn render(&self, name: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(name, context)
    }

    /// Render a one-off template string.
    pub fn render_str(&mut self, input: &str, context: &Context) -> tera::Result<String> {
        self.tera.render_str(input, context)
    }

    /// Names of filters registered through this host.
    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(String::as_str)
    }
}

impl FilterRegistry for TemplateHost {
    fn has_filter(&self, name: &str) -> bool {
        self.tera.get_filter(name).is_ok()
    }

    fn register_filter<F: Filter + 'static>(&mut self, name: &str, filter: F) {
        self.tera.register_filter(name, filter);
        self.filters.insert(name.to_owned());
    }
}
