//! The `markdown` template filter.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cmark_render::{RenderError, Renderer};
use tera::{Filter, Value};

use crate::markup::Markup;
use crate::options::OptionSet;
use crate::registry::FilterRegistry;
use crate::render::{SmartypantsScope, render_with_scope};

/// Name the filter is registered under.
pub const FILTER_NAME: &str = "markdown";

/// Markdown rendering with default options, usable as a template filter.
///
/// Per-call overrides are layered over the defaults without modifying them.
/// In templates, keyword arguments of the filter are the overrides:
///
/// ```text
/// {{ post.body | markdown(strikethrough=true, smartypants=true) }}
///
/// {% filter markdown %}
/// This is *markdown*
/// {% endfilter %}
/// ```
#[derive(Clone, Default)]
pub struct MarkdownFilter {
    defaults: OptionSet,
    renderer: Option<Arc<dyn Renderer>>,
    scope: SmartypantsScope,
}

impl MarkdownFilter {
    #[must_use]
    pub fn new(defaults: OptionSet) -> Self {
        Self {
            defaults,
            renderer: None,
            scope: SmartypantsScope::default(),
        }
    }

    /// Render with a custom renderer instead of the built-in HTML renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    #[must_use]
    pub fn with_smartypants_scope(mut self, scope: SmartypantsScope) -> Self {
        self.scope = scope;
        self
    }

    /// Create a filter and register it on `app`.
    pub fn install(app: &mut impl FilterRegistry, defaults: OptionSet) -> Self {
        let filter = Self::new(defaults);
        filter.init_app(app);
        filter
    }

    /// Register this filter as `markdown` unless that name is already taken.
    ///
    /// Returns `true` if the filter was registered.
    pub fn init_app(&self, app: &mut impl FilterRegistry) -> bool {
        if app.has_filter(FILTER_NAME) {
            tracing::debug!(
                filter = FILTER_NAME,
                "Filter already registered, keeping existing"
            );
            return false;
        }
        app.register_filter(FILTER_NAME, self.clone());
        true
    }

    /// Render text with the defaults updated by `overrides`.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error unchanged.
    pub fn render(&self, text: &str, overrides: &OptionSet) -> Result<Markup, RenderError> {
        let options = self.defaults.merged(overrides);
        render_with_scope(text, self.renderer.as_deref(), &options, self.scope)
    }

    #[must_use]
    pub fn defaults(&self) -> &OptionSet {
        &self.defaults
    }

    /// The custom renderer, if one was set.
    #[must_use]
    pub fn renderer(&self) -> Option<&dyn Renderer> {
        self.renderer.as_deref()
    }

    #[must_use]
    pub fn smartypants_scope(&self) -> SmartypantsScope {
        self.scope
    }
}

impl fmt::Debug for MarkdownFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownFilter")
            .field("defaults", &self.defaults)
            .field("custom_renderer", &self.renderer.is_some())
            .field("scope", &self.scope)
            .finish()
    }
}

impl Filter for MarkdownFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let text = tera::try_get_value!("markdown", "value", String, value);
        let overrides = overrides_from_args(args);
        let markup = self
            .render(&text, &overrides)
            .map_err(|e| tera::Error::chain("markdown filter failed", e))?;
        Ok(Value::String(markup.into_string()))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Convert filter keyword arguments into option overrides.
///
/// `null` becomes an unset option; values that are not booleans are ignored.
fn overrides_from_args(args: &HashMap<String, Value>) -> OptionSet {
    let mut overrides = OptionSet::new();
    for (name, value) in args {
        match value {
            Value::Bool(flag) => {
                overrides.insert(name.as_str(), Some(*flag));
            }
            Value::Null => {
                overrides.insert(name.as_str(), None);
            }
            other => {
                tracing::debug!(option = %name, value = %other, "Ignoring non-boolean markdown option");
            }
        }
    }
    overrides
}
