use crate::error::{BreakpointError, BreakpointErrorExt};
use crate::pipeline::CssFilter;
use crate::resolver::BreakpointScope;
use rebreak_domain::breakpoints::ResolvedBreakpoints;
use rebreak_domain::config::RebreakConfigInner;
use rebreak_kernel::render::Block;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, info};

/// The responsive stylesheet shipped with the frontend, minified, with the built-in
/// `1024px` / `768px` boundaries.
pub const BUNDLED_RESPONSIVE_CSS: &str = include_str!("../assets/responsive.css");

/// How the responsive stylesheet reaches the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StylesheetDelivery {
    /// Load the stock stylesheet registered under `handle`.
    External { handle: String },
    /// Print `css` inline after `attach_to` and drop the `suppress` stylesheet.
    Inline { attach_to: String, suppress: String, css: String },
}

/// Decides between stock and rewritten output for stylesheets and block fragments.
#[derive(Debug)]
pub struct Delivery {
    filter: CssFilter,
    responsive_css: Cow<'static, str>,
    style_handle: String,
    responsive_handle: String,
    namespaces: Vec<String>,
}

impl Delivery {
    /// # Errors
    /// Returns [`BreakpointError::Stylesheet`] if a replacement stylesheet is configured
    /// but cannot be read.
    pub fn from_config(config: &RebreakConfigInner, filter: CssFilter) -> Result<Self, BreakpointError> {
        let responsive_css = match &config.breakpoints.stylesheet {
            Some(path) => {
                let css = std::fs::read_to_string(path)
                    .context(format!("Failed to read responsive stylesheet: {}", path.display()))?;
                info!(path = %path.display(), bytes = css.len(), "Loaded responsive stylesheet");
                Cow::Owned(css)
            },
            None => Cow::Borrowed(BUNDLED_RESPONSIVE_CSS),
        };

        Ok(Self {
            filter,
            responsive_css,
            style_handle: config.delivery.style_handle.clone(),
            responsive_handle: config.delivery.responsive_handle.clone(),
            namespaces: config.blocks.namespaces.clone(),
        })
    }

    #[must_use]
    pub fn responsive_css(&self) -> &str {
        &self.responsive_css
    }

    #[must_use]
    pub const fn filter(&self) -> &CssFilter {
        &self.filter
    }

    /// Extra CSS filters, e.g. between shortcut expansion (9) and substitution (10).
    pub const fn filter_mut(&mut self) -> &mut CssFilter {
        &mut self.filter
    }

    /// Pipes `css` through the whole CSS filter.
    pub fn filter_css(&self, css: impl Into<String>, breakpoints: &ResolvedBreakpoints) -> String {
        self.filter.apply(css.into(), breakpoints)
    }

    /// Without customization the stock stylesheet loads as is; otherwise a rewritten copy
    /// is attached inline to the main stylesheet and the stock one is suppressed.
    pub fn stylesheet(&self, scope: &BreakpointScope<'_>) -> StylesheetDelivery {
        if !scope.has_custom_breakpoints() {
            return StylesheetDelivery::External { handle: self.responsive_handle.clone() };
        }

        let css = self.filter_css(self.responsive_css.as_ref(), scope.get());
        debug!(bytes = css.len(), "Inlining adjusted responsive stylesheet");

        StylesheetDelivery::Inline {
            attach_to: self.style_handle.clone(),
            suppress: self.responsive_handle.clone(),
            css,
        }
    }

    /// Offers a rendered block fragment to the CSS filter.
    ///
    /// Absent content and blocks outside the configured namespaces pass through untouched
    /// and never trigger breakpoint resolution.
    pub fn adjust_block<'c>(
        &self,
        content: Option<&'c str>,
        block: &Block,
        scope: &BreakpointScope<'_>,
    ) -> Option<Cow<'c, str>> {
        let content = content?;
        if !block.in_namespace(self.namespaces.as_slice()) {
            return Some(Cow::Borrowed(content));
        }

        let filtered = self.filter_css(content, scope.get());
        if filtered == content { Some(Cow::Borrowed(content)) } else { Some(Cow::Owned(filtered)) }
    }
}
