//! Facade crate for the rebreak frontend.
//! Re-exports domain/kernel primitives and wires settings, breakpoint rewriting and font
//! discovery into a [`Frontend`] that hands out one [`RequestContext`] per response.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! ```rust
//! use rebreak::Frontend;
//! use rebreak::domain::breakpoints::Breakpoints;
//! use rebreak::domain::config::RebreakConfig;
//! use rebreak::settings::SettingsStore;
//!
//! let frontend = Frontend::with_store(&RebreakConfig::default(), SettingsStore::in_memory()).unwrap();
//! frontend.save_breakpoints(&Breakpoints::new("1200", "")).unwrap();
//!
//! let request = frontend.request();
//! assert_eq!(request.adjust_css("@media tablet{.a{b:c}}"), "@media only screen and (max-width:1200px){.a{b:c}}");
//! ```

mod error;

pub use error::{FrontendError, FrontendErrorExt};
pub use rebreak_breakpoints as breakpoints;
pub use rebreak_domain as domain;
pub use rebreak_kernel as kernel;
pub use rebreak_settings as settings;

use rebreak_breakpoints::{BreakpointResolver, BreakpointScope, CssFilter, Delivery, StylesheetDelivery};
use rebreak_domain::breakpoints::{Breakpoints, ResolvedBreakpoints, Tier};
use rebreak_domain::config::RebreakConfig;
use rebreak_domain::constants::DEFAULT_PRIORITY;
use rebreak_kernel::hooks::FilterChain;
use rebreak_kernel::render::Block;
use rebreak_settings::SettingsStore;
use std::borrow::Cow;
use tracing::info;

#[cfg(feature = "fonts")]
pub use rebreak_fonts as fonts;
#[cfg(feature = "fonts")]
use rebreak_fonts::{EnqueuePredicate, FontCollector, FontRegistry, FontStylesheet};

/// Name of the default-override hook fed from `breakpoints.defaults`.
pub const CONFIG_DEFAULTS_HOOK: &str = "config-defaults";

/// Feature registry for runtime introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "breakpoints",
        #[cfg(feature = "fonts")]
        "fonts",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Process-wide frontend state; create once, then call [`Frontend::request`] per response.
#[derive(Debug)]
pub struct Frontend {
    config: RebreakConfig,
    store: SettingsStore,
    resolver: BreakpointResolver,
    delivery: Delivery,
    #[cfg(feature = "fonts")]
    fonts: FontRegistry,
}

impl Frontend {
    /// Opens the configured settings document and builds the frontend on top of it.
    ///
    /// # Errors
    /// Returns [`FrontendError::Settings`] if the settings document cannot be opened, or
    /// [`FrontendError::Breakpoints`] if the breakpoint record cannot be registered or a
    /// configured stylesheet cannot be read.
    pub fn from_config(config: &RebreakConfig) -> Result<Self, FrontendError> {
        let store = SettingsStore::builder()
            .path(&config.settings.path)
            .create(config.settings.create)
            .open()
            .context("Failed to open settings store")?;

        Self::with_store(config, store)
    }

    /// Builds the frontend over an already opened store.
    ///
    /// # Errors
    /// See [`Frontend::from_config`].
    pub fn with_store(config: &RebreakConfig, store: SettingsStore) -> Result<Self, FrontendError> {
        rebreak_breakpoints::register_settings(&store).context("Failed to register settings")?;

        let mut resolver = BreakpointResolver::new(store.clone());
        let overrides = config.breakpoints.defaults.clone();
        if !overrides.set_tiers().is_empty() {
            resolver.defaults_mut().add(DEFAULT_PRIORITY, CONFIG_DEFAULTS_HOOK, move |mut defaults, ()| {
                for tier in Tier::ALL.into_iter().filter(|tier| overrides.is_set(*tier)) {
                    defaults.set(tier, overrides.get(tier));
                }
                defaults
            });
        }

        let delivery = Delivery::from_config(config, rebreak_breakpoints::css_filter())
            .context("Failed to prepare stylesheet delivery")?;

        info!(
            store = ?store.path(),
            namespaces = ?config.blocks.namespaces,
            features = ?features::ENABLED,
            "Frontend initialized"
        );

        Ok(Self {
            config: config.clone(),
            store,
            resolver,
            delivery,
            #[cfg(feature = "fonts")]
            fonts: FontRegistry::from_config(&config.fonts),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &RebreakConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &SettingsStore {
        &self.store
    }

    #[must_use]
    pub const fn resolver(&self) -> &BreakpointResolver {
        &self.resolver
    }

    #[must_use]
    pub const fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    /// Default-override hook (`{1024, 768}` in, adjusted defaults out).
    pub const fn breakpoint_defaults_mut(&mut self) -> &mut FilterChain<Breakpoints> {
        self.resolver.defaults_mut()
    }

    /// The CSS filter every stylesheet and block fragment goes through.
    pub const fn css_filter_mut(&mut self) -> &mut CssFilter {
        self.delivery.filter_mut()
    }

    #[cfg(feature = "fonts")]
    pub const fn font_predicate_mut(&mut self) -> &mut EnqueuePredicate {
        self.fonts.predicate_mut()
    }

    /// Persists user overrides; takes effect for the next [`Frontend::request`].
    ///
    /// # Errors
    /// Returns [`FrontendError::Breakpoints`] if the store rejects the write.
    pub fn save_breakpoints(&self, breakpoints: &Breakpoints) -> Result<(), FrontendError> {
        Ok(rebreak_breakpoints::save_breakpoints(&self.store, breakpoints)?)
    }

    /// Starts a unit of work. Breakpoints are resolved at most once per context.
    #[must_use]
    pub fn request(&self) -> RequestContext<'_> {
        RequestContext {
            frontend: self,
            scope: self.resolver.scope(),
            #[cfg(feature = "fonts")]
            fonts: self.fonts.collector(),
        }
    }
}

/// State of one response: cached breakpoints and the fonts seen so far.
#[derive(Debug)]
pub struct RequestContext<'f> {
    frontend: &'f Frontend,
    scope: BreakpointScope<'f>,
    #[cfg(feature = "fonts")]
    fonts: FontCollector<'f>,
}

impl RequestContext<'_> {
    pub fn breakpoints(&self) -> &ResolvedBreakpoints {
        self.scope.get()
    }

    pub fn has_custom_breakpoints(&self) -> bool {
        self.scope.has_custom_breakpoints()
    }

    /// Post-processes one rendered block: fonts are gathered first, then the markup goes
    /// through the CSS filter if the block belongs to a recognized namespace.
    pub fn render_block<'c>(&mut self, block: &Block, content: Option<&'c str>) -> Option<Cow<'c, str>> {
        #[cfg(feature = "fonts")]
        self.fonts.gather(block, content);

        self.frontend.delivery.adjust_block(content, block, &self.scope)
    }

    /// How the responsive stylesheet should be delivered for this response.
    pub fn stylesheet(&self) -> StylesheetDelivery {
        self.frontend.delivery.stylesheet(&self.scope)
    }

    /// Pipes arbitrary CSS through the CSS filter with this response's breakpoints.
    pub fn adjust_css(&self, css: &str) -> String {
        self.frontend.delivery.filter_css(css, self.scope.get())
    }

    #[cfg(feature = "fonts")]
    #[must_use]
    pub fn fonts(&self) -> &[String] {
        self.fonts.fonts()
    }

    #[cfg(feature = "fonts")]
    #[must_use]
    pub fn fonts_url(&self) -> Option<String> {
        self.fonts.stylesheet_url()
    }

    #[cfg(feature = "fonts")]
    #[must_use]
    pub fn font_stylesheet(&self) -> Option<FontStylesheet> {
        self.fonts.stylesheet()
    }
}
