use crate::error::BreakpointError;
use rebreak_domain::breakpoints::{Breakpoints, ResolvedBreakpoints, Tier, Tiers};
use rebreak_domain::constants::BREAKPOINTS_SETTING;
use rebreak_kernel::hooks::FilterChain;
use rebreak_settings::SettingsStore;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Where persisted breakpoint overrides come from.
pub trait BreakpointSource: Send + Sync {
    /// The stored override pair, or `None` if nothing was saved.
    ///
    /// # Errors
    /// Implementations report unreadable or malformed records; the resolver logs them
    /// and carries on with the defaults.
    fn load(&self) -> Result<Option<Breakpoints>, BreakpointError>;
}

impl BreakpointSource for SettingsStore {
    fn load(&self) -> Result<Option<Breakpoints>, BreakpointError> {
        Ok(self.get(BREAKPOINTS_SETTING)?)
    }
}

/// A fixed override pair, mostly useful in tests and one-shot tools.
impl BreakpointSource for Breakpoints {
    fn load(&self) -> Result<Option<Breakpoints>, BreakpointError> {
        Ok(Some(self.clone()))
    }
}

/// Merges the (hook-adjusted) default pair with persisted user overrides.
///
/// Resolution never fails: an unreadable store is logged and treated as empty, and any
/// non-empty override is passed through verbatim.
pub struct BreakpointResolver {
    source: Arc<dyn BreakpointSource>,
    defaults: FilterChain<Breakpoints>,
}

impl BreakpointResolver {
    pub fn new(source: impl BreakpointSource + 'static) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<dyn BreakpointSource>) -> Self {
        Self { source, defaults: FilterChain::new() }
    }

    /// The default-override hook, invoked with the built-in `{1024, 768}` pair.
    pub const fn defaults_mut(&mut self) -> &mut FilterChain<Breakpoints> {
        &mut self.defaults
    }

    #[must_use]
    pub const fn defaults(&self) -> &FilterChain<Breakpoints> {
        &self.defaults
    }

    /// The built-in pair after every default-override hook ran.
    ///
    /// A hook that empties a tier does not unset it: the built-in width stands in.
    #[must_use]
    pub fn default_breakpoints(&self) -> Breakpoints {
        let mut defaults = self.defaults.apply(Breakpoints::builtin(), &());
        for tier in Tier::ALL {
            if !defaults.is_set(tier) {
                defaults.set(tier, tier.builtin().to_string());
            }
        }
        defaults
    }

    /// Computes the breakpoint pair for one unit of work.
    ///
    /// A tier is customized when a non-empty override is stored for it, or when a
    /// default-override hook moved it away from the built-in width.
    #[must_use]
    pub fn resolve(&self) -> ResolvedBreakpoints {
        let mut values = self.default_breakpoints();
        let mut custom = Tier::ALL
            .into_iter()
            .filter(|tier| values.get(*tier) != tier.builtin().to_string())
            .fold(Tiers::empty(), |acc, tier| acc | tier.flag());

        match self.source.load() {
            Ok(Some(saved)) => {
                for tier in Tier::ALL.into_iter().filter(|tier| saved.is_set(*tier)) {
                    values.set(tier, saved.get(tier));
                    custom |= tier.flag();
                }
            },
            Ok(None) => {},
            Err(err) => warn!(error = %err, "Ignoring unreadable breakpoint settings"),
        }

        debug!(tablet = %values.tablet, mobile = %values.mobile, ?custom, "Resolved breakpoints");
        ResolvedBreakpoints::new(values, custom)
    }

    /// A lazily resolved, cached view for one request.
    #[must_use]
    pub const fn scope(&self) -> BreakpointScope<'_> {
        BreakpointScope { resolver: self, resolved: OnceLock::new() }
    }
}

impl fmt::Debug for BreakpointResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointResolver").field("defaults", &self.defaults).finish_non_exhaustive()
    }
}

/// Per-request cache of [`BreakpointResolver::resolve`].
///
/// Every stylesheet and block fragment rewritten through one scope sees the same pair,
/// even if the stored settings change while the request is in flight.
#[derive(Debug)]
pub struct BreakpointScope<'r> {
    resolver: &'r BreakpointResolver,
    resolved: OnceLock<ResolvedBreakpoints>,
}

impl BreakpointScope<'_> {
    /// Resolves on first call, then returns the cached pair.
    pub fn get(&self) -> &ResolvedBreakpoints {
        self.resolved.get_or_init(|| self.resolver.resolve())
    }

    pub fn has_custom_breakpoints(&self) -> bool {
        self.get().has_custom_breakpoints()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebreak_settings::SettingsError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        saved: Option<Breakpoints>,
        calls: AtomicUsize,
    }

    impl BreakpointSource for Counting {
        fn load(&self) -> Result<Option<Breakpoints>, BreakpointError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.saved.clone())
        }
    }

    struct Broken;

    impl BreakpointSource for Broken {
        fn load(&self) -> Result<Option<Breakpoints>, BreakpointError> {
            Err(SettingsError::Corrupted { message: "truncated document".into(), context: None }.into())
        }
    }

    #[test]
    fn empty_overrides_keep_defaults() {
        let resolved = BreakpointResolver::new(Breakpoints::default()).resolve();
        assert_eq!(resolved, ResolvedBreakpoints::builtin());
        assert!(!resolved.has_custom_breakpoints());
    }

    #[test]
    fn tiers_override_independently() {
        let resolved = BreakpointResolver::new(Breakpoints::new("1100", "")).resolve();
        assert_eq!(resolved.tablet(), "1100");
        assert_eq!(resolved.mobile(), "768");
        assert_eq!(resolved.custom_tiers(), Tiers::TABLET);
        assert!(resolved.has_custom_breakpoints());
    }

    #[test]
    fn override_equal_to_default_still_counts() {
        let resolved = BreakpointResolver::new(Breakpoints::new("1024", "")).resolve();
        assert!(resolved.has_custom_breakpoints());
        assert!(resolved.matches_builtin());
    }

    #[test]
    fn whitespace_override_is_kept_verbatim() {
        let resolved = BreakpointResolver::new(Breakpoints::new(" ", "")).resolve();
        assert_eq!(resolved.tablet(), " ");
        assert_eq!(resolved.mobile(), "768");
        assert_eq!(resolved.custom_tiers(), Tiers::TABLET);
    }

    #[test]
    fn malformed_values_pass_through() {
        let resolved = BreakpointResolver::new(Breakpoints::new("wide", "12em")).resolve();
        assert_eq!(resolved.tablet(), "wide");
        assert_eq!(resolved.mobile(), "12em");
    }

    #[test]
    fn unreadable_store_falls_back_to_defaults() {
        let resolved = BreakpointResolver::new(Broken).resolve();
        assert_eq!(resolved, ResolvedBreakpoints::builtin());
    }

    #[test]
    fn default_hooks_adjust_the_seed() {
        let mut resolver = BreakpointResolver::new(Breakpoints::default());
        resolver.defaults_mut().add(10, "theme", |mut pair, ()| {
            pair.mobile = "720".to_owned();
            pair.tablet = String::new();
            pair
        });

        assert_eq!(resolver.default_breakpoints(), Breakpoints::new("1024", "720"));

        let resolved = resolver.resolve();
        assert_eq!(resolved.mobile(), "720");
        assert_eq!(resolved.custom_tiers(), Tiers::MOBILE);
    }

    #[test]
    fn saved_values_win_over_hooks() {
        let mut resolver = BreakpointResolver::new(Breakpoints::new("", "600"));
        resolver.defaults_mut().add(10, "theme", |_, ()| Breakpoints::new("1100", "700"));

        let resolved = resolver.resolve();
        assert_eq!(resolved.values(), &Breakpoints::new("1100", "600"));
        assert_eq!(resolved.custom_tiers(), Tiers::all());
    }

    #[test]
    fn scope_resolves_once() {
        let source = Arc::new(Counting { saved: Some(Breakpoints::new("1200", "")), calls: AtomicUsize::new(0) });
        let resolver = BreakpointResolver::from_shared(source.clone());

        let scope = resolver.scope();
        assert!(!scope.is_resolved());
        assert!(scope.has_custom_breakpoints());
        assert_eq!(scope.get().tablet(), "1200");
        assert!(scope.is_resolved());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let _ = resolver.scope().get();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
