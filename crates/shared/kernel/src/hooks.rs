//! Ordered filter chains.
//!
//! Every extension point is an explicit list of `(priority, name, filter)` entries.
//! Lower priorities run first and equal priorities keep registration order, so a
//! filter registered at `9` always sees the value before any filter at `10`.

use std::borrow::Cow;
use std::fmt;
use tracing::trace;

type Filter<T, C> = Box<dyn Fn(T, &C) -> T + Send + Sync>;

struct Entry<T, C: ?Sized> {
    priority: i32,
    name: Cow<'static, str>,
    filter: Filter<T, C>,
}

/// A sequence of transformations over `T`, each receiving the previous output and a
/// shared, read-only context `C`.
pub struct FilterChain<T, C: ?Sized = ()> {
    entries: Vec<Entry<T, C>>,
}

impl<T, C: ?Sized> FilterChain<T, C> {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Registers `filter` after every entry whose priority is lower than or equal to `priority`.
    pub fn add<F>(&mut self, priority: i32, name: impl Into<Cow<'static, str>>, filter: F) -> &mut Self
    where
        F: Fn(T, &C) -> T + Send + Sync + 'static,
    {
        let index = self.entries.partition_point(|entry| entry.priority <= priority);
        self.entries.insert(index, Entry { priority, name: name.into(), filter: Box::new(filter) });
        self
    }

    /// Builder-style [`FilterChain::add`].
    #[must_use]
    pub fn with<F>(mut self, priority: i32, name: impl Into<Cow<'static, str>>, filter: F) -> Self
    where
        F: Fn(T, &C) -> T + Send + Sync + 'static,
    {
        self.add(priority, name, filter);
        self
    }

    /// Removes every entry registered under `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        before != self.entries.len()
    }

    /// Folds `value` through every entry in order.
    pub fn apply(&self, value: T, context: &C) -> T {
        self.entries.iter().fold(value, |value, entry| {
            trace!(filter = %entry.name, priority = entry.priority, "Applying filter");
            (entry.filter)(value, context)
        })
    }

    /// `(priority, name)` pairs in execution order.
    pub fn entries(&self) -> impl Iterator<Item = (i32, &str)> {
        self.entries.iter().map(|entry| (entry.priority, entry.name.as_ref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T, C: ?Sized> Default for FilterChain<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: ?Sized> fmt::Debug for FilterChain<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_in_priority_then_registration_order() {
        let chain = FilterChain::<Vec<&'static str>>::new()
            .with(10, "b", |mut v, ()| {
                v.push("b");
                v
            })
            .with(9, "a", |mut v, ()| {
                v.push("a");
                v
            })
            .with(10, "c", |mut v, ()| {
                v.push("c");
                v
            })
            .with(11, "d", |mut v, ()| {
                v.push("d");
                v
            });

        assert_eq!(chain.apply(Vec::new(), &()), ["a", "b", "c", "d"]);
        assert_eq!(chain.entries().collect::<Vec<_>>(), [(9, "a"), (10, "b"), (10, "c"), (11, "d")]);
    }

    #[test]
    fn empty_chain_is_identity() {
        let chain = FilterChain::<String>::default();
        assert!(chain.is_empty());
        assert_eq!(chain.apply("@media tablet{}".to_owned(), &()), "@media tablet{}");
    }

    #[test]
    fn context_is_shared_by_every_entry() {
        let chain = FilterChain::<u32, u32>::new()
            .with(10, "add", |value, step| value + step)
            .with(20, "mul", |value, step| value * step);

        assert_eq!(chain.apply(1, &3), 12);
    }

    #[test]
    fn unsized_context() {
        let chain = FilterChain::<bool, str>::new().with(10, "veto", |keep, font| keep && font != "Comic Sans");

        assert!(chain.apply(true, "Roboto"));
        assert!(!chain.apply(true, "Comic Sans"));
    }

    #[test]
    fn remove_by_name() {
        let mut chain = FilterChain::<u32>::new();
        chain.add(10, "double", |v, ()| v * 2).add(10, "inc", |v, ()| v + 1);

        assert!(chain.remove("double"));
        assert!(!chain.remove("double"));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.apply(1, &()), 2);
        assert_eq!(format!("{chain:?}"), "[(10, \"inc\")]");
    }
}
