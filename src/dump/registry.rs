//! Handler registry: ordered per-type rendering overrides.

use crate::core::Inspect;

/// A (predicate, renderer) override consulted before the default rendering
/// rules. A matched renderer returning `None` suppresses the value entirely,
/// which is distinct from returning an empty line set.
pub struct Handler {
    matches: Box<dyn Fn(&dyn Inspect) -> bool + Send + Sync>,
    render: Box<dyn Fn(&dyn Inspect) -> Option<Vec<String>> + Send + Sync>,
}

impl Handler {
    /// Create a handler from an arbitrary predicate and renderer.
    pub fn new(
        matches: impl Fn(&dyn Inspect) -> bool + Send + Sync + 'static,
        render: impl Fn(&dyn Inspect) -> Option<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            matches: Box::new(matches),
            render: Box::new(render),
        }
    }

    /// Create a handler that matches exactly one concrete type.
    pub fn for_type<T, F>(render: F) -> Self
    where
        T: Inspect + 'static,
        F: Fn(&T) -> Option<Vec<String>> + Send + Sync + 'static,
    {
        Self::new(
            |value| value.as_any().is::<T>(),
            move |value| value.as_any().downcast_ref::<T>().and_then(|v| render(v)),
        )
    }

    /// Create a handler that renders nothing for a type, omitting it from the
    /// output entirely.
    pub fn suppress<T: Inspect + 'static>() -> Self {
        Self::for_type(|_: &T| None)
    }

    pub(crate) fn matches(&self, value: &dyn Inspect) -> bool {
        (self.matches)(value)
    }

    pub(crate) fn render(&self, value: &dyn Inspect) -> Option<Vec<String>> {
        (self.render)(value)
    }
}

/// Ordered handler list, immutable once built. Entries are consulted in
/// registration order and the first match governs.
#[derive(Default)]
pub struct Registry {
    handlers: Vec<Handler>,
}

impl Registry {
    /// Create an empty registry (default rules only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler, keeping registration order.
    pub fn with(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    pub(crate) fn find(&self, value: &dyn Inspect) -> Option<&Handler> {
        self.handlers.iter().find(|h| h.matches(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let registry = Registry::new()
            .with(Handler::for_type(|v: &u32| {
                Some(vec![format!("first {v}")])
            }))
            .with(Handler::for_type(|v: &u32| {
                Some(vec![format!("second {v}")])
            }));

        let value = 7u32;
        let handler = registry.find(&value as &dyn Inspect).unwrap();
        assert_eq!(
            handler.render(&value as &dyn Inspect),
            Some(vec!["first 7".to_string()])
        );
    }

    #[test]
    fn test_no_match_for_other_types() {
        let registry = Registry::new().with(Handler::for_type(|_: &u32| Some(vec![])));
        let value = String::from("text");
        assert!(registry.find(&value as &dyn Inspect).is_none());
    }

    #[test]
    fn test_suppression_is_none_not_empty() {
        let registry = Registry::new().with(Handler::suppress::<String>());
        let value = String::from("noisy");
        let handler = registry.find(&value as &dyn Inspect).unwrap();
        assert_eq!(handler.render(&value as &dyn Inspect), None);
    }
}
