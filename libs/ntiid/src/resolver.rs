//! Type-keyed resolver registry and dispatch.
//!
//! A [`ResolverRegistry`] maps a type tag (`HTML`, `OID`, ...) to the
//! resolver that turns identifiers of that type into objects. Registration
//! usually happens at startup and teardown; lookups happen continuously, so
//! the map sits behind a reader/writer lock. The lock is released before a
//! resolver runs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, trace};

use crate::error::{BoxError, NtiidError};
use crate::grammar::Ntiid;
use crate::types::base_type;

/// Resolves identifiers of one type to the objects they name.
///
/// Return `Ok(None)` when nothing matches; reserve `Err` for genuine
/// internal failures.
pub trait NtiidResolver<T>: Send + Sync {
    fn resolve(&self, key: &Ntiid) -> Result<Option<T>, BoxError>;
}

impl<T, F> NtiidResolver<T> for F
where
    F: Fn(&Ntiid) -> Result<Option<T>, BoxError> + Send + Sync,
{
    fn resolve(&self, key: &Ntiid) -> Result<Option<T>, BoxError> {
        self(key)
    }
}

/// Shared handle to a registered resolver.
pub type SharedResolver<T> = Arc<dyn NtiidResolver<T>>;

/// Registry of resolvers keyed by type tag.
pub struct ResolverRegistry<T> {
    resolvers: RwLock<HashMap<String, SharedResolver<T>>>,
}

impl<T> Default for ResolverRegistry<T> {
    fn default() -> Self {
        Self {
            resolvers: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> fmt::Debug for ResolverRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("types", &self.registered_types())
            .finish()
    }
}

impl<T> ResolverRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resolver` for `nttype`, returning the one it replaces.
    pub fn register(
        &self,
        nttype: impl Into<String>,
        resolver: SharedResolver<T>,
    ) -> Option<SharedResolver<T>> {
        let nttype = nttype.into();
        let previous = self.resolvers.write().insert(nttype.clone(), resolver);
        info!(
            nttype = %nttype,
            replaced = previous.is_some(),
            "registered ntiid resolver"
        );
        previous
    }

    /// Removes the resolver for `nttype` if it is `resolver`.
    ///
    /// Returns false, leaving the registry untouched, when a different
    /// resolver (or none) is registered for the type.
    pub fn unregister(&self, nttype: &str, resolver: &SharedResolver<T>) -> bool {
        let mut resolvers = self.resolvers.write();
        let matches = resolvers
            .get(nttype)
            .is_some_and(|current| same_resolver(current, resolver));
        if matches {
            resolvers.remove(nttype);
            info!(nttype, "unregistered ntiid resolver");
        } else {
            debug!(nttype, "unregister ignored: resolver not registered for type");
        }
        matches
    }

    /// Returns the resolver registered for exactly `nttype`.
    pub fn resolver_for(&self, nttype: &str) -> Option<SharedResolver<T>> {
        self.resolvers.read().get(nttype).cloned()
    }

    /// Sorted list of registered type tags.
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.resolvers.read().keys().cloned().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.resolvers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.read().is_empty()
    }

    /// Looks up the object named by `candidate`.
    ///
    /// Empty, missing, and malformed candidates, unknown types, and resolver
    /// misses all yield `Ok(None)`. Only resolver failures are errors.
    pub fn find_object(&self, candidate: Option<&str>) -> Result<Option<T>, NtiidError> {
        self.lookup(candidate, false)
    }

    /// Like [`find_object`](Self::find_object), but a malformed candidate
    /// fails with [`NtiidError::InvalidFormat`].
    pub fn try_find_object(&self, candidate: Option<&str>) -> Result<Option<T>, NtiidError> {
        self.lookup(candidate, true)
    }

    /// Dispatches an already parsed identifier to its type's resolver.
    ///
    /// A `Base:Sub` type with no resolver of its own falls back to the
    /// resolver for `Base`.
    pub fn resolve(&self, ntiid: &Ntiid) -> Result<Option<T>, NtiidError> {
        let nttype = ntiid.nttype();
        let Some(resolver) = self.dispatch_target(nttype) else {
            debug!(nttype, ntiid = %ntiid, "no resolver registered for type");
            return Ok(None);
        };

        trace!(nttype, ntiid = %ntiid, "dispatching to resolver");
        resolver.resolve(ntiid).map_err(NtiidError::Resolver)
    }

    fn lookup(&self, candidate: Option<&str>, error: bool) -> Result<Option<T>, NtiidError> {
        let Some(candidate) = candidate.filter(|c| !c.is_empty()) else {
            return Ok(None);
        };

        match Ntiid::parse(candidate) {
            Ok(ntiid) => self.resolve(&ntiid),
            Err(err) if error => Err(err),
            Err(err) => {
                debug!(candidate, error = %err, "ignoring invalid ntiid");
                Ok(None)
            }
        }
    }

    fn dispatch_target(&self, nttype: &str) -> Option<SharedResolver<T>> {
        let resolvers = self.resolvers.read();
        resolvers
            .get(nttype)
            .or_else(|| base_type(nttype).and_then(|base| resolvers.get(base)))
            .cloned()
    }
}

fn same_resolver<T>(a: &SharedResolver<T>, b: &SharedResolver<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TYPE_HTML, TYPE_NAMED_ENTITY, TYPE_OID};

    const HTML_ID: &str = "tag:nextthought.com,2011-10:NTI-HTML-764853119912700730";

    struct Named(&'static str);

    impl NtiidResolver<String> for Named {
        fn resolve(&self, key: &Ntiid) -> Result<Option<String>, BoxError> {
            Ok(Some(format!("{}:{}", self.0, key.specific().unwrap_or_default())))
        }
    }

    fn named(name: &'static str) -> SharedResolver<String> {
        Arc::new(Named(name))
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = ResolverRegistry::new();
        assert!(registry.register(TYPE_HTML, named("first")).is_none());
        assert!(registry.register(TYPE_HTML, named("second")).is_some());

        let found = registry.find_object(Some(HTML_ID)).unwrap();
        assert_eq!(found.as_deref(), Some("second:764853119912700730"));
    }

    #[test]
    fn test_unregister_requires_same_instance() {
        let registry = ResolverRegistry::new();
        let registered = named("html");
        registry.register(TYPE_HTML, Arc::clone(&registered));
        registry.register(TYPE_OID, named("oid"));

        assert!(!registry.unregister(TYPE_HTML, &named("html")));
        assert!(!registry.unregister("Quiz", &registered));
        assert_eq!(registry.len(), 2);

        assert!(registry.unregister(TYPE_HTML, &registered));
        assert_eq!(registry.registered_types(), vec![TYPE_OID.to_string()]);
        assert!(registry.find_object(Some(HTML_ID)).unwrap().is_none());
    }

    #[test]
    fn test_subtype_falls_back_to_base() {
        let registry = ResolverRegistry::new();
        registry.register(TYPE_NAMED_ENTITY, named("entity"));

        let found = registry
            .find_object(Some("tag:nextthought.com,2011-10:system-NamedEntity:User-jason"))
            .unwrap();
        assert_eq!(found.as_deref(), Some("entity:jason"));

        registry.register("NamedEntity:User", named("user"));
        let found = registry
            .find_object(Some("tag:nextthought.com,2011-10:system-NamedEntity:User-jason"))
            .unwrap();
        assert_eq!(found.as_deref(), Some("user:jason"));
    }

    #[test]
    fn test_closure_resolver_may_miss() {
        let registry: ResolverRegistry<String> = ResolverRegistry::new();
        registry.register(
            TYPE_HTML,
            Arc::new(|_: &Ntiid| -> Result<Option<String>, BoxError> { Ok(None) }),
        );
        assert!(registry.try_find_object(Some(HTML_ID)).unwrap().is_none());
    }

    #[test]
    fn test_resolver_may_reenter_registry() {
        let registry: Arc<ResolverRegistry<String>> = Arc::new(ResolverRegistry::new());
        let inner = Arc::downgrade(&registry);
        registry.register(
            TYPE_HTML,
            Arc::new(move |_: &Ntiid| -> Result<Option<String>, BoxError> {
                Ok(inner.upgrade().map(|registry| format!("{} types", registry.len())))
            }),
        );
        let found = registry.find_object(Some(HTML_ID)).unwrap();
        assert_eq!(found.as_deref(), Some("1 types"));

        let weak = Arc::downgrade(&registry);
        drop(registry);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_concurrent_register_and_lookup() {
        let registry: ResolverRegistry<String> = ResolverRegistry::new();
        std::thread::scope(|scope| {
            for i in 0..4 {
                let registry = &registry;
                scope.spawn(move || {
                    for _ in 0..100 {
                        registry.register(format!("T{i}"), named("t"));
                        let _ = registry.find_object(Some(HTML_ID)).unwrap();
                    }
                });
            }
        });
        assert_eq!(registry.len(), 4);
    }
}
