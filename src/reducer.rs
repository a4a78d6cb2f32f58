use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub(crate) type ReducerFn<T, P> = dyn Fn(&T, Option<&P>) -> T + Send + Sync;

/// The transition table: action name to reducer.
///
/// A reducer computes the next value from the current one and an optional
/// payload. Reducers should be pure; the container calls them once per
/// dispatch and commits whatever they return.
///
/// The table is assembled up front and handed to the container, which never
/// exposes a way to change it afterwards.
///
/// ```
/// use zentropy::Reducers;
///
/// let reducers = Reducers::new()
///     .on("increment", |n: &i32, _: Option<&i32>| n + 1)
///     .on("add", |n: &i32, by: Option<&i32>| n + by.copied().unwrap_or(0));
/// assert_eq!(reducers.len(), 2);
/// ```
pub struct Reducers<T, P = ()> {
    table: BTreeMap<String, Arc<ReducerFn<T, P>>>,
}

impl<T, P> Reducers<T, P> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Add a reducer for `action`, replacing any earlier one with that name.
    pub fn on<F>(mut self, action: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(&T, Option<&P>) -> T + Send + Sync + 'static,
    {
        self.table.insert(action.into(), Arc::new(reducer));
        self
    }

    /// Number of reducers.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no reducers.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Whether `action` has a reducer.
    pub fn contains(&self, action: &str) -> bool {
        self.table.contains_key(action)
    }

    /// Action names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub(crate) fn get(&self, action: &str) -> Option<&Arc<ReducerFn<T, P>>> {
        self.table.get(action)
    }

    /// Move every reducer of `other` into `self`; later names win.
    pub(crate) fn merge(&mut self, other: Reducers<T, P>) {
        self.table.extend(other.table);
    }
}

impl<T, P> Default for Reducers<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> fmt::Debug for Reducers<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.keys()).finish()
    }
}
