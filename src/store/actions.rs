use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use super::State;

/// Dispatches one named action on the state it was taken from.
pub struct ActionInvoker<T, P = ()> {
    state: State<T, P>,
    action: String,
}

impl<T, P> ActionInvoker<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: 'static,
{
    /// The action this invoker dispatches.
    pub fn name(&self) -> &str {
        &self.action
    }

    /// Dispatch without a payload.
    pub fn invoke(&self) -> Option<T> {
        self.state.dispatch(&self.action, None)
    }

    /// Dispatch with `payload`.
    pub fn call(&self, payload: P) -> Option<T> {
        self.state.dispatch(&self.action, Some(payload))
    }
}

impl<T, P> Clone for ActionInvoker<T, P> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            action: self.action.clone(),
        }
    }
}

impl<T, P> fmt::Debug for ActionInvoker<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionInvoker").field(&self.action).finish()
    }
}

/// A snapshot of the transition table as callable invokers, keyed by name.
///
/// Built fresh by [`State::actions`]; holds nothing the state does not already
/// own.
///
/// ```
/// use zentropy::{Reducers, State};
///
/// let state = State::with_reducers(
///     false,
///     Reducers::new()
///         .on("login", |_: &bool, _: Option<&()>| true)
///         .on("logout", |_: &bool, _: Option<&()>| false),
/// );
///
/// let actions = state.actions();
/// actions.get("login").unwrap().invoke();
/// assert!(state.value());
/// ```
pub struct Actions<T, P = ()> {
    invokers: BTreeMap<String, ActionInvoker<T, P>>,
}

impl<T, P> Actions<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: 'static,
{
    pub(crate) fn new(state: &State<T, P>) -> Self {
        let invokers = state
            .action_names()
            .map(|name| {
                let invoker = ActionInvoker {
                    state: state.clone(),
                    action: name.to_string(),
                };
                (name.to_string(), invoker)
            })
            .collect();
        Self { invokers }
    }

    /// The invoker for `action`, if the table has one.
    pub fn get(&self, action: &str) -> Option<&ActionInvoker<T, P>> {
        self.invokers.get(action)
    }

    /// Whether `action` has an invoker.
    pub fn contains(&self, action: &str) -> bool {
        self.invokers.contains_key(action)
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.invokers.len()
    }

    /// Whether the transition table was empty.
    pub fn is_empty(&self) -> bool {
        self.invokers.is_empty()
    }

    /// Action names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.invokers.keys().map(String::as_str)
    }

    /// Iterate `(name, invoker)` pairs in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ActionInvoker<T, P>> {
        self.invokers.iter()
    }
}

impl<T, P> IntoIterator for Actions<T, P> {
    type Item = (String, ActionInvoker<T, P>);
    type IntoIter = btree_map::IntoIter<String, ActionInvoker<T, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.invokers.into_iter()
    }
}

impl<'a, T, P> IntoIterator for &'a Actions<T, P> {
    type Item = (&'a String, &'a ActionInvoker<T, P>);
    type IntoIter = btree_map::Iter<'a, String, ActionInvoker<T, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.invokers.iter()
    }
}

impl<T, P> fmt::Debug for Actions<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.invokers.keys()).finish()
    }
}
