use std::collections::{BTreeMap, btree_map};

use serde::Serialize;

/// Names of the variables produced by the built-in binders.
pub mod variable {
    /// The method identifier.
    pub const METHOD: &str = "$METHOD";
    /// URN of the caller.
    pub const CALLER: &str = "$CALLER";
    /// Authority URN of the caller.
    pub const CALLER_AUTHORITY: &str = "$CALLER_AUTHORITY";
    /// URN of the slice the call targets.
    pub const SLICE_URN: &str = "$SLICE_URN";
    /// URN of the project owning that slice.
    pub const PROJECT_URN: &str = "$PROJECT_URN";
    /// Local hour, `0`-`23`.
    pub const HOUR: &str = "$HOUR";
    /// Local month, `1`-`12`.
    pub const MONTH: &str = "$MONTH";
    /// Local year.
    pub const YEAR: &str = "$YEAR";
    /// Local day of week, Monday = `0` through Sunday = `6`.
    pub const DAY_OF_WEEK: &str = "$DAY_OF_WEEK";
    /// Set to `True` when the caller's credentials verified.
    pub const SFA_AUTHORIZED: &str = "$SFA_AUTHORIZED";
    /// Stitch points requested through this aggregate, e.g. `[L1, L2]`.
    pub const REQUESTED_STITCH_POINTS: &str = "$REQUESTED_STITCH_POINTS";
}

/// A variable a best-effort binder deliberately left unbound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Withheld {
    /// The variable that was not bound.
    pub variable: String,
    /// Why it was not bound.
    pub reason: String,
}

/// Policy variable bindings produced for one call.
///
/// Values are always strings. Merging is last-write-wins, so a binder
/// configured later can override a more general one configured earlier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bindings {
    values: BTreeMap<String, String>,
    withheld: Vec<Withheld>,
}

impl Bindings {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `variable` to `value`, returning the previous value if any.
    pub fn bind(&mut self, variable: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let variable = variable.into();
        self.withheld.retain(|withheld| withheld.variable != variable);
        self.values.insert(variable, value.into())
    }

    /// Record that `variable` was left unbound on purpose.
    pub fn withhold(&mut self, variable: impl Into<String>, reason: impl Into<String>) {
        self.withheld.push(Withheld {
            variable: variable.into(),
            reason: reason.into(),
        });
    }

    /// Fold `other` into these bindings; its values win on collision.
    pub fn merge(&mut self, other: Bindings) {
        for withheld in other.withheld {
            if !self.values.contains_key(&withheld.variable) {
                self.withheld.push(withheld);
            }
        }
        for (variable, value) in other.values {
            self.bind(variable, value);
        }
    }

    pub fn get(&self, variable: &str) -> Option<&str> {
        self.values.get(variable).map(String::as_str)
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.values.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound variables and their values, ordered by variable name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(variable, value)| (variable.as_str(), value.as_str()))
    }

    /// Variables left unbound, with the reason.
    pub fn withheld(&self) -> &[Withheld] {
        &self.withheld
    }

    /// The plain variable map handed to a policy evaluator.
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut bindings = Bindings::new();
        for (variable, value) in iter {
            bindings.bind(variable, value);
        }
        bindings
    }
}

impl IntoIterator for Bindings {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
