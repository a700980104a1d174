//! Route metadata declared on controller actions.

/// Verbs a route accepts when none are given.
pub const DEFAULT_METHODS: &[&str] = &["GET"];

/// A path pattern plus the verbs it accepts.
///
/// The path is a regular-expression body; it is anchored to the full URI
/// when compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    methods: Vec<String>,
}

impl Route {
    /// A `GET` route.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_methods(path, DEFAULT_METHODS.iter().copied())
    }

    /// A route accepting the given verbs. Duplicates are dropped, order kept.
    pub fn with_methods<I, S>(path: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for method in methods {
            let method = method.into();
            if !unique.contains(&method) {
                unique.push(method);
            }
        }

        Self {
            path: path.into(),
            methods: unique,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Exact, case-sensitive verb membership.
    pub fn accepts(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}
