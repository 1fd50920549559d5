//! Cache namespace and key qualification

use crate::constants::{GLOB_METACHARACTERS, SCAN_WILDCARD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix prepended to every key of one logical cache
///
/// Two caches with different namespaces sharing a store never observe each
/// other's keys. The prefix is a naming convention only, not an access control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace from a prefix string
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self(prefix.into())
    }

    /// The raw prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Qualify a key: `namespace + key`
    pub fn qualify(&self, key: &str) -> String {
        let mut qualified = String::with_capacity(self.0.len() + key.len());
        qualified.push_str(&self.0);
        qualified.push_str(key);
        qualified
    }

    /// Scan pattern matching every key of this namespace starting with `prefix`
    ///
    /// Glob metacharacters in the namespace or prefix are escaped so the
    /// pattern only ever matches by literal prefix.
    pub fn scan_pattern(&self, prefix: &str) -> String {
        let mut pattern = glob_escape(&self.qualify(prefix));
        pattern.push_str(SCAN_WILDCARD);
        pattern
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Namespace {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}

impl From<String> for Namespace {
    fn from(prefix: String) -> Self {
        Self(prefix)
    }
}

/// Backslash-escape glob metacharacters
pub fn glob_escape(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if GLOB_METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
