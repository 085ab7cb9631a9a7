//! Environment variable table.

use std::collections::BTreeMap;
use std::ops::Index;

/// String-to-string variable table with a fallback value for missing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    default: String,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// `default` is what indexing yields for a missing key.
    pub fn with_default(default: &str) -> Self {
        Self {
            vars: BTreeMap::new(),
            default: default.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Value of `key`, or the table default.
    pub fn get(&self, key: &str) -> &str {
        self.vars.get(key).map_or(self.default.as_str(), String::as_str)
    }

    pub fn getenv(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn getenv_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.getenv(key).unwrap_or(default)
    }

    pub fn putenv(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Index<&str> for Environment {
    type Output = str;

    fn index(&self, key: &str) -> &str {
        self.get(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            default: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_yields_default() {
        let env = Environment::new();
        assert_eq!(&env["HOME"], "");
        assert_eq!(env.getenv("HOME"), None);

        let env = Environment::with_default("?");
        assert_eq!(&env["HOME"], "?");
    }

    #[test]
    fn test_existing_key() {
        let env: Environment = [("HOME", "/home/user")].into_iter().collect();
        assert_eq!(&env["HOME"], "/home/user");
        assert_eq!(env.getenv("HOME"), Some("/home/user"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_getenv_or() {
        let env: Environment = [("SHELL", "/bin/sh")].into_iter().collect();
        assert_eq!(env.getenv_or("SHELL", "/bin/bash"), "/bin/sh");
        assert_eq!(env.getenv_or("EDITOR", "vi"), "vi");
    }

    #[test]
    fn test_putenv_then_getenv() {
        let mut env = Environment::new();
        assert!(env.is_empty());
        env.putenv("LANG", "C");
        env.putenv("LANG", "C.UTF-8");
        assert_eq!(env.getenv("LANG"), Some("C.UTF-8"));
        assert_eq!(env.iter().collect::<Vec<_>>(), vec![("LANG", "C.UTF-8")]);
    }

    #[test]
    fn test_empty_key_and_value() {
        let mut env = Environment::new();
        env.putenv("", "");
        assert_eq!(env.getenv(""), Some(""));
    }
}
