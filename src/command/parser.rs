// Command-line parsing - splits a line into tokens and groups option values

use std::collections::HashMap;

/// Option values grouped under the keyword that introduced them
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    values: HashMap<String, Vec<String>>,
}

impl ParsedOptions {
    /// All values given after an option keyword
    pub fn values(&self, option: &str) -> Option<&[String]> {
        self.values.get(option).map(Vec::as_slice)
    }

    /// The value of a single-valued option
    ///
    /// Returns `None` when the option is absent or was given anything
    /// other than exactly one value.
    pub fn single(&self, option: &str) -> Option<&str> {
        match self.values(option) {
            Some([value]) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The first value of an option, ignoring any extras
    pub fn first(&self, option: &str) -> Option<&str> {
        self.values(option)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of an option joined with spaces, if any were given
    pub fn joined(&self, option: &str) -> Option<String> {
        match self.values(option) {
            Some(values) if !values.is_empty() => Some(values.join(" ")),
            _ => None,
        }
    }

    /// Check whether an option keyword appeared
    pub fn contains(&self, option: &str) -> bool {
        self.values.contains_key(option)
    }
}

/// Split a command line on whitespace
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Group tokens under the most recent option keyword
///
/// Tokens seen before any keyword are dropped. A keyword that appears
/// twice starts a fresh list.
pub fn parse_options<S: AsRef<str>>(tokens: &[S], options: &[&str]) -> ParsedOptions {
    let mut values: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<&str> = None;

    for token in tokens {
        let token = token.as_ref();
        if let Some(option) = options.iter().find(|o| **o == token) {
            values.insert(option.to_string(), Vec::new());
            current = Some(*option);
        } else if let Some(option) = current {
            if let Some(list) = values.get_mut(option) {
                list.push(token.to_string());
            }
        }
    }

    ParsedOptions { values }
}
