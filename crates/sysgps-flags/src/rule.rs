//! Flag rules, the built-in rule table, and resolved flag sets.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::resolve::resolve_with;

/// A single device-to-flag mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagRule {
    /// Exact device name this rule applies to (e.g., "chinatsp_s203_p_8q").
    pub device: Cow<'static, str>,
    /// Flag appended when the device matches (e.g., a `-D` definition).
    pub flag: Cow<'static, str>,
}

impl FlagRule {
    /// Create a rule from owned or borrowed strings.
    pub fn new(device: impl Into<Cow<'static, str>>, flag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            device: device.into(),
            flag: flag.into(),
        }
    }

    /// Create a rule from string literals, usable in `static` tables.
    pub const fn builtin(device: &'static str, flag: &'static str) -> Self {
        Self {
            device: Cow::Borrowed(device),
            flag: Cow::Borrowed(flag),
        }
    }

    /// Whether this rule applies to `device`. Case-sensitive, exact.
    pub fn matches(&self, device: &str) -> bool {
        self.device == device
    }
}

/// Rules compiled into the resolver, in resolution order.
///
/// Each entry is spelled out literally; macro names are not derived from
/// device names.
pub static BUILTIN_RULES: &[FlagRule] = &[
    FlagRule::builtin(
        "chinatsp_s203_p_8q",
        "-DCHINATSP_S203_P_8Q=\"chinatsp_s203_p_8q\"",
    ),
    FlagRule::builtin(
        "chinatsp_f202_p_8q",
        "-DCHINATSP_F202_P_8Q=\"chinatsp_f202_p_8q\"",
    ),
];

/// Ordered flags produced by resolution.
///
/// Order is compiler argument order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet(Vec<String>);

impl FlagSet {
    /// An empty flag set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a flag, keeping insertion order.
    pub fn push(&mut self, flag: impl Into<String>) {
        self.0.push(flag.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for FlagSet {
    fn from(flags: Vec<String>) -> Self {
        Self(flags)
    }
}

impl IntoIterator for FlagSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// An ordered, owned rule table.
///
/// Stored on disk as a list of `[[rule]]` tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    #[serde(rename = "rule", default)]
    rules: Vec<FlagRule>,
}

impl RuleTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding a copy of [`BUILTIN_RULES`].
    pub fn builtin() -> Self {
        Self::from_rules(BUILTIN_RULES.to_vec())
    }

    pub fn from_rules(rules: Vec<FlagRule>) -> Self {
        Self { rules }
    }

    /// Append a rule after all existing rules.
    pub fn push(&mut self, rule: FlagRule) {
        self.rules.push(rule);
    }

    /// Append every rule of `other`, preserving its order.
    pub fn extend(&mut self, other: RuleTable) {
        self.rules.extend(other.rules);
    }

    pub fn rules(&self) -> &[FlagRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct device names in order of first appearance.
    pub fn devices(&self) -> Vec<&str> {
        let mut devices: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !devices.contains(&&*rule.device) {
                devices.push(&rule.device);
            }
        }
        devices
    }

    /// Resolve `device` against this table.
    pub fn resolve(&self, device: &str) -> FlagSet {
        resolve_with(&self.rules, device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_order() {
        let devices: Vec<&str> = BUILTIN_RULES.iter().map(|r| &*r.device).collect();
        assert_eq!(devices, vec!["chinatsp_s203_p_8q", "chinatsp_f202_p_8q"]);
    }

    #[test]
    fn rule_match_is_exact() {
        let rule = FlagRule::new("board_a", "-DBOARD_A");
        assert!(rule.matches("board_a"));
        assert!(!rule.matches("BOARD_A"));
        assert!(!rule.matches("board_a "));
        assert!(!rule.matches(""));
    }

    #[test]
    fn extend_appends_after_existing() {
        let mut table = RuleTable::builtin();
        table.extend(RuleTable::from_rules(vec![FlagRule::new(
            "chinatsp_s203_p_8q",
            "-DEXTRA",
        )]));
        assert_eq!(table.len(), 3);
        assert_eq!(table.rules()[2].flag, "-DEXTRA");
    }

    #[test]
    fn devices_are_distinct_in_first_seen_order() {
        let table = RuleTable::from_rules(vec![
            FlagRule::new("b", "-DB1"),
            FlagRule::new("a", "-DA"),
            FlagRule::new("b", "-DB2"),
        ]);
        assert_eq!(table.devices(), vec!["b", "a"]);
    }

    #[test]
    fn flag_set_serializes_as_list() {
        let mut flags = FlagSet::new();
        flags.push("-DX");
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"["-DX"]"#);
    }

    #[test]
    fn empty_table() {
        let table = RuleTable::new();
        assert!(table.is_empty());
        assert!(table.resolve("chinatsp_s203_p_8q").is_empty());
    }
}
