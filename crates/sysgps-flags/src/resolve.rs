//! Device flag resolution.

use crate::rule::{FlagRule, FlagSet, BUILTIN_RULES};

/// Resolve the flags for `device` against the built-in rule table.
///
/// Never fails: an empty, unknown, or differently-cased device name yields
/// an empty [`FlagSet`].
pub fn resolve(device: &str) -> FlagSet {
    resolve_with(BUILTIN_RULES, device)
}

/// Resolve the flags for `device` against an arbitrary ordered rule sequence.
///
/// Every rule whose device equals `device` contributes its flag, in rule
/// order.
pub fn resolve_with<'r, I>(rules: I, device: &str) -> FlagSet
where
    I: IntoIterator<Item = &'r FlagRule>,
{
    let mut flags = FlagSet::new();
    for rule in rules {
        if rule.matches(device) {
            tracing::trace!(device, flag = %rule.flag, "rule matched");
            flags.push(&*rule.flag);
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s203_resolves_single_flag() {
        let flags = resolve("chinatsp_s203_p_8q");
        assert_eq!(
            flags.into_vec(),
            vec!["-DCHINATSP_S203_P_8Q=\"chinatsp_s203_p_8q\"".to_string()]
        );
    }

    #[test]
    fn f202_resolves_single_flag() {
        let flags = resolve("chinatsp_f202_p_8q");
        assert_eq!(
            flags.into_vec(),
            vec!["-DCHINATSP_F202_P_8Q=\"chinatsp_f202_p_8q\"".to_string()]
        );
    }

    #[test]
    fn unknown_device_is_empty() {
        assert!(resolve("generic_x86_64").is_empty());
        assert!(resolve("").is_empty());
    }

    #[test]
    fn multiple_matches_keep_rule_order() {
        let rules = vec![
            FlagRule::new("board", "-DFIRST"),
            FlagRule::new("other", "-DOTHER"),
            FlagRule::new("board", "-DSECOND"),
            FlagRule::new("board", "-DFIRST"),
        ];
        let flags = resolve_with(&rules, "board");
        assert_eq!(
            flags.into_vec(),
            vec![
                "-DFIRST".to_string(),
                "-DSECOND".to_string(),
                "-DFIRST".to_string()
            ]
        );
    }
}
