//! Typed compile properties appended to modules by load hooks.

use serde::{Deserialize, Serialize};
use sysgps_flags::FlagSet;

/// The subset of C/C++ module properties a load hook may append.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcProperties {
    /// Extra compiler arguments, in command-line order.
    #[serde(default)]
    pub cflags: Vec<String>,
}

impl CcProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` into `self`. Lists are concatenated; nothing is deduplicated.
    pub fn append(&mut self, other: CcProperties) {
        self.cflags.extend(other.cflags);
    }

    pub fn is_empty(&self) -> bool {
        self.cflags.is_empty()
    }

    /// Render as a Blueprint property fragment, e.g. `cflags: ["-DX"],`.
    pub fn to_blueprint(&self) -> String {
        let mut out = String::from("cflags: [");
        if !self.cflags.is_empty() {
            out.push('\n');
            for flag in &self.cflags {
                out.push_str("    \"");
                out.push_str(&escape_blueprint(flag));
                out.push_str("\",\n");
            }
        }
        out.push_str("],");
        out
    }
}

impl From<FlagSet> for CcProperties {
    fn from(flags: FlagSet) -> Self {
        Self {
            cflags: flags.into_vec(),
        }
    }
}

fn escape_blueprint(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_concatenates_in_order() {
        let mut props = CcProperties {
            cflags: vec!["-Wall".into(), "-DX".into()],
        };
        props.append(CcProperties {
            cflags: vec!["-DX".into(), "-DY".into()],
        });
        assert_eq!(props.cflags, vec!["-Wall", "-DX", "-DX", "-DY"]);
    }

    #[test]
    fn from_flag_set() {
        let props = CcProperties::from(sysgps_flags::resolve("chinatsp_s203_p_8q"));
        assert_eq!(
            props.cflags,
            vec!["-DCHINATSP_S203_P_8Q=\"chinatsp_s203_p_8q\""]
        );
    }

    #[test]
    fn blueprint_escapes_quotes() {
        let props = CcProperties::from(sysgps_flags::resolve("chinatsp_f202_p_8q"));
        assert_eq!(
            props.to_blueprint(),
            "cflags: [\n    \"-DCHINATSP_F202_P_8Q=\\\"chinatsp_f202_p_8q\\\"\",\n],"
        );
    }

    #[test]
    fn blueprint_empty() {
        assert_eq!(CcProperties::new().to_blueprint(), "cflags: [],");
    }

    #[test]
    fn json_shape() {
        let props = CcProperties {
            cflags: vec!["-DX".into()],
        };
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json, r#"{"cflags":["-DX"]}"#);
    }
}
