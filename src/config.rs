use serde::{Deserialize, Serialize};

use crate::scan::DEFAULT_THRESHOLD;

/// How a pointer interaction picks the cells it affects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectStyle {
    /// Down clears the tapped cell's whole row and column; Up does nothing.
    #[default]
    Rocket,
    /// Down pushes the 24 surrounding cells out; Up brings them back.
    Push,
}

/// Board parameters. Every field has a default so partial JSON bodies and
/// CLI overrides only need to name what they change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub width: usize,
    pub height: usize,
    pub seed: u64,

    /// A component counts toward the scan total when its size exceeds this.
    pub component_threshold: usize,

    pub effect: EffectStyle,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            seed: 42,
            component_threshold: DEFAULT_THRESHOLD,
            effect: EffectStyle::Rocket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let p: Params = serde_json::from_str(r#"{"width": 12, "effect": "push"}"#).unwrap();
        assert_eq!(p.width, 12);
        assert_eq!(p.height, 8);
        assert_eq!(p.component_threshold, 2);
        assert_eq!(p.effect, EffectStyle::Push);
    }
}
