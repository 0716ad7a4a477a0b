//! Design files
//!
//! A design is the TOML description of which blocks to host and how to set
//! them up:
//!
//! ```toml
//! [[blocks]]
//! id = "freq"
//! path = "/widgets/odometer"
//! args = []                 # factory arguments, e.g. ["Vertical"] for a slider
//!
//! [blocks.params]
//! title = "Frequency"
//! size = 6
//! value_max = 999999
//! value = 1000
//! ```
//!
//! Params are applied through the block's setters in registry order, not
//! file order, so bounds are always in place before the value.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Built-in design used when none is configured: one of each block
pub const DEFAULT_DESIGN: &str = r##"# spinwheel default design

[[blocks]]
id = "frequency"
path = "/widgets/odometer"

[blocks.params]
title = "Frequency (Hz)"
size = 9
value_min = 0
value_max = 999999999
value = 100000000

[[blocks]]
id = "gain"
path = "/widgets/digit_spinner"

[blocks.params]
title = "Gain (x1000)"
size = 5
delta_min = 10
value_min = -20000
value_max = 20000
value = 1250

[[blocks]]
id = "volume"
path = "/widgets/slider"
args = ["Horizontal"]

[blocks.params]
title = "Volume"
minimum = 0.0
maximum = 100.0
step = 5.0
value = 50.0

[[blocks]]
id = "label"
path = "/widgets/text_entry"

[blocks.params]
title = "Label"
value = "spinwheel"

[[blocks]]
id = "status"
path = "/widgets/colored_box"

[blocks.params]
title = "Status"
color = "#3cb371"
"##;

/// Parsed design file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

/// One `[[blocks]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
}

impl Design {
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid design file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read design file {}", path.display()))?;
        Self::from_toml(&source).with_context(|| format!("in {}", path.display()))
    }

    /// The built-in design
    pub fn builtin() -> Result<Self> {
        Self::from_toml(DEFAULT_DESIGN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{BlockRegistry, BlockSet};
    use serde_json::json;
    use tokio::sync::mpsc;

    #[test]
    fn test_builtin_design_parses() {
        let design = Design::builtin().unwrap();
        let ids: Vec<&str> = design.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["frequency", "gain", "volume", "label", "status"]);
        assert_eq!(design.blocks[2].args, vec![json!("Horizontal")]);
        assert_eq!(design.blocks[0].params["value"], json!(100_000_000));
    }

    #[test]
    fn test_builtin_design_builds() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let design = Design::builtin().unwrap();
        let set = BlockSet::build(&BlockRegistry::with_builtin(), &design, tx).unwrap();

        assert_eq!(set.len(), 5);
        assert_eq!(set.get("frequency").unwrap().value(), json!(100_000_000));
        assert_eq!(set.get("gain").unwrap().value(), json!(1250.0));
        assert_eq!(set.get("volume").unwrap().value(), json!(50.0));
        assert_eq!(set.get("label").unwrap().value(), json!("spinwheel"));
        assert_eq!(set.get("status").unwrap().value(), json!("#3cb371"));
    }

    #[test]
    fn test_missing_sections_default() {
        let design = Design::from_toml(
            r#"
            [[blocks]]
            id = "name"
            path = "/widgets/text_entry"
            "#,
        )
        .unwrap();
        assert!(design.blocks[0].args.is_empty());
        assert!(design.blocks[0].params.is_empty());

        assert!(Design::from_toml("").unwrap().blocks.is_empty());
    }

    #[test]
    fn test_block_without_path_is_rejected() {
        let result = Design::from_toml(
            r#"
            [[blocks]]
            id = "orphan"
            "#,
        );
        assert!(result.is_err());
    }
}
