//! Configuration file parsing for `rvm.toml`.
//!
//! ```toml
//! [vm]
//! register_count = 12
//! max_call_depth = 256
//! max_steps = 1000000
//! ```

use std::fs;
use std::path::Path;

use rvm_core::VmConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct RvmToml {
    #[serde(default)]
    pub vm: VmConfig,
}

impl RvmToml {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Self::parse(&text).map_err(|e| format!("invalid config {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = RvmToml::parse("").expect("parse failed");
        assert_eq!(config.vm, VmConfig::default());
    }

    #[test]
    fn partial_vm_section_keeps_other_defaults() {
        let config = RvmToml::parse("[vm]\nmax_steps = 50\n").expect("parse failed");
        assert_eq!(config.vm.max_steps, Some(50));
        assert_eq!(config.vm.register_count, 12);
        assert_eq!(config.vm.max_call_depth, None);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(RvmToml::parse("[vm]\nregister_count = \"twelve\"\n").is_err());
    }
}
