//! Pattern-set configuration loader.
//!
//! Custom notification patterns are declared in a YAML file and appended to
//! a registry behind the built-ins. File order is priority order.
//!
//! ```yaml
//! patterns:
//!   - name: acme_card
//!     regex: 'ACME: \$(?P<amount>\d+\.\d{2}) at (?P<merchant>.+?) on (?P<date>\d{4}-\d{2}-\d{2})'
//!     direction: debit
//!     currency: USD
//!   - name: acme_refund
//!     regex: 'ACME refund of \$(?P<amount>\d+\.\d{2})'
//!     direction: credit
//!     currency: USD
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::patterns::custom::ConfiguredPattern;
use crate::record::Direction;
use crate::registry::PatternRegistry;

/// One pattern definition from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDef {
    /// Pattern name (unique identifier)
    pub name: String,

    /// Regular expression with named capture groups; `amount` is mandatory,
    /// `merchant`, `date`, `verb` and `vpa` are optional
    pub regex: String,

    /// Fixed direction when no `verb` group captures (default: debit)
    #[serde(default)]
    pub direction: Option<Direction>,

    /// ISO 4217 currency code (default: USD)
    #[serde(default)]
    pub currency: Option<String>,

    /// Provider label for produced records (default: the pattern name)
    #[serde(default)]
    pub provider: Option<String>,

    /// Match against the whitespace-normalized body instead of the raw one
    #[serde(default)]
    pub normalize: bool,
}

/// A set of pattern definitions, in priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSetConfig {
    pub patterns: Vec<PatternDef>,
}

impl PatternSetConfig {
    /// Parse a pattern set from YAML text.
    ///
    /// # Errors
    /// Returns error if the YAML is malformed or any definition fails
    /// validation (empty or duplicate name, invalid regex, missing amount
    /// group).
    pub fn from_yaml(contents: &str) -> Result<Self, String> {
        let config: PatternSetConfig = serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse pattern set YAML: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Load a pattern set from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read pattern file {}: {}", path.display(), e))?;

        Self::from_yaml(&contents)
    }

    /// Validate every definition without building a registry.
    pub fn validate(&self) -> Result<(), String> {
        if self.patterns.is_empty() {
            return Err("Pattern set contains no patterns".to_string());
        }

        let mut seen = HashSet::new();
        for def in &self.patterns {
            if !seen.insert(def.name.as_str()) {
                return Err(format!("Duplicate pattern name '{}'", def.name));
            }

            // Compiling the definition performs the structural checks
            ConfiguredPattern::from_def(def).map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    /// Number of definitions in the set.
    pub fn count(&self) -> usize {
        self.patterns.len()
    }

    /// Append every configured pattern to a registry, in file order.
    pub fn apply_to(&self, registry: &mut PatternRegistry) -> Result<(), String> {
        for def in &self.patterns {
            let pattern = ConfiguredPattern::from_def(def).map_err(|e| e.to_string())?;
            registry
                .register(Box::new(pattern))
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}
