//! Priority-ordered pattern registry.
//!
//! Patterns are tried in registration order and the first success wins, so
//! registration order is priority order. The strict fixed template sits
//! first in the built-in set and the loose generic fallback last.

use indexmap::IndexMap;

use crate::pattern::{MessagePattern, PatternError};
use crate::patterns::bank::{BankDebitAlert, BankUpiAlert};
use crate::patterns::spent::SpentTemplate;
use crate::patterns::upi::{UpiAmountVerb, UpiGeneric, UpiYouPaid};

/// Ordered collection of notification patterns.
pub struct PatternRegistry {
    patterns: IndexMap<String, Box<dyn MessagePattern>>,
}

impl PatternRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            patterns: IndexMap::new(),
        }
    }

    /// Registry holding only the fixed spent-template. This reproduces the
    /// single-pattern behavior exactly.
    pub fn with_default() -> Result<Self, PatternError> {
        let mut registry = Self::new();
        registry.register(Box::new(SpentTemplate::new()?))?;
        Ok(registry)
    }

    /// Registry holding every built-in pattern: the fixed template first,
    /// then the bank alert shapes, the UPI app shapes, and the generic
    /// fallback last.
    pub fn builtin() -> Result<Self, PatternError> {
        let mut registry = Self::with_default()?;
        registry.register(Box::new(BankUpiAlert::new()?))?;
        registry.register(Box::new(BankDebitAlert::new()?))?;
        registry.register(Box::new(UpiYouPaid::new()?))?;
        registry.register(Box::new(UpiAmountVerb::new()?))?;
        registry.register(Box::new(UpiGeneric::new()?))?;
        Ok(registry)
    }

    /// Append a pattern at the lowest priority.
    ///
    /// # Errors
    /// Rejects a pattern whose name is already registered.
    pub fn register(&mut self, pattern: Box<dyn MessagePattern>) -> Result<(), PatternError> {
        let name = pattern.name().to_string();
        if self.patterns.contains_key(&name) {
            return Err(PatternError::DuplicateName(name));
        }
        self.patterns.insert(name, pattern);
        Ok(())
    }

    /// Check whether a pattern is registered.
    pub fn has_pattern(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Pattern names in priority order.
    pub fn pattern_names(&self) -> Vec<&str> {
        self.patterns.keys().map(|k| k.as_str()).collect()
    }

    /// Patterns in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn MessagePattern> + '_ {
        self.patterns.values().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::RawMessage;
    use crate::record::{ExtractError, TransactionRecord};

    struct StubPattern {
        name: &'static str,
    }

    impl MessagePattern for StubPattern {
        fn name(&self) -> &str {
            self.name
        }

        fn try_extract(
            &self,
            _msg: &RawMessage,
        ) -> Result<Option<TransactionRecord>, ExtractError> {
            Ok(None)
        }
    }

    #[test]
    fn test_registration_order_is_priority_order() {
        let mut registry = PatternRegistry::new();
        registry.register(Box::new(StubPattern { name: "first" })).unwrap();
        registry.register(Box::new(StubPattern { name: "second" })).unwrap();
        registry.register(Box::new(StubPattern { name: "third" })).unwrap();

        assert_eq!(registry.pattern_names(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = PatternRegistry::new();
        registry.register(Box::new(StubPattern { name: "dup" })).unwrap();

        let err = registry.register(Box::new(StubPattern { name: "dup" })).unwrap_err();
        assert!(matches!(err, PatternError::DuplicateName(name) if name == "dup"));
    }

    #[test]
    fn test_with_default_is_single_pattern() {
        let registry = PatternRegistry::with_default().unwrap();
        assert_eq!(registry.pattern_names(), vec!["spent"]);
    }

    #[test]
    fn test_builtin_order() {
        let registry = PatternRegistry::builtin().unwrap();
        let names = registry.pattern_names();
        assert_eq!(names.first(), Some(&"spent"));
        assert_eq!(names.last(), Some(&"upi_generic"));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_empty_registry() {
        let registry = PatternRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.has_pattern("spent"));
    }
}
