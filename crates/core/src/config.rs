use formexpr_expr::{DEFAULT_MAX_DEPTH, ParseOptions};
use serde::{Deserialize, Serialize};

/// Tuning knobs for an [`ExpressionEngine`](crate::ExpressionEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// The maximum nesting of parentheses, function calls and `!` an
    /// expression may contain, and the maximum height of its parsed tree
    /// (each chained `&&`, `||` or comparison adds a level). Deeper input is
    /// rejected as a syntax error instead of exhausting the stack.
    ///
    /// Defaults to `64`.
    pub max_depth: usize,

    /// The maximum number of parsed expressions kept, keyed by exact source
    /// text. When the cache is full it is reset. `0` disables caching.
    ///
    /// Defaults to `1024`.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cache_capacity: 1024,
        }
    }
}

impl EngineConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_partial_config() {
        let config: EngineConfig = serde_json::from_value(json!({ "cacheCapacity": 0 })).unwrap();
        assert_eq!(config.cache_capacity, 0);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }
}
