use formexpr_expr::{ExprError, Expression};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// The outcome of parsing one source string. Failures are cached too, since
/// parsing is a pure function of the source.
pub type Compiled = Result<Arc<Expression>, ExprError>;

/// Parsed expressions keyed by exact source text, shared between threads.
pub struct ExpressionCache {
    entries: RwLock<HashMap<String, Compiled>>,
    capacity: usize,
}

impl ExpressionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    pub fn get(&self, source: &str) -> Option<Compiled> {
        self.entries.read().ok()?.get(source).cloned()
    }

    pub fn insert(&self, source: &str, compiled: Compiled) {
        let Ok(mut entries) = self.entries.write() else {
            log::warn!("Failed to acquire write lock on expression cache");
            return;
        };
        if entries.len() >= self.capacity && !entries.contains_key(source) {
            log::debug!(
                "Expression cache reached {} entries, resetting",
                entries.len()
            );
            entries.clear();
        }
        entries.insert(source.to_string(), compiled);
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl std::fmt::Debug for ExpressionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formexpr_expr::parse_expression;

    #[test]
    fn test_get_after_insert() {
        let cache = ExpressionCache::new(4);
        assert!(cache.get("a").is_none());

        cache.insert("a", parse_expression("a").map(Arc::new));
        cache.insert("b &&", parse_expression("b &&").map(Arc::new));

        assert!(matches!(cache.get("a"), Some(Ok(_))));
        assert!(matches!(cache.get("b &&"), Some(Err(_))));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_resets_when_full() {
        let cache = ExpressionCache::new(2);
        for source in ["a", "b"] {
            cache.insert(source, parse_expression(source).map(Arc::new));
        }
        assert_eq!(cache.len(), 2);

        // Re-inserting an existing key does not trigger a reset.
        cache.insert("a", parse_expression("a").map(Arc::new));
        assert_eq!(cache.len(), 2);

        cache.insert("c", parse_expression("c").map(Arc::new));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("a").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_clear() {
        let cache = ExpressionCache::new(8);
        cache.insert("x", parse_expression("x").map(Arc::new));
        cache.clear();
        assert!(cache.is_empty());
    }
}
