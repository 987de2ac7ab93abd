//! Model pool and selection policy.

use rand::seq::SliceRandom;

/// Used when the pool is empty and no explicit model was asked for.
pub const FALLBACK_MODEL: &str = "llama3-70b-8192";

/// How to pick a model from the pool for one call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelSelector {
    /// First entry of a freshly shuffled copy of the pool.
    #[default]
    First,
    /// Uniform random choice.
    Random,
    /// This exact model id, pool ignored.
    Explicit(String),
}

impl ModelSelector {
    /// `""`/`first` → First, `random` → Random, anything else is an explicit model id.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" | "first" => ModelSelector::First,
            "random" => ModelSelector::Random,
            other => ModelSelector::Explicit(other.to_string()),
        }
    }
}

/// Interchangeable model ids, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelPool {
    models: Vec<String>,
}

impl ModelPool {
    pub fn new(models: Vec<String>) -> Self {
        Self {
            models: models
                .into_iter()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Parses a comma-separated list; blank entries are dropped.
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(',').map(str::to_string).collect())
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Picks the model id for one call.
    pub fn select(&self, selector: &ModelSelector) -> String {
        let mut rng = rand::thread_rng();
        let picked = match selector {
            ModelSelector::Explicit(id) => return id.clone(),
            ModelSelector::First => {
                let mut shuffled = self.models.clone();
                shuffled.shuffle(&mut rng);
                shuffled.into_iter().next()
            }
            ModelSelector::Random => self.models.choose(&mut rng).cloned(),
        };
        picked.unwrap_or_else(|| FALLBACK_MODEL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector() {
        assert_eq!(ModelSelector::parse(""), ModelSelector::First);
        assert_eq!(ModelSelector::parse("first"), ModelSelector::First);
        assert_eq!(ModelSelector::parse(" random "), ModelSelector::Random);
        assert_eq!(
            ModelSelector::parse("mixtral-8x7b-32768"),
            ModelSelector::Explicit("mixtral-8x7b-32768".to_string())
        );
    }

    #[test]
    fn test_from_csv_drops_blanks() {
        let pool = ModelPool::from_csv(" llama3-8b-8192, ,gemma-7b-it,");
        assert_eq!(pool.models(), &["llama3-8b-8192", "gemma-7b-it"]);
        assert!(ModelPool::from_csv("").is_empty());
    }

    #[test]
    fn test_empty_pool_falls_back() {
        let pool = ModelPool::default();
        assert_eq!(pool.select(&ModelSelector::First), FALLBACK_MODEL);
        assert_eq!(pool.select(&ModelSelector::Random), FALLBACK_MODEL);
    }

    #[test]
    fn test_explicit_ignores_pool() {
        let pool = ModelPool::from_csv("a,b");
        assert_eq!(pool.select(&ModelSelector::Explicit("c".into())), "c");
        assert_eq!(ModelPool::default().select(&ModelSelector::Explicit("c".into())), "c");
    }

    #[test]
    fn test_selection_stays_in_pool() {
        let pool = ModelPool::from_csv("a,b,c");
        for _ in 0..50 {
            assert!(pool.models().contains(&pool.select(&ModelSelector::First)));
            assert!(pool.models().contains(&pool.select(&ModelSelector::Random)));
        }
    }

    #[test]
    fn test_single_model_pool_is_deterministic() {
        let pool = ModelPool::from_csv("only");
        assert_eq!(pool.select(&ModelSelector::First), "only");
        assert_eq!(pool.select(&ModelSelector::Random), "only");
    }
}
