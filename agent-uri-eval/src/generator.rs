//! Synthetic data generation for evaluation.

use agent_uri::CapabilityPath;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Configuration for synthetic capability tree generation.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Maximum depth of the tree.
    pub max_depth: usize,
    /// Branching factor (children per node).
    pub branching_factor: usize,
    /// Probability of terminating at each level.
    pub termination_prob: f64,
    /// Vocabulary for path segments.
    pub vocabulary: Vec<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            branching_factor: 5,
            termination_prob: 0.3,
            vocabulary: default_vocabulary(),
        }
    }
}

/// Returns default vocabulary for path segments.
fn default_vocabulary() -> Vec<String> {
    vec![
        // Categories
        "assistant",
        "workflow",
        "data",
        "system",
        "api",
        "file",
        "network",
        "security",
        "storage",
        "compute",
        "analytics",
        "ml",
        "vision",
        "nlp",
        // Actions
        "search",
        "read",
        "write",
        "delete",
        "update",
        "list",
        "create",
        "process",
        "analyze",
        "transform",
        "validate",
        "export",
        "import",
        // Domains
        "web",
        "email",
        "calendar",
        "database",
        "cache",
        "queue",
        "stream",
        "document",
        "image",
        "audio",
        "video",
        "code",
        "config",
        "log",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Generates synthetic capability paths.
///
/// Uses a seeded RNG for deterministic, reproducible output.
pub struct PathGenerator {
    rng: ChaCha8Rng,
    config: TreeConfig,
}

impl PathGenerator {
    /// Creates a new generator with the given seed.
    #[must_use]
    pub fn new(seed: u64, config: TreeConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        }
    }

    /// Creates a generator with default config.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, TreeConfig::default())
    }

    /// Generates N random capability paths.
    pub fn generate(&mut self, count: usize) -> Vec<CapabilityPath> {
        (0..count).filter_map(|_| self.generate_one()).collect()
    }

    /// Generates a single random capability path.
    fn generate_one(&mut self) -> Option<CapabilityPath> {
        let depth = self.random_depth();
        let segments: Vec<String> = (0..depth).map(|_| self.random_segment()).collect();

        let segment_strs: Vec<&str> = segments.iter().map(String::as_str).collect();
        CapabilityPath::try_from_strs(&segment_strs).ok()
    }

    /// Generates a random depth for a path.
    fn random_depth(&mut self) -> usize {
        let mut depth = 1;
        while depth < self.config.max_depth {
            if self.rng.gen_range(0.0..1.0) < self.config.termination_prob {
                break;
            }
            depth += 1;
        }
        depth
    }

    /// Selects a random segment from the vocabulary.
    fn random_segment(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.config.vocabulary.len());
        self.config.vocabulary[idx].clone()
    }

    /// Generates paths at various depths for a hierarchical tree.
    ///
    /// Returns paths organized by prefix to enable realistic discovery queries.
    pub fn generate_hierarchical(&mut self, count: usize) -> Vec<CapabilityPath> {
        let mut paths = Vec::with_capacity(count);

        // Generate some top-level categories
        let num_categories = (count / 100).clamp(5, 50);
        let categories: Vec<String> = (0..num_categories)
            .map(|_| self.random_segment())
            .collect();

        for _ in 0..count {
            // Pick a random category as prefix
            let cat_idx = self.rng.gen_range(0..categories.len());
            let category = &categories[cat_idx];

            // Generate additional depth
            let extra_depth = self.random_depth().saturating_sub(1);
            let mut segments = vec![category.clone()];
            for _ in 0..extra_depth {
                segments.push(self.random_segment());
            }

            let segment_strs: Vec<&str> = segments.iter().map(String::as_str).collect();
            if let Ok(path) = CapabilityPath::try_from_strs(&segment_strs) {
                paths.push(path);
            }
        }

        paths
    }
}

/// Generates agent IDs with a prefix.
pub struct AgentIdGenerator {
    prefix: String,
    counter: u64,
}

impl AgentIdGenerator {
    /// Creates a new generator with the given prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Generates the next agent ID.
    pub fn generate_next(&mut self) -> String {
        self.counter += 1;
        format!("{}_{:08x}", self.prefix, self.counter)
    }

    /// Resets the counter.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
