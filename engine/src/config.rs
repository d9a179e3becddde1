use meal_catalog::CatalogConfig;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// How the unfiltered ("no query") view is populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum DefaultSample {
    /// `count` random records fetched in parallel
    Random {
        #[serde(default = "default_random_count")]
        count: usize,
    },
    /// Random records topped up with the first few records of some seed
    /// categories, deduplicated and capped
    Mixed {
        #[serde(default = "default_mixed_random")]
        random: usize,
        #[serde(default = "default_seed_categories")]
        seed_categories: Vec<String>,
        #[serde(default = "default_per_category")]
        per_category: usize,
        #[serde(default = "default_random_count")]
        cap: usize,
    },
}

fn default_random_count() -> usize {
    8
}

fn default_mixed_random() -> usize {
    4
}

fn default_seed_categories() -> Vec<String> {
    ["Beef", "Chicken", "Dessert"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_per_category() -> usize {
    2
}

impl Default for DefaultSample {
    fn default() -> Self {
        DefaultSample::Random {
            count: default_random_count(),
        }
    }
}

impl DefaultSample {
    pub fn mixed() -> Self {
        DefaultSample::Mixed {
            random: default_mixed_random(),
            seed_categories: default_seed_categories(),
            per_category: default_per_category(),
            cap: default_random_count(),
        }
    }

    /// Upstream requests that run one after another while sampling: Mixed
    /// hydrates its seeded picks only after the category filters return.
    pub fn sequential_rounds(&self) -> u32 {
        match self {
            DefaultSample::Random { .. } => 1,
            DefaultSample::Mixed { .. } => 2,
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            DefaultSample::Random { count } => {
                if *count == 0 {
                    return Err("default_sample.count must be > 0".to_string());
                }
            }
            DefaultSample::Mixed {
                random,
                seed_categories,
                per_category,
                cap,
            } => {
                if *random == 0 && (seed_categories.is_empty() || *per_category == 0) {
                    return Err("mixed default sample would never fetch anything".to_string());
                }
                if *cap == 0 {
                    return Err("default_sample.cap must be > 0".to_string());
                }
            }
        }
        Ok(())
    }
}

/// Configuration for the aggregation and navigation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Quiet period after the last query change before a fetch is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default)]
    pub default_sample: DefaultSample,
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            debounce_ms: default_debounce_ms(),
            default_sample: DefaultSample::default(),
        }
    }
}

impl EngineConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.catalog.validate()?;
        self.default_sample.validate()?;
        Ok(())
    }

    /// Landing-page flavour: mixed default sample
    pub fn landing() -> Self {
        Self {
            default_sample: DefaultSample::mixed(),
            ..Default::default()
        }
    }
}
