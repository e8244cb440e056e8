//! Configuration layer: reads runtime settings from environment variables
//! and exposes a strongly typed config for the mock corpus and scoring.

use crate::errors::retrieval_error::RetrievalError;

/// Linear score curve: the i-th ranked document gets `base - i * step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCurve {
    pub base: f64,
    pub step: f64,
}

impl ScoreCurve {
    /// Score for rank `i`, clamped into `[0, 1]`.
    pub fn score_at(&self, i: usize) -> f64 {
        (self.base - i as f64 * self.step).clamp(0.0, 1.0)
    }
}

/// Mock corpus and scoring knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalConfig {
    /// Size of the pretend corpus; ids live in `0..total_docs`.
    pub total_docs: u32,
    /// Guarantee at least one result whenever there is a candidate, even for a zero limit.
    pub min_one_result: bool,
    /// Scores for plain retrieval mode.
    pub retrieval_scores: ScoreCurve,
    /// Scores for rerank mode.
    pub rerank_scores: ScoreCurve,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            total_docs: 60,
            min_one_result: false,
            retrieval_scores: ScoreCurve {
                base: 0.90,
                step: 0.01,
            },
            rerank_scores: ScoreCurve {
                base: 0.99,
                step: 0.02,
            },
        }
    }
}

impl RetrievalConfig {
    /// Load from the process environment.
    ///
    /// Env:
    /// - `RETRIEVAL_TOTAL_DOCS` (u32, >= 1, default 60)
    /// - `RETRIEVAL_MIN_ONE_RESULT` (bool, default false)
    pub fn from_env() -> Result<Self, RetrievalError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RetrievalConfig::from_env`], reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RetrievalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = non_empty(&lookup, "RETRIEVAL_TOTAL_DOCS") {
            cfg.total_docs = raw.parse::<u32>().map_err(|_| RetrievalError::EnvParse {
                key: "RETRIEVAL_TOTAL_DOCS".into(),
                value: raw.clone(),
            })?;
        }
        if cfg.total_docs == 0 {
            return Err(RetrievalError::InvalidConfig(
                "RETRIEVAL_TOTAL_DOCS must be at least 1".into(),
            ));
        }

        if let Some(raw) = non_empty(&lookup, "RETRIEVAL_MIN_ONE_RESULT") {
            cfg.min_one_result = match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(RetrievalError::EnvParse {
                        key: "RETRIEVAL_MIN_ONE_RESULT".into(),
                        value: raw,
                    });
                }
            };
        }

        Ok(cfg)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
