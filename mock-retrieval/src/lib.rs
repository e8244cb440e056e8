//! Deterministic stand-in for a retrieval/rerank backend.
//!
//! Public API:
//! - `retrieve`: pick candidate ids, score them on a fixed curve, sort, truncate.
//!
//! Nothing here touches an index: every response is a pure function of the
//! request and [`RetrievalConfig`] (apart from the measured latency).

mod candidates;
pub mod errors;
pub mod structs;

use std::cmp::Ordering;
use std::time::Instant;

use tracing::debug;

pub use candidates::{fallback_ids, normalize_query, rerank_candidates, retrieval_candidates};
pub use errors::retrieval_error::RetrievalError;
pub use structs::document::{Document, DocumentMetadata, Metrics, RetrievalResponse};
pub use structs::retrieval_config::{RetrievalConfig, ScoreCurve};
pub use structs::retrieval_request::RetrievalRequest;

const SOURCE_RETRIEVAL: &str = "info";
const SOURCE_RERANK: &str = "rerank";

/// Run one mock retrieval.
///
/// Results are always ordered by descending score and never exceed the
/// request's limit (`rerank_k` in rerank mode, `k` otherwise).
pub fn retrieve(cfg: &RetrievalConfig, req: &RetrievalRequest) -> RetrievalResponse {
    let started = Instant::now();

    let (ids, curve, source) = if req.rerank {
        (
            rerank_candidates(&req.query, cfg.total_docs),
            cfg.rerank_scores,
            SOURCE_RERANK,
        )
    } else {
        (
            retrieval_candidates(req.k, cfg.total_docs),
            cfg.retrieval_scores,
            SOURCE_RETRIEVAL,
        )
    };
    let candidates = ids.len();

    let mut limit = req.limit();
    if cfg.min_one_result {
        limit = limit.max(1);
    }

    let mut results: Vec<Document> = ids
        .into_iter()
        .enumerate()
        .map(|(i, id)| make_document(id, curve.score_at(i), &req.query, source))
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results.truncate(limit);

    let latency = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    debug!(
        target: "mock_retrieval::search",
        rerank = req.rerank,
        candidates,
        limit,
        returned = results.len(),
        latency_ms = latency,
        "retrieve: done"
    );

    RetrievalResponse {
        results,
        reranked: req.rerank,
        metrics: Metrics {
            latency,
            total_docs: cfg.total_docs,
        },
    }
}

fn make_document(id: u32, score: f64, query: &str, source: &str) -> Document {
    Document {
        id,
        score,
        content: format!("Doc {id} content for: {query}"),
        metadata: DocumentMetadata {
            source: source.to_string(),
        },
    }
}
