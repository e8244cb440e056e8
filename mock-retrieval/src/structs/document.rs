use serde::Serialize;

/// A fabricated search hit. Serialized as-is into HTTP responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Candidate id in `0..total_docs`.
    pub id: u32,

    /// Synthetic relevance in `[0, 1]`.
    pub score: f64,

    /// `"Doc {id} content for: {query}"`.
    pub content: String,

    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetadata {
    /// `"info"` for plain retrieval, `"rerank"` for reranked hits.
    pub source: String,
}

/// Timing and corpus info attached to every response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Wall-clock handling time in milliseconds.
    pub latency: u64,
    pub total_docs: u32,
}

/// Response envelope for the retrieval endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalResponse {
    pub results: Vec<Document>,
    pub reranked: bool,
    pub metrics: Metrics,
}
