pub mod document;
pub mod retrieval_config;
pub mod retrieval_request;
