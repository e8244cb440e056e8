pub mod retrieval_error;
