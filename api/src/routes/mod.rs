pub mod complete;
pub mod health_route;
pub mod json_body;
pub mod method_fallback;
pub mod retrieve;
