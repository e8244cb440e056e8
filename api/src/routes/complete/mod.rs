pub mod complete_request;
pub mod complete_route;
