pub mod auth_middleware;
pub mod fetcher;
pub mod headers;
pub mod log_middleware;
