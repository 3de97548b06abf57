// Adapters layer: concrete implementations for external systems (GitHub API, filesystem).

pub mod http;
pub mod storage;
