pub mod aggregate;
pub mod export;
pub mod http_client;
pub mod prompt;
pub mod schedule;
pub mod tba_fetch;
