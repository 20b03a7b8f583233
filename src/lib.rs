mod api;
pub mod args;
mod browser;
pub mod commands;
mod error;
mod model;
mod source;
#[cfg(test)]
mod test;

pub use api::{Backend, CachedBackend, MemoryBackend, MemoryCache, RequestCache};
pub use browser::{Browser, DisplaySource};
pub use error::Error;
pub use error::Result;
pub use model::{Amount, Employee, PaginatedResponse, Transaction};
