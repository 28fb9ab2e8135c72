pub mod client;
pub mod fetch;
pub mod search;

pub use client::PrehrajClient;
pub use fetch::PageFetcher;
