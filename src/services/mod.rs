// Service exports
pub mod appwrite;
pub mod cache;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use cache::{CacheKey, CacheManager, CacheStats};
