//! Public SDK for the content edge proxy.
//!
//! This crate re-exports all platform functionality:
//!
//! ```ignore
//! use edge_sdk::prelude::*;
//!
//! async fn serve<S: KvStore, C: HttpClient>(
//!     store: &S,
//!     firestore: &FirestoreClient<C>,
//!     ctx: &RequestContext,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let logger = StructuredLogger::new(ctx.request_id.clone());
//!     let collection = presets::content_sections().resolve(&ctx.path)?;
//!     let key = CacheKey::for_collection(collection);
//!
//!     if store.get(key.as_str()).await?.is_none() {
//!         let documents = firestore.list_documents(collection).await?;
//!         logger
//!             .info_builder("fetched from upstream")
//!             .field("collection", collection)
//!             .field_i64("documents", documents.len() as i64)
//!             .emit();
//!         let encoded = serde_json::to_string(&documents)?;
//!         store.set_ex(key.as_str(), &encoded, CachePolicy::default().ttl).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub use edge_cache;
pub use edge_core;
pub use edge_data;
pub use edge_observability;
pub use edge_security;

/// Prelude for convenient imports.
pub mod prelude {
    pub use edge_cache::*;
    pub use edge_core::*;
    pub use edge_data::*;
    pub use edge_observability::*;
    pub use edge_security::*;
}
