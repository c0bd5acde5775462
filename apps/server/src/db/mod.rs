//! Document store layer - search index access

pub mod elastic;
pub mod traits;

pub use elastic::ElasticStore;
pub use traits::{DocumentStore, SearchHits, TotalHits, TotalRelation};
