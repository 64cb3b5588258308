// Search Module
pub mod builder;
pub mod descriptor;
pub mod dispatcher;
pub mod elasticsearch;
pub mod mode;
pub mod schema;
pub mod service_trait;

pub use builder::KnnSettings;
pub use descriptor::{KnnQuery, LexicalQuery, QueryDescriptor, RankFusion};
pub use dispatcher::SearchDispatcher;
pub use elasticsearch::ElasticsearchClient;
pub use mode::SearchMode;
pub use schema::{Document, Query, SearchResult};
pub use service_trait::SearchBackend;
