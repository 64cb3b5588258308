//! Structured query descriptors and their Elasticsearch request bodies.
//!
//! A descriptor has exactly one shape per search mode. The body rendering is
//! the only place that knows the store's JSON layout:
//!
//! - `MatchAll` → `{"query":{"match_all":{}}}`
//! - `Lexical`  → `{"query":{"multi_match":{"query":..,"fields":[..]}}}`
//! - `Knn`      → `{"knn":{"field":..,"query_vector":[..],"k":..,"num_candidates":..}}`
//! - `Hybrid`   → both of the above plus `{"rank":{"rrf":{}}}`

use serde::Serialize;

use crate::embeddings::EmbeddingVector;

/// Fields searched by lexical matching
pub const LEXICAL_FIELDS: [&str; 2] = ["summary", "description"];

/// Field holding each document's embedding
pub const VECTOR_FIELD: &str = "embedding_vector";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexicalQuery {
    pub query: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnnQuery {
    pub field: String,
    pub query_vector: EmbeddingVector,
    pub k: usize,
    pub num_candidates: usize,
}

/// How the backend merges the lexical and vector rankings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankFusion {
    ReciprocalRank,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryDescriptor {
    MatchAll,
    Lexical(LexicalQuery),
    Knn(KnnQuery),
    Hybrid {
        lexical: LexicalQuery,
        knn: KnnQuery,
        fusion: RankFusion,
    },
}

impl QueryDescriptor {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryDescriptor::MatchAll => "match_all",
            QueryDescriptor::Lexical(_) => "multi_match",
            QueryDescriptor::Knn(_) => "knn",
            QueryDescriptor::Hybrid { .. } => "hybrid",
        }
    }

    pub fn lexical(&self) -> Option<&LexicalQuery> {
        match self {
            QueryDescriptor::Lexical(lexical) | QueryDescriptor::Hybrid { lexical, .. } => {
                Some(lexical)
            }
            _ => None,
        }
    }

    pub fn knn(&self) -> Option<&KnnQuery> {
        match self {
            QueryDescriptor::Knn(knn) | QueryDescriptor::Hybrid { knn, .. } => Some(knn),
            _ => None,
        }
    }

    pub fn to_body(&self) -> SearchBody<'_> {
        match self {
            QueryDescriptor::MatchAll => SearchBody {
                query: Some(QueryClause::MatchAll {}),
                ..SearchBody::default()
            },
            QueryDescriptor::Lexical(lexical) => SearchBody {
                query: Some(QueryClause::MultiMatch(lexical)),
                ..SearchBody::default()
            },
            QueryDescriptor::Knn(knn) => SearchBody {
                knn: Some(knn),
                ..SearchBody::default()
            },
            QueryDescriptor::Hybrid {
                lexical,
                knn,
                fusion,
            } => SearchBody {
                query: Some(QueryClause::MultiMatch(lexical)),
                knn: Some(knn),
                rank: Some(RankClause::from(*fusion)),
                size: None,
            },
        }
    }
}

/// Request body for `POST /{index}/_search`
#[derive(Debug, Default, Serialize)]
pub struct SearchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<QueryClause<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    knn: Option<&'a KnnQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<RankClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
}

impl SearchBody<'_> {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Debug, Serialize)]
enum QueryClause<'a> {
    #[serde(rename = "match_all")]
    MatchAll {},
    #[serde(rename = "multi_match")]
    MultiMatch(&'a LexicalQuery),
}

#[derive(Debug, Serialize)]
struct RankClause {
    rrf: RrfParams,
}

#[derive(Debug, Serialize)]
struct RrfParams {}

impl From<RankFusion> for RankClause {
    fn from(fusion: RankFusion) -> Self {
        match fusion {
            RankFusion::ReciprocalRank => RankClause { rrf: RrfParams {} },
        }
    }
}
