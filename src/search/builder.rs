// Query Builder - Pure construction of backend query descriptors
use super::descriptor::*;
use crate::embeddings::EmbeddingVector;

/// Nearest-neighbor request sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnnSettings {
    pub k: usize,
    pub num_candidates: usize,
}

/// Empty text means "match everything".
pub fn build_keyword(text: &str) -> QueryDescriptor {
    if text.is_empty() {
        QueryDescriptor::MatchAll
    } else {
        QueryDescriptor::Lexical(lexical_query(text))
    }
}

/// `candidate_pool` is passed through as given, even when smaller than `k`.
pub fn build_semantic(vector: EmbeddingVector, k: usize, candidate_pool: usize) -> QueryDescriptor {
    QueryDescriptor::Knn(knn_query(vector, k, candidate_pool))
}

pub fn build_hybrid(
    text: &str,
    vector: EmbeddingVector,
    k: usize,
    candidate_pool: usize,
) -> QueryDescriptor {
    QueryDescriptor::Hybrid {
        lexical: lexical_query(text),
        knn: knn_query(vector, k, candidate_pool),
        fusion: RankFusion::ReciprocalRank,
    }
}

fn lexical_query(text: &str) -> LexicalQuery {
    LexicalQuery {
        query: text.to_string(),
        fields: LEXICAL_FIELDS.iter().map(|f| f.to_string()).collect(),
    }
}

fn knn_query(vector: EmbeddingVector, k: usize, candidate_pool: usize) -> KnnQuery {
    KnnQuery {
        field: VECTOR_FIELD.to_string(),
        query_vector: vector,
        k,
        num_candidates: candidate_pool,
    }
}
