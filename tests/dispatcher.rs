mod common;

use common::*;
use query_gateway::{
    embeddings::EmbeddingVector,
    errors::GatewayError,
    search::{Query, QueryDescriptor, RankFusion, SearchMode},
};

#[tokio::test]
async fn keyword_empty_text_matches_all_without_embedding() {
    let h = harness();
    let results = h
        .services
        .dispatcher
        .search(&Query::keyword(""))
        .await
        .unwrap();

    assert_eq!(results, sample_documents());
    assert_eq!(h.backend.last_descriptor(), Some(QueryDescriptor::MatchAll));
    assert_eq!(h.log.events(), vec!["execute:match_all"]);
}

#[tokio::test]
async fn keyword_whitespace_is_treated_as_empty() {
    let h = harness();
    h.services
        .dispatcher
        .search(&Query::keyword("   "))
        .await
        .unwrap();
    assert_eq!(h.backend.last_descriptor(), Some(QueryDescriptor::MatchAll));
}

#[tokio::test]
async fn keyword_sends_trimmed_multi_match() {
    let h = harness();
    h.services
        .dispatcher
        .search(&Query::keyword("  login failure "))
        .await
        .unwrap();

    let descriptor = h.backend.last_descriptor().unwrap();
    let lexical = descriptor.lexical().unwrap();
    assert_eq!(lexical.query, "login failure");
    assert_eq!(lexical.fields, vec!["summary", "description"]);
    assert!(descriptor.knn().is_none());
    assert_eq!(h.log.events(), vec!["execute:multi_match"]);
}

#[tokio::test]
async fn semantic_and_hybrid_reject_empty_text_before_any_call() {
    for mode in [SearchMode::Semantic, SearchMode::Hybrid] {
        for text in ["", "   "] {
            let h = harness();
            let err = h
                .services
                .dispatcher
                .search(&Query::new(text, mode))
                .await
                .unwrap_err();

            match err {
                GatewayError::EmptyQuery { mode: reported } => assert_eq!(reported, mode),
                other => panic!("unexpected error: {:?}", other),
            }
            assert!(h.log.events().is_empty());
        }
    }
}

#[tokio::test]
async fn semantic_embeds_once_then_executes_once() {
    let h = harness();
    h.services
        .dispatcher
        .search(&Query::semantic("x"))
        .await
        .unwrap();

    assert_eq!(h.log.events(), vec!["embed:x", "execute:knn"]);
}

#[tokio::test]
async fn hybrid_descriptor_carries_both_sub_queries() {
    let h = harness();
    h.services
        .dispatcher
        .search(&Query::hybrid("x"))
        .await
        .unwrap();

    assert_eq!(h.log.events(), vec!["embed:x", "execute:hybrid"]);
    let descriptor = h.backend.last_descriptor().unwrap();
    assert!(descriptor.lexical().is_some());
    assert!(descriptor.knn().is_some());
}

#[tokio::test]
async fn hybrid_sends_trimmed_text_to_both_sub_queries() {
    let h = harness();
    h.services
        .dispatcher
        .search(&Query::hybrid("  login failure "))
        .await
        .unwrap();

    assert_eq!(h.log.events(), vec!["embed:login failure", "execute:hybrid"]);
    let descriptor = h.backend.last_descriptor().unwrap();
    let lexical = descriptor.lexical().unwrap();
    assert_eq!(lexical.query, "login failure");
    assert_eq!(lexical.fields, vec!["summary", "description"]);

    let expected = h.provider.embed("login failure").await.unwrap();
    assert_eq!(descriptor.knn().unwrap().query_vector, expected);

    let body = serde_json::to_value(descriptor.to_body()).unwrap();
    assert_eq!(body["query"]["multi_match"]["query"], "login failure");
}

#[tokio::test]
async fn unsupported_mode_makes_no_calls() {
    let h = harness();
    let err = h
        .services
        .dispatcher
        .search_wire("x", Some("bogus"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::UnsupportedMode(ref v) if v == "bogus"));
    assert!(h.log.events().is_empty());
}

#[tokio::test]
async fn absent_wire_mode_is_keyword() {
    let h = harness();
    h.services
        .dispatcher
        .search_wire("disk", None)
        .await
        .unwrap();
    assert_eq!(h.log.events(), vec!["execute:multi_match"]);
}

#[tokio::test]
async fn repeated_keyword_searches_return_same_order() {
    let h = harness();
    let first = h
        .services
        .dispatcher
        .search(&Query::keyword("login"))
        .await
        .unwrap();
    let second = h
        .services
        .dispatcher
        .search(&Query::keyword("login"))
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn login_failure_scenario_across_modes() {
    let h = harness();
    let dispatcher = &h.services.dispatcher;
    let expected_vector = h.provider.embed("login failure").await.unwrap();

    dispatcher
        .search(&Query::keyword("login failure"))
        .await
        .unwrap();
    let keyword = h.backend.last_descriptor().unwrap();
    assert_eq!(keyword.kind(), "multi_match");
    assert_eq!(keyword.lexical().unwrap().fields, vec!["summary", "description"]);

    dispatcher
        .search(&Query::semantic("login failure"))
        .await
        .unwrap();
    let semantic = h.backend.last_descriptor().unwrap();
    let knn = semantic.knn().unwrap();
    assert_eq!(knn.query_vector, expected_vector);
    assert_eq!(knn.field, "embedding_vector");
    assert_eq!((knn.k, knn.num_candidates), (10, 100));

    dispatcher
        .search(&Query::hybrid("login failure"))
        .await
        .unwrap();
    let hybrid = h.backend.last_descriptor().unwrap();
    assert!(matches!(
        hybrid,
        QueryDescriptor::Hybrid {
            fusion: RankFusion::ReciprocalRank,
            ..
        }
    ));
    assert_eq!(hybrid.knn().unwrap().query_vector, expected_vector);
    assert_eq!(hybrid.lexical().unwrap().query, "login failure");
}

#[tokio::test]
async fn semantic_vector_has_configured_dimension() {
    let h = harness();
    h.services
        .dispatcher
        .search(&Query::semantic("vpn tunnel dropped"))
        .await
        .unwrap();
    let descriptor = h.backend.last_descriptor().unwrap();
    let vector: &EmbeddingVector = &descriptor.knn().unwrap().query_vector;
    assert_eq!(vector.len(), DIMENSION);
}

#[tokio::test]
async fn backend_failures_propagate_unchanged() {
    let h = harness_with(|log| MockBackend::failing(log, Failure::Unavailable));
    let err = h
        .services
        .dispatcher
        .search(&Query::semantic("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::BackendUnavailable(_)));
    assert_eq!(h.log.events(), vec!["embed:x", "execute:knn"]);

    let h = harness_with(|log| MockBackend::failing(log, Failure::Rejected));
    let err = h
        .services
        .dispatcher
        .search(&Query::keyword("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::BackendQuery(_)));
    assert_eq!(h.log.events().len(), 1);
}

#[tokio::test]
async fn listing_uses_fetch_all() {
    let h = harness();
    let docs = h.services.dispatcher.list(2).await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(h.log.events(), vec!["fetch_all:2"]);
}
