//! Tests for the recommendation service

use super::*;
use crate::catalog::{MockCatalogSource, MockInstalledDocuments};
use crate::error::{ErrorCode, SteerError};
use crate::fs::MemoryFileSystem;
use crate::matching::DocumentMetadata;
use crate::workspace::{WorkspaceAnalysisCache, WorkspaceAnalyzer};
use std::path::PathBuf;
use std::sync::Arc;

const ROOT: &str = "/work/app";

fn workspace() -> MemoryFileSystem {
    let fs = MemoryFileSystem::new();
    fs.add_file(
        "/work/app/package.json",
        r#"{
            "dependencies": { "react": "18.0.0", "express": "4.18.0" },
            "devDependencies": { "typescript": "5.1.0", "jest": "29.0.0" }
        }"#,
    );
    fs.add_file("/work/app/src/components/Button.tsx", "");
    fs.add_file("/work/app/src/components/Button.test.tsx", "");
    fs
}

fn doc(name: &str) -> DocumentMetadata {
    DocumentMetadata::new(name, format!("{}.md", name), "general")
}

/// Five documents that all match the workspace, each through a different factor
fn catalog_documents() -> Vec<DocumentMetadata> {
    vec![
        doc("typescript-basics").with_tags(["typescript"]),
        doc("react-guide")
            .with_tags(["react", "typescript"])
            .with_required_dependencies(["react"]),
        doc("jest-setup").with_required_dependencies(["jest"]),
        doc("api-design").with_tags(["express"]),
        doc("components").with_file_patterns(["components"]),
    ]
}

fn catalog_returning(documents: Vec<DocumentMetadata>) -> Arc<MockCatalogSource> {
    let mut catalog = MockCatalogSource::new();
    catalog
        .expect_fetch_catalog()
        .returning(move || Ok(documents.clone()));
    Arc::new(catalog)
}

fn installed_returning(names: &[&str]) -> Arc<MockInstalledDocuments> {
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let mut installed = MockInstalledDocuments::new();
    installed
        .expect_installed_document_names()
        .returning(move || Ok(names.clone()));
    Arc::new(installed)
}

fn cache(fs: &MemoryFileSystem) -> Arc<WorkspaceAnalysisCache> {
    Arc::new(WorkspaceAnalysisCache::new(WorkspaceAnalyzer::new(
        Arc::new(fs.clone()),
    )))
}

fn service(fs: &MemoryFileSystem, catalog: Arc<MockCatalogSource>) -> RecommendationService {
    RecommendationService::new(Some(PathBuf::from(ROOT)), cache(fs), catalog)
}

fn names(recommendations: &[crate::matching::ScoredDocument]) -> Vec<&str> {
    recommendations
        .iter()
        .map(|s| s.document.name.as_str())
        .collect()
}

#[tokio::test]
async fn test_default_options_rank_everything() {
    let fs = workspace();
    let service = service(&fs, catalog_returning(catalog_documents()));

    let recommendations = service
        .get_recommendations(&RecommendationOptions::default())
        .await
        .unwrap();

    assert_eq!(
        names(&recommendations),
        vec![
            "react-guide",
            "api-design",
            "jest-setup",
            "components",
            "typescript-basics"
        ]
    );
    let scores: Vec<u32> = recommendations.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![60, 30, 20, 15, 10]);
}

#[tokio::test]
async fn test_max_results_keeps_top_in_order() {
    let fs = workspace();
    let service = service(&fs, catalog_returning(catalog_documents()));

    let all = service
        .get_recommendations(&RecommendationOptions::default())
        .await
        .unwrap();
    let top = service
        .get_recommendations(&RecommendationOptions::default().with_max_results(2))
        .await
        .unwrap();

    assert_eq!(top.len(), 2);
    assert_eq!(top[..], all[..2]);
}

#[tokio::test]
async fn test_min_score_filter() {
    let fs = workspace();
    let service = service(&fs, catalog_returning(catalog_documents()));

    let recommendations = service
        .get_recommendations(&RecommendationOptions::default().with_min_score(20))
        .await
        .unwrap();

    assert!(recommendations.iter().all(|s| s.score >= 20));
    assert_eq!(
        names(&recommendations),
        vec!["react-guide", "api-design", "jest-setup"]
    );
}

#[tokio::test]
async fn test_installed_documents_marked_and_excluded() {
    let fs = workspace();
    let service = service(&fs, catalog_returning(catalog_documents()))
        .with_installed(installed_returning(&["react-guide"]));

    let included = service
        .get_recommendations(&RecommendationOptions::default())
        .await
        .unwrap();
    assert!(included[0].is_installed);
    assert_eq!(included.iter().filter(|s| s.is_installed).count(), 1);

    let excluded = service
        .get_recommendations(&RecommendationOptions::default().exclude_installed())
        .await
        .unwrap();
    assert_eq!(excluded.len(), 4);
    assert!(excluded.iter().all(|s| !s.is_installed));
}

#[tokio::test]
async fn test_installed_failure_degrades() {
    let fs = workspace();
    let mut installed = MockInstalledDocuments::new();
    installed
        .expect_installed_document_names()
        .returning(|| Err(SteerError::fetch("permission denied")));

    let service = service(&fs, catalog_returning(catalog_documents()))
        .with_installed(Arc::new(installed));

    let recommendations = service
        .get_recommendations(&RecommendationOptions::default())
        .await
        .unwrap();
    assert_eq!(recommendations.len(), 5);
    assert!(recommendations.iter().all(|s| !s.is_installed));
}

#[tokio::test]
async fn test_fetch_failure() {
    let fs = workspace();
    let mut catalog = MockCatalogSource::new();
    catalog
        .expect_fetch_catalog()
        .times(1)
        .returning(|| Err(SteerError::fetch("connection reset")));

    let err = service(&fs, Arc::new(catalog))
        .get_recommendations(&RecommendationOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::FetchFailed);
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_other_catalog_errors_become_fetch_failed() {
    let fs = workspace();
    let mut catalog = MockCatalogSource::new();
    catalog
        .expect_fetch_catalog()
        .returning(|| Err(SteerError::config("bad catalog path")));

    let err = service(&fs, Arc::new(catalog))
        .get_recommendations(&RecommendationOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::FetchFailed);
}

#[tokio::test]
async fn test_no_workspace() {
    let fs = workspace();
    let mut catalog = MockCatalogSource::new();
    catalog.expect_fetch_catalog().times(0);

    let service = RecommendationService::new(None, cache(&fs), Arc::new(catalog));
    let err = service
        .get_recommendations(&RecommendationOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoWorkspace);

    let err = service.analyze_workspace().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoWorkspace);
}

#[tokio::test]
async fn test_react_typescript_scenario() {
    let fs = MemoryFileSystem::new();
    fs.add_file(
        "/work/app/package.json",
        r#"{ "dependencies": { "react": "18.0.0", "typescript": "5.1.0" } }"#,
    );
    let document = doc("react-ts")
        .with_tags(["react", "typescript"])
        .with_required_dependencies(["react"]);
    let service = service(&fs, catalog_returning(vec![document]));

    let recommendations = service
        .get_recommendations(&RecommendationOptions::default())
        .await
        .unwrap();

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].score, 60);
    assert_eq!(recommendations[0].reasons.len(), 3);
}

#[tokio::test]
async fn test_analyze_workspace_merges_installed_names() {
    let fs = workspace();
    let service = service(&fs, catalog_returning(Vec::new()))
        .with_installed(installed_returning(&["git-flow", "react-guide"]));

    let context = service.analyze_workspace().await.unwrap();
    assert_eq!(context.installed_docs, vec!["git-flow", "react-guide"]);
    assert!(context.has_tests);

    // Installed names never leak into the cached context
    let cached = service.cache().analyze(std::path::Path::new(ROOT)).await.unwrap();
    assert!(cached.installed_docs.is_empty());
}

#[tokio::test]
async fn test_dispose_releases_watchers() {
    let fs = workspace();
    let service = service(&fs, catalog_returning(catalog_documents()));

    service
        .get_recommendations(&RecommendationOptions::default())
        .await
        .unwrap();
    assert_eq!(fs.active_watchers(), 1);

    service.dispose();
    assert_eq!(fs.active_watchers(), 0);
    service.dispose();
}
