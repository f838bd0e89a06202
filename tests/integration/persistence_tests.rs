use crate::common::{crawl_http, mount_scenario};
use linkrank::config::parse_config;
use linkrank::crawler::{CrawlOptions, Crawler, HttpFetcher};
use linkrank::storage::{load_graph, save_graph, StorageError};
use linkrank::{GraphFormat, PageRank};
use tempfile::tempdir;
use wiremock::MockServer;

#[tokio::test]
async fn test_snapshot_round_trip_reproduces_ranking() {
    let mock_server = MockServer::start().await;
    mount_scenario(&mock_server).await;
    let result = crawl_http(&format!("{}/a", mock_server.uri()), 0).await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("crawl.bin");
    save_graph(&path, &result.graph, GraphFormat::Snapshot).unwrap();
    let loaded = load_graph(&path, GraphFormat::Snapshot).unwrap();

    assert_eq!(loaded, result.graph);

    let before = PageRank::sequential().rank(&result.graph).unwrap();
    let after = PageRank::sequential().rank(&loaded).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_edge_list_round_trip_preserves_structure() {
    let mock_server = MockServer::start().await;
    mount_scenario(&mock_server).await;
    let result = crawl_http(&format!("{}/a", mock_server.uri()), 0).await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("crawl.txt");
    save_graph(&path, &result.graph, GraphFormat::EdgeList).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "3\n0\t1\n0\t1\n0\t2\n2\t0\n");

    let loaded = load_graph(&path, GraphFormat::EdgeList).unwrap();
    assert_eq!(loaded.out_degree(), result.graph.out_degree());
    assert_eq!(
        loaded.edges().collect::<Vec<_>>(),
        result.graph.edges().collect::<Vec<_>>()
    );
    assert_eq!(loaded.nodes(), &["0", "1", "2"]);

    let before = PageRank::sequential().rank(&result.graph).unwrap().ranks();
    let after = PageRank::sequential().rank(&loaded).unwrap().ranks();
    assert_eq!(before, after);
}

#[test]
fn test_corrupt_edge_list_aborts_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    std::fs::write(&path, "3\n0\t1\n1\tx\n").unwrap();

    let result = load_graph(&path, GraphFormat::EdgeList);
    assert!(matches!(result, Err(StorageError::InvalidLine { line: 3, .. })));
}

#[test]
fn test_corrupt_snapshot_aborts_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.bin");
    std::fs::write(&path, b"LINKRANK\xff\xff\xff").unwrap();

    assert!(load_graph(&path, GraphFormat::Snapshot).is_err());
}

#[tokio::test]
async fn test_config_drives_crawl_and_rank() {
    let mock_server = MockServer::start().await;
    mount_scenario(&mock_server).await;

    let config = parse_config(
        r#"
[crawl]
max-visits = 2

[rank]
parallel = true
threads = 2
tolerance = 1e-10
"#,
    )
    .unwrap();

    let fetcher = HttpFetcher::new(&config.fetch).unwrap();
    let result = Crawler::new(fetcher, CrawlOptions::from(&config.crawl))
        .run(&format!("{}/a", mock_server.uri()))
        .await;

    assert_eq!(result.graph.len(), 2);
    assert_eq!(result.graph.out_degree(), &[2, 0]);

    let ranking = PageRank::from(&config.rank).rank(&result.graph).unwrap();
    assert!(ranking.converged);
    assert!((ranking.sum - 1.0).abs() < 1e-9);
}
