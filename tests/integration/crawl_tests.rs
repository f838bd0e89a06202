use crate::common::{crawl_http, mount_page, mount_scenario};
use linkrank::config::FetchConfig;
use linkrank::crawler::{HttpFetcher, PageFetch, PageFetcher};
use linkrank::PageRank;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_full_crawl_scenario() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_scenario(&mock_server).await;

    let result = crawl_http(&format!("{}/a", base_url), 0).await;
    let graph = &result.graph;

    assert_eq!(
        graph.nodes(),
        &[
            format!("{}/a", base_url),
            format!("{}/b", base_url),
            format!("{}/c", base_url),
        ]
    );
    assert_eq!(graph.out_degree(), &[3, 0, 1]);
    assert_eq!(graph.weight(0, 1), 2);
    assert_eq!(graph.weight(0, 2), 1);
    assert_eq!(graph.weight(2, 0), 1);
    assert_eq!(result.stats.fetch_failures, 0);
}

#[tokio::test]
async fn test_sequential_and_parallel_agree_on_crawled_graph() {
    let mock_server = MockServer::start().await;
    mount_scenario(&mock_server).await;

    let result = crawl_http(&format!("{}/a", mock_server.uri()), 0).await;

    let sequential = PageRank::sequential().rank(&result.graph).unwrap();
    let parallel = PageRank::parallel(4).rank(&result.graph).unwrap();

    assert!((sequential.sum - 1.0).abs() < 1e-9);
    assert!((parallel.sum - 1.0).abs() < 1e-9);
    for (s, p) in sequential.ranks().iter().zip(parallel.ranks()) {
        assert!(*s >= 0.0);
        assert!((s - p).abs() < 1e-9);
    }
    assert_eq!(sequential.entries[0].label, result.graph.nodes()[0]);
}

#[tokio::test]
async fn test_visit_cap_of_one() {
    let mock_server = MockServer::start().await;
    mount_scenario(&mock_server).await;

    let result = crawl_http(&format!("{}/a", mock_server.uri()), 1).await;

    assert_eq!(result.graph.len(), 1);
    assert_eq!(result.graph.edge_count(), 0);
    assert_eq!(result.stats.cap_drops, 3);
}

#[tokio::test]
async fn test_redirect_collapses_to_one_node() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/old", "/new"]).await;
    mount_page(&mock_server, "/new", &[]).await;

    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/new", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;

    let result = crawl_http(&format!("{}/", base_url), 0).await;
    let graph = &result.graph;

    assert_eq!(
        graph.nodes(),
        &[format!("{}/", base_url), format!("{}/new", base_url)]
    );
    assert_eq!(graph.weight(0, 1), 2);
    assert_eq!(graph.out_degree(), &[2, 0]);
    assert_eq!(graph.resolve(&format!("{}/old", base_url)), Some(1));
}

#[tokio::test]
async fn test_non_html_is_not_downloaded() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/doc.pdf", "/doc.pdf"]).await;
    Mock::given(method("HEAD"))
        .and(path("/doc.pdf"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = crawl_http(&format!("{}/", mock_server.uri()), 0).await;

    assert_eq!(result.graph.len(), 1);
    assert_eq!(result.graph.edge_count(), 0);
    assert_eq!(result.stats.non_html_pages, 1);
}

#[tokio::test]
async fn test_server_error_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/broken", "/fine"]).await;
    mount_page(&mock_server, "/fine", &[]).await;
    Mock::given(method("HEAD"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;

    let result = crawl_http(&format!("{}/", mock_server.uri()), 0).await;

    assert_eq!(result.graph.len(), 2);
    assert_eq!(result.graph.out_degree(), &[1, 0]);
    assert_eq!(result.stats.fetch_failures, 1);
}

#[tokio::test]
async fn test_unreachable_seed_gives_empty_graph() {
    let result = crawl_http("http://127.0.0.1:1/", 0).await;

    assert!(result.graph.is_empty());
    assert!(PageRank::sequential().rank(&result.graph).is_err());
}

#[tokio::test]
async fn test_http_fetcher_reports_hrefs_in_order() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/page", &["/x", "other", "/x#top"]).await;

    let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
    let page = fetcher
        .fetch(&format!("{}/page", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(
        page,
        PageFetch::Html {
            final_url: format!("{}/page", mock_server.uri()),
            hrefs: vec!["/x".to_string(), "other".to_string(), "/x#top".to_string()],
        }
    );
}

#[tokio::test]
async fn test_http_fetcher_status_error_carries_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/gone", mock_server.uri());
    let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
    let error = fetcher.fetch(&url).await.unwrap_err();

    assert_eq!(error.url, url);
    assert_eq!(error.cause, "code 404");
}

#[tokio::test]
async fn test_http_fetcher_head_error_is_a_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let url = format!("{}/busy", mock_server.uri());
    let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
    let error = fetcher.fetch(&url).await.unwrap_err();

    assert_eq!(error.cause, "code 503");
}

#[tokio::test]
async fn test_transient_head_error_is_retried_on_next_link() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/flaky", "/flaky"]).await;
    Mock::given(method("HEAD"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/flaky", &[]).await;

    let result = crawl_http(&format!("{}/", base_url), 0).await;

    assert_eq!(
        result.graph.nodes(),
        &[format!("{}/", base_url), format!("{}/flaky", base_url)]
    );
    assert_eq!(result.graph.weight(0, 1), 1);
    assert_eq!(result.stats.fetch_failures, 1);
    assert_eq!(result.stats.non_html_pages, 0);
}
