use linkrank::config::FetchConfig;
use linkrank::crawler::{CrawlOptions, CrawlResult, Crawler, HttpFetcher};
use linkrank::LinkScope;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds an HTML page containing one anchor per href
pub fn html_page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!("<html><head><title>Test</title></head><body>{}</body></html>", anchors)
}

/// Mounts HEAD and GET handlers serving an HTML page at `route`
pub async fn mount_page(server: &MockServer, route: &str, hrefs: &[&str]) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(hrefs))
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Seed page A links to B twice and C once; B has no links; C links back to A
pub async fn mount_scenario(server: &MockServer) {
    mount_page(server, "/a", &["/b", "/b", "/c"]).await;
    mount_page(server, "/b", &[]).await;
    mount_page(server, "/c", &["/a"]).await;
}

/// Crawls `seed` over HTTP with same-host scope
pub async fn crawl_http(seed: &str, max_visits: usize) -> CrawlResult {
    let fetcher = HttpFetcher::new(&FetchConfig::default()).expect("Failed to build fetcher");
    let options = CrawlOptions {
        scope: LinkScope::same_host(),
        max_visits,
    };
    Crawler::new(fetcher, options).run(seed).await
}
