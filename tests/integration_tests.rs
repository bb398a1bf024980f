//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: client → HTTP requests → redirects,
//! continuation and item parsing

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use wikiquery::{ClientConfig, Link, Wikipedia};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/w/api.php";

fn client(server: &MockServer) -> Wikipedia {
    let config = ClientConfig::builder()
        .base_url(format!("{}{API_PATH}", server.uri()))
        .build()
        .unwrap();
    Wikipedia::with_config(config).unwrap()
}

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn links_page(titles: &[&str], cont: Option<&str>) -> Value {
    let links: Vec<Value> = titles.iter().map(|t| json!({"ns": 0, "title": t})).collect();
    let mut body = json!({"query": {"pages": {"4138548": {
        "pageid": 4138548,
        "title": "Law of triviality",
        "links": links
    }}}});
    if let Some(token) = cont {
        body["continue"] = json!({"plcontinue": token, "continue": "||"});
    }
    body
}

// ============================================================================
// Redirect Resolution
// ============================================================================

async fn mount_redirected_article(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("titles", "Bikeshedding"))
        .respond_with(ok(json!({"query": {
            "redirects": [{"from": "Bikeshedding", "to": "Law of triviality"}],
            "pages": {"4138548": {"pageid": 4138548, "title": "Law of triviality"}}
        }})))
        .mount(server)
        .await;

    let canonical = |extra: Value| {
        let mut page = json!({"pageid": 4138548, "ns": 0, "title": "Law of triviality"});
        if let (Some(page), Some(extra)) = (page.as_object_mut(), extra.as_object()) {
            page.extend(extra.clone());
        }
        json!({"query": {"pages": {"4138548": page}}})
    };

    Mock::given(method("GET"))
        .and(query_param("titles", "Law of triviality"))
        .and(query_param("prop", "info|pageprops"))
        .respond_with(ok(canonical(json!({"fullurl": "https://en.wikipedia.org/wiki/Law_of_triviality"}))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("titles", "Law of triviality"))
        .and(query_param("prop", "extracts|revisions"))
        .respond_with(ok(canonical(json!({"extract": "Intro.\n== Examples ==\nA bike shed.\n== See also ==\nNone."}))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("titles", "Law of triviality"))
        .and(query_param("prop", "extracts"))
        .and(query_param("exintro", ""))
        .respond_with(ok(canonical(json!({"extract": "Intro."}))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("titles", "Law of triviality"))
        .and(query_param("prop", "extracts"))
        .and(query_param_is_missing("explaintext"))
        .respond_with(ok(canonical(json!({"extract": "<p>Intro.</p>"}))))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_redirected_title_matches_canonical() {
    let server = MockServer::start().await;
    mount_redirected_article(&server).await;

    let wiki = client(&server);
    let alias = wiki.page("Bikeshedding");
    let canonical = wiki.page("Law of triviality");

    assert_eq!(alias.id().await.unwrap(), canonical.id().await.unwrap());
    assert_eq!(alias.title().await.unwrap(), canonical.title().await.unwrap());
    assert_eq!(alias.content().await.unwrap(), canonical.content().await.unwrap());
    assert_eq!(
        alias.html_content().await.unwrap(),
        canonical.html_content().await.unwrap()
    );
    assert_eq!(alias.summary().await.unwrap(), canonical.summary().await.unwrap());

    assert_eq!(alias.id().await.unwrap(), "4138548");
    assert_eq!(alias.title().await.unwrap(), "Law of triviality");
    assert_eq!(alias.summary().await.unwrap(), "Intro.");
}

#[tokio::test]
async fn test_section_content_end_to_end() {
    let server = MockServer::start().await;
    mount_redirected_article(&server).await;

    let page = client(&server).page("Bikeshedding");
    assert_eq!(
        page.section_content("Examples").await.unwrap(),
        "\nA bike shed.\n"
    );
    assert_eq!(page.section_content("History").await.unwrap(), "");
}

#[tokio::test]
async fn test_redirect_cycle_is_bounded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("titles", "A"))
        .respond_with(ok(json!({"query": {"redirects": [{"from": "A", "to": "B"}]}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("titles", "B"))
        .respond_with(ok(json!({"query": {"redirects": [{"from": "B", "to": "A"}]}})))
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(format!("{}{API_PATH}", server.uri()))
        .max_redirects(4)
        .build()
        .unwrap();
    let wiki = Wikipedia::with_config(config).unwrap();

    let err = wiki.page("A").title().await.unwrap_err();
    assert!(err.is_response_error());
    assert!(matches!(
        err,
        wikiquery::Error::TooManyRedirects { max_redirects: 4, .. }
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_single_page_without_continue() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("prop", "links"))
        .respond_with(ok(links_page(&["A", "B"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let links: Vec<Link> = client(&server)
        .page("Law of triviality")
        .links()
        .map(Result::unwrap)
        .collect()
        .await;
    assert_eq!(links.len(), 2);
    assert_eq!(links[1].title, "B");
}

#[tokio::test]
async fn test_pages_concatenate_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("continue", ""))
        .and(query_param_is_missing("plcontinue"))
        .respond_with(ok(links_page(&["A", "B"], Some("4138548|0|C"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("plcontinue", "4138548|0|C"))
        .and(query_param("continue", "||"))
        .respond_with(ok(links_page(&["C", "D"], Some("4138548|0|E"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("plcontinue", "4138548|0|E"))
        .respond_with(ok(links_page(&["E"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let titles: Vec<String> = client(&server)
        .page("Law of triviality")
        .links()
        .map(|link| link.unwrap().title)
        .collect()
        .await;
    assert_eq!(titles, vec!["A", "B", "C", "D", "E"]);
}

#[tokio::test]
async fn test_malformed_page_ends_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param_is_missing("plcontinue"))
        .respond_with(ok(links_page(&["A", "B"], Some("p2"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("plcontinue", "p2"))
        .respond_with(ok(json!({
            "continue": {"plcontinue": "p3", "continue": "||"},
            "query": {"pages": {"4138548": {"links": [{"ns": 0, "title": "C"}, {"ns": 0}]}}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("plcontinue", "p3"))
        .respond_with(ok(links_page(&["never"], None)))
        .expect(0)
        .mount(&server)
        .await;

    let items: Vec<_> = client(&server)
        .page("Law of triviality")
        .links()
        .collect()
        .await;

    assert_eq!(items.len(), 4);
    let titles: Vec<&str> = items[..3]
        .iter()
        .map(|item| item.as_ref().unwrap().title.as_str())
        .collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert!(items[3].as_ref().unwrap_err().is_response_error());
}

#[tokio::test]
async fn test_http_error_ends_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param_is_missing("clcontinue"))
        .respond_with(ok(json!({
            "continue": {"clcontinue": "next", "continue": "||"},
            "query": {"pages": {"1": {"categories": [{"ns": 14, "title": "Category:Adages"}]}}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("clcontinue", "next"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let items: Vec<_> = client(&server)
        .page("Law of triviality")
        .categories()
        .collect()
        .await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap().title, "Category:Adages");
    assert!(matches!(
        items[1],
        Err(wikiquery::Error::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_dropped_stream_stops_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param_is_missing("plcontinue"))
        .respond_with(ok(links_page(&["A", "B", "C"], Some("p2"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("plcontinue", "p2"))
        .respond_with(ok(links_page(&["D"], None)))
        .expect(0)
        .mount(&server)
        .await;

    let mut links = client(&server).page("Law of triviality").links();
    let first = links.next().await.unwrap().unwrap();
    assert_eq!(first.title, "A");
    drop(links);

    tokio::time::sleep(Duration::from_millis(100)).await;
}

// ============================================================================
// Sections and site lookups
// ============================================================================

#[tokio::test]
async fn test_sections_by_resolved_id() {
    let server = MockServer::start().await;
    mount_redirected_article(&server).await;

    Mock::given(method("GET"))
        .and(query_param("action", "parse"))
        .and(query_param("pageid", "4138548"))
        .and(query_param("prop", "sections"))
        .respond_with(ok(json!({"parse": {"sections": [
            {"toclevel": 1, "level": "2", "line": "Examples", "number": "1", "index": "1"},
            {"toclevel": 1, "level": "2", "line": "See also", "number": "2", "index": "2"}
        ]}})))
        .expect(1)
        .mount(&server)
        .await;

    let sections = client(&server).page("Bikeshedding").sections().await.unwrap();
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Examples", "See also"]);
}

#[tokio::test]
async fn test_geosearch_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("list", "geosearch"))
        .and(query_param("gscoord", "-34.6|-58.4"))
        .and(query_param("gsradius", "10"))
        .respond_with(ok(json!({"query": {"geosearch": [
            {"pageid": 1, "title": "Obelisco de Buenos Aires", "lat": -34.6037, "lon": -58.3816, "dist": 9.1}
        ]}})))
        .expect(1)
        .mount(&server)
        .await;

    let wiki = client(&server);
    assert_eq!(
        wiki.geosearch(-34.6, -58.4, 10).await.unwrap(),
        vec!["Obelisco de Buenos Aires"]
    );
    assert!(wiki.geosearch(200.0, 0.0, 10).await.unwrap_err().is_parameter_error());
    assert!(wiki.geosearch(0.0, -200.0, 10).await.unwrap_err().is_parameter_error());
    assert!(wiki.geosearch(0.0, 0.0, 20_000).await.unwrap_err().is_parameter_error());
}

#[tokio::test]
async fn test_language_switch_changes_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/es/api.php"))
        .and(query_param("list", "random"))
        .respond_with(ok(json!({"query": {"random": [{"id": 7, "ns": 0, "title": "Buenos Aires"}]}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(format!("{}/{{lang}}/api.php", server.uri()))
        .build()
        .unwrap();
    let mut wiki = Wikipedia::with_config(config).unwrap();
    wiki.set_language("es").unwrap();

    assert_eq!(wiki.random(1).await.unwrap(), vec!["Buenos Aires"]);
}
