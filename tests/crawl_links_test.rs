//! Link filtering for traversal.

use url::Url;

use foliolens::crawl_engine::collect_same_origin_links;

fn seed() -> Url {
    Url::parse("https://example.com/portfolio").unwrap()
}

#[test]
fn keeps_same_origin_links_in_dom_order() {
    let links = vec![
        "https://example.com/about".to_string(),
        "https://example.com/work".to_string(),
        "https://example.com/contact".to_string(),
    ];
    let collected = collect_same_origin_links(&seed(), &links);
    assert_eq!(
        collected,
        vec![
            "https://example.com/about",
            "https://example.com/work",
            "https://example.com/contact"
        ]
    );
}

#[test]
fn drops_cross_origin_and_subdomain_links() {
    let links = vec![
        "https://example.com/work".to_string(),
        "https://blog.example.com/post".to_string(),
        "https://other.example/page".to_string(),
    ];
    let collected = collect_same_origin_links(&seed(), &links);
    assert_eq!(collected, vec!["https://example.com/work"]);
}

#[test]
fn drops_malformed_and_non_http_links_silently() {
    let links = vec![
        "javascript:void(0)".to_string(),
        "mailto:hi@example.com".to_string(),
        "not a url".to_string(),
        "https://example.com/real".to_string(),
    ];
    let collected = collect_same_origin_links(&seed(), &links);
    assert_eq!(collected, vec!["https://example.com/real"]);
}

#[test]
fn deduplicates_after_fragment_stripping() {
    let links = vec![
        "https://example.com/work#top".to_string(),
        "https://example.com/work#case-1".to_string(),
        "https://example.com/work".to_string(),
    ];
    let collected = collect_same_origin_links(&seed(), &links);
    assert_eq!(collected, vec!["https://example.com/work"]);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(collect_same_origin_links(&seed(), &[]).is_empty());
}
