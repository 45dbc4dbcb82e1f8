use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Resolves an `href` scraped from a portal page against the portal origin.
pub fn resolve_link(base_url: &Url, href: &str) -> Option<Url> {
    base_url.join(href.trim()).ok()
}

/// Short description of a document for error messages: its title, if any.
pub fn describe_document(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };
    match document.select(&title_selector).next() {
        Some(title) => format!("page title {:?}", extract_text(title).trim()),
        None => "page has no title".to_string(),
    }
}
