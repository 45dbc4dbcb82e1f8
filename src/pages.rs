//! Page contracts for the portal. Each type knows where its data lives in the
//! server-rendered HTML; selectors never leave this module.

use std::sync::LazyLock;

use log::{debug, warn};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::{
    config::Credentials,
    cookies::{find_cookie_with_prefix, parse_cookies},
    error::{PortalError, PortalResult},
    form_snapshot::FormSnapshot,
    headers::AUTH_COOKIE_NAME,
    requests::PortalResponse,
    session::AntiforgeryToken,
    text_manipulators::{describe_document, resolve_link},
};

const LOGIN_PATH: &str = "/studregistry/account/login";
const GROUP_OVERVIEW_PATH: &str = "/studregistry/LessonAttendance/groups/";
const LESSON_LIST_MARKER: &str = "/LessonsList/";
pub const ANTIFORGERY_COOKIE_PREFIX: &str = ".AspNetCore.Antiforgery.";
pub const TOPIC_FIELD: &str = "LessonTopic";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("selector literal is valid CSS")
}

static NAVIGATION_FORM: LazyLock<Selector> = LazyLock::new(|| selector(r#"form[name="lesson"]"#));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static LESSON_TABLE: LazyLock<Selector> =
    LazyLock::new(|| selector("body > div > main > div:nth-child(5) > table"));
static EDIT_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| selector("tbody > tr > td:nth-child(3) > a"));
static FORM: LazyLock<Selector> = LazyLock::new(|| selector("form"));
static INPUT: LazyLock<Selector> = LazyLock::new(|| selector("input"));
static SELECT: LazyLock<Selector> = LazyLock::new(|| selector("select"));
static OPTION: LazyLock<Selector> = LazyLock::new(|| selector("option"));

fn href_links<'a>(
    anchors: impl Iterator<Item = ElementRef<'a>>,
    base_url: &Url,
) -> Vec<Url> {
    anchors
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let link = resolve_link(base_url, href);
            if link.is_none() {
                warn!("Skipping unresolvable link {href:?}");
            }
            link
        })
        .collect()
}

/// The login endpoint. It renders nothing useful; success is a 302 carrying
/// the auth cookie.
pub struct LoginPage;

impl LoginPage {
    pub fn url(base_url: &Url) -> PortalResult<Url> {
        base_url
            .join(LOGIN_PATH)
            .map_err(|e| PortalError::Configuration(format!("bad base url {base_url}: {e}")))
    }

    /// The portal reads credentials from the query string of the POST.
    pub fn submission_url(base_url: &Url, credentials: &Credentials) -> PortalResult<Url> {
        let mut url = Self::url(base_url)?;
        url.query_pairs_mut()
            .append_pair("UserLogin", &credentials.login)
            .append_pair("UserPassword", &credentials.password);
        Ok(url)
    }

    pub fn extract_session_token(set_cookie: &str) -> Option<String> {
        parse_cookies(set_cookie)
            .remove(AUTH_COOKIE_NAME)
            .filter(|token| !token.is_empty())
    }
}

/// The course's group overview, reachable only when authenticated.
pub struct GroupOverviewPage {
    url: Url,
    document: Html,
    set_cookie: Option<String>,
}

impl GroupOverviewPage {
    pub fn url(base_url: &Url, course_id: u32) -> PortalResult<Url> {
        base_url
            .join(&format!("{GROUP_OVERVIEW_PATH}{course_id}"))
            .map_err(|e| PortalError::Configuration(format!("bad base url {base_url}: {e}")))
    }

    pub fn from_response(url: Url, response: &PortalResponse) -> Self {
        Self {
            url,
            document: Html::parse_document(&response.body),
            set_cookie: response.set_cookie.clone(),
        }
    }

    /// Lesson-list links inside the navigation form, in document order.
    /// Other anchors in the form (evaluation pages) are dropped.
    pub fn extract_lesson_links(&self, base_url: &Url) -> PortalResult<Vec<Url>> {
        let Some(form) = self.document.select(&NAVIGATION_FORM).next() else {
            return Err(PortalError::StructuralParse {
                url: self.url.to_string(),
                details: format!(
                    "lesson navigation form missing ({}); the session may not be authenticated",
                    describe_document(&self.document)
                ),
            });
        };

        let links: Vec<Url> = href_links(form.select(&ANCHOR), base_url)
            .into_iter()
            .filter(|link| link.path().contains(LESSON_LIST_MARKER))
            .collect();
        debug!("Found {} lesson list links on {}", links.len(), self.url);
        Ok(links)
    }

    pub fn extract_antiforgery_token(&self) -> PortalResult<AntiforgeryToken> {
        self.set_cookie
            .as_deref()
            .and_then(|raw| find_cookie_with_prefix(raw, ANTIFORGERY_COOKIE_PREFIX))
            .map(|(name, value)| AntiforgeryToken { name, value })
            .ok_or_else(|| PortalError::AntiforgeryMissing {
                url: self.url.to_string(),
                prefix: ANTIFORGERY_COOKIE_PREFIX.to_string(),
            })
    }
}

/// One group's lessons, one table row per lesson in calendar order.
pub struct LessonListPage {
    url: Url,
    document: Html,
}

impl LessonListPage {
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(body),
        }
    }

    pub fn extract_edit_links(&self, base_url: &Url) -> PortalResult<Vec<Url>> {
        let Some(table) = self.document.select(&LESSON_TABLE).next() else {
            return Err(PortalError::StructuralParse {
                url: self.url.to_string(),
                details: format!(
                    "lesson table missing ({})",
                    describe_document(&self.document)
                ),
            });
        };
        Ok(href_links(table.select(&EDIT_ANCHOR), base_url))
    }
}

/// A lesson's edit form.
pub struct LessonEditPage {
    url: Url,
    document: Html,
}

impl LessonEditPage {
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(body),
        }
    }

    /// Rebuilds what the first form on the page would submit.
    ///
    /// Inputs contribute `name=value` with later duplicates winning. Selects
    /// contribute their explicitly selected option; a select without one is
    /// left out.
    pub fn extract_form_snapshot(&self) -> PortalResult<FormSnapshot> {
        let Some(form) = self.document.select(&FORM).next() else {
            return Err(PortalError::StructuralParse {
                url: self.url.to_string(),
                details: format!("no form ({})", describe_document(&self.document)),
            });
        };

        let mut snapshot = FormSnapshot::new();
        for input in form.select(&INPUT) {
            let Some(name) = input.value().attr("name") else {
                continue;
            };
            snapshot.set(name, input.value().attr("value").unwrap_or_default());
        }

        for select in form.select(&SELECT) {
            let Some(name) = select.value().attr("name") else {
                continue;
            };
            let selected = select
                .select(&OPTION)
                .find(|option| option.value().attr("selected").is_some());
            match selected {
                Some(option) => {
                    let value = option
                        .value()
                        .attr("value")
                        .map(str::to_string)
                        .unwrap_or_else(|| option.text().collect::<String>().trim().to_string());
                    snapshot.set(name, value);
                }
                None => debug!("Select {name:?} on {} has no selected option", self.url),
            }
        }

        debug!("Scraped {} fields from {}", snapshot.len(), self.url);
        Ok(snapshot)
    }
}
