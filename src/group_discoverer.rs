use log::{debug, info};
use reqwest::Url;

use crate::{
    error::{PortalError, PortalResult},
    headers::build_headers,
    pages::{GroupOverviewPage, LoginPage},
    requests::{PortalRequest, Transport},
    session::{AntiforgeryToken, SessionContext},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredGroups {
    pub lesson_list_links: Vec<Url>,
    pub antiforgery_token: AntiforgeryToken,
}

/// Fetches the course's group overview and pulls out the lesson-list links
/// plus the anti-forgery cookie issued with the page.
pub async fn discover_groups<T: Transport>(
    transport: &T,
    base_url: &Url,
    course_id: u32,
    session: &SessionContext,
) -> PortalResult<DiscoveredGroups> {
    let url = GroupOverviewPage::url(base_url, course_id)?;
    let referer = LoginPage::url(base_url)?;
    debug!("GET {url}");

    let response = transport
        .send(PortalRequest::get(url.clone(), build_headers(session, referer.as_str())))
        .await?;
    if !response.is_success() {
        return Err(PortalError::Navigation {
            url: url.to_string(),
            status: response.status,
            reason: response.reason,
        });
    }

    let page = GroupOverviewPage::from_response(url, &response);
    let lesson_list_links = page.extract_lesson_links(base_url)?;
    let antiforgery_token = page.extract_antiforgery_token()?;

    info!(
        "Course {course_id}: found {} groups",
        lesson_list_links.len()
    );
    Ok(DiscoveredGroups {
        lesson_list_links,
        antiforgery_token,
    })
}
