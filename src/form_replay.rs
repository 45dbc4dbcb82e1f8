use std::path::Path;

use log::{debug, info};
use reqwest::Url;

use crate::{
    error::{PortalError, PortalResult},
    form_snapshot::FormSnapshot,
    headers::build_headers,
    pages::{LessonEditPage, LessonListPage, LoginPage, TOPIC_FIELD},
    requests::{PortalRequest, PortalResponse, RequestBody, Transport},
    session::SessionContext,
};

async fn fetch_page<T: Transport>(
    transport: &T,
    base_url: &Url,
    url: &Url,
    session: &SessionContext,
) -> PortalResult<PortalResponse> {
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
    Ok(response)
}

/// Edit links of every lesson on a group's lesson list, in row order (which
/// is date order). When `debug_dump_path` is set the raw page is written
/// there, overwriting the previous group's page.
pub async fn list_lesson_rows<T: Transport>(
    transport: &T,
    base_url: &Url,
    lesson_list_link: &Url,
    session: &SessionContext,
    debug_dump_path: Option<&Path>,
) -> PortalResult<Vec<Url>> {
    let response = fetch_page(transport, base_url, lesson_list_link, session).await?;

    if let Some(path) = debug_dump_path {
        tokio::fs::write(path, &response.body).await?;
        debug!("Wrote lesson list page to {}", path.display());
    }

    let edit_links =
        LessonListPage::parse(lesson_list_link.clone(), &response.body).extract_edit_links(base_url)?;
    info!("{lesson_list_link}: {} lesson rows", edit_links.len());
    Ok(edit_links)
}

/// Replays the lesson's edit form with `LessonTopic` replaced by
/// `topic_name`. Returns the payload that was posted.
pub async fn submit_topic<T: Transport>(
    transport: &T,
    base_url: &Url,
    edit_link: &Url,
    session: &SessionContext,
    topic_name: &str,
) -> PortalResult<FormSnapshot> {
    let response = fetch_page(transport, base_url, edit_link, session).await?;

    let mut snapshot =
        LessonEditPage::parse(edit_link.clone(), &response.body).extract_form_snapshot()?;
    snapshot.set(TOPIC_FIELD, topic_name);

    let referer = LoginPage::url(base_url)?;
    debug!("POST {edit_link} with {} fields", snapshot.len());
    let response = transport
        .send(PortalRequest::post(
            edit_link.clone(),
            build_headers(session, referer.as_str()),
            RequestBody::Multipart(snapshot.clone()),
        ))
        .await?;
    if !response.is_success() {
        return Err(PortalError::Submission {
            url: edit_link.to_string(),
            status: response.status,
            reason: response.reason,
        });
    }

    Ok(snapshot)
}
