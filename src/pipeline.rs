use log::{info, warn};
use reqwest::Url;

use crate::{
    authenticator::login,
    config::{PortalConfig, RowMismatchPolicy},
    error::{PortalError, PortalResult},
    form_replay::{list_lesson_rows, submit_topic},
    group_discoverer::discover_groups,
    requests::Transport,
    schedule::TopicRecord,
    session::SessionContext,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub groups: usize,
    pub lessons_updated: usize,
}

/// Pairs the i-th lesson row with the i-th topic.
pub fn assign_topics<'a>(
    lesson_list_link: &Url,
    edit_links: &'a [Url],
    topics: &'a [TopicRecord],
    policy: RowMismatchPolicy,
) -> PortalResult<Vec<(&'a Url, &'a TopicRecord)>> {
    if edit_links.len() != topics.len() {
        match policy {
            RowMismatchPolicy::Truncate => {}
            RowMismatchPolicy::Warn => warn!(
                "{lesson_list_link} lists {} lessons but the schedule has {} topics; only the first {} get a topic",
                edit_links.len(),
                topics.len(),
                edit_links.len().min(topics.len())
            ),
            RowMismatchPolicy::Fail => {
                return Err(PortalError::RowCountMismatch {
                    url: lesson_list_link.to_string(),
                    rows: edit_links.len(),
                    topics: topics.len(),
                });
            }
        }
    }
    Ok(edit_links.iter().zip(topics.iter()).collect())
}

/// Logs in, finds every group of the course and rewrites each lesson's topic.
/// Strictly sequential; the first failure ends the run.
pub async fn run<T: Transport>(
    transport: &T,
    config: &PortalConfig,
    topics: &[TopicRecord],
) -> PortalResult<RunReport> {
    let base_url = &config.base_url;

    info!("Logging in to {base_url}");
    let token = login(transport, base_url, &config.credentials).await?;
    let session = SessionContext::new().with_session_token(token);

    let discovered = discover_groups(transport, base_url, config.course_id, &session).await?;
    let session = session.with_antiforgery_token(discovered.antiforgery_token);
    info!("Navigated to course {}", config.course_id);

    let mut report = RunReport::default();
    for lesson_list_link in &discovered.lesson_list_links {
        info!("Scraping lesson rows of {lesson_list_link}");
        let edit_links = list_lesson_rows(
            transport,
            base_url,
            lesson_list_link,
            &session,
            config.debug_dump_path.as_deref(),
        )
        .await?;

        let assignments =
            assign_topics(lesson_list_link, &edit_links, topics, config.row_mismatch)?;
        let total = assignments.len();
        for (i, (edit_link, topic)) in assignments.into_iter().enumerate() {
            info!(
                "Editing lesson {}/{total} ({} {}): {}",
                i + 1,
                topic.date.format("%d.%m.%Y"),
                topic.kind,
                topic.name
            );
            submit_topic(transport, base_url, edit_link, &session, &topic.name).await?;
            info!("Submitted {edit_link}");
            report.lessons_updated += 1;
        }
        report.groups += 1;
    }

    info!(
        "Done: {} lessons updated across {} groups",
        report.lessons_updated, report.groups
    );
    Ok(report)
}
