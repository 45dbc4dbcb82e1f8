#![allow(dead_code)]

use std::{collections::HashMap, path::PathBuf, sync::Mutex};

use reqwest::Url;
use topic_sync::{
    Credentials, Method, PortalConfig, PortalRequest, PortalResponse, PortalResult, RequestBody,
    RowMismatchPolicy, ScheduleParser, TopicRecord, Transport,
};

pub const BASE: &str = "http://portal.test";
pub const LOGIN_URL: &str =
    "http://portal.test/studregistry/account/login?UserLogin=lecturer&UserPassword=secret";
pub const OVERVIEW_URL: &str = "http://portal.test/studregistry/LessonAttendance/groups/27114";
pub const ANTIFORGERY_COOKIE: &str = ".AspNetCore.Antiforgery.Ab12=CfDJ8token";

/// Canned responses keyed by method and full URL; records every request.
#[derive(Default)]
pub struct MockPortal {
    routes: HashMap<(Method, String), PortalResponse>,
    requests: Mutex<Vec<PortalRequest>>,
}

impl MockPortal {
    pub fn route(&mut self, method: Method, url: &str, status: u16, set_cookie: Option<&str>, body: &str) {
        self.routes.insert(
            (method, url.to_string()),
            PortalResponse {
                status,
                reason: (if status == 500 { "Internal Server Error" } else { "OK" }).to_string(),
                set_cookie: set_cookie.map(str::to_string),
                body: body.to_string(),
            },
        );
    }

    pub fn requests(&self) -> Vec<PortalRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<PortalRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::Post && !r.url.as_str().starts_with(LOGIN_URL))
            .collect()
    }
}

impl Transport for MockPortal {
    async fn send(&self, request: PortalRequest) -> PortalResult<PortalResponse> {
        let key = (request.method, request.url.to_string());
        let response = self.routes.get(&key).cloned().unwrap_or(PortalResponse {
            status: 404,
            reason: "Not Found".to_string(),
            ..Default::default()
        });
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

pub fn lesson_list_url(group: u32) -> String {
    format!("{BASE}/studregistry/LessonAttendance/LessonsList/27114?groupId={group}")
}

pub fn edit_url(group: u32, row: u32) -> String {
    format!("{BASE}/studregistry/LessonAttendance/Edit/{group}{row}")
}

pub const OVERVIEW_BODY: &str = r#"<html><head><title>Groups</title></head><body>
        <form method="post" name="lesson">
            <div class="row">
                <a class="col-4" href="/studregistry/LessonAttendance/LessonsList/27114?groupId=1">G1</a>
                <a class="col-2" href="/studregistry/Evaluation/Index/27114?groupId=1">Evaluare</a>
            </div>
            <div class="row">
                <a class="col-4" href="/studregistry/LessonAttendance/LessonsList/27114?groupId=2">G2</a>
                <a class="col-2" href="/studregistry/Evaluation/Index/27114?groupId=2">Evaluare</a>
            </div>
            <input name="__RequestVerificationToken" type="hidden" value="form-token">
        </form></body></html>"#;

pub fn lesson_list_body(group: u32) -> String {
    let rows: String = (1..=3)
        .map(|row| {
            format!(
                r#"<tr><td>0{row}.09.2024</td><td>curs</td><td><a href="/studregistry/LessonAttendance/Edit/{group}{row}">edit</a></td></tr>"#
            )
        })
        .collect();
    format!(
        r#"<html><body><div><main>
            <h2>Lessons</h2><div>filters</div><div>legend</div><p>note</p>
            <div><table><thead><tr><th>Date</th><th>Type</th><th></th></tr></thead>
            <tbody>{rows}</tbody></table></div>
        </main></div></body></html>"#
    )
}

pub fn edit_body(group: u32, row: u32) -> String {
    format!(
        r#"<html><body><form method="post">
            <input name="LessonId" type="hidden" value="{group}{row}">
            <input name="LessonDate" value="2024-09-0{row}T08:00:00">
            <input name="LessonTopic" value="old topic">
            <select name="LessonType">
                <option value="1">curs</option>
                <option value="2" selected="selected">laborator</option>
            </select>
            <select name="Room"><option value="101">101</option></select>
            <input name="__RequestVerificationToken" type="hidden" value="form-token">
        </form></body></html>"#
    )
}

pub fn healthy_portal() -> MockPortal {
    let mut portal = MockPortal::default();
    portal.route(
        Method::Post,
        LOGIN_URL,
        302,
        Some("ForDecanat=session-token; path=/; httponly"),
        "",
    );
    portal.route(
        Method::Get,
        OVERVIEW_URL,
        200,
        Some(&format!("{ANTIFORGERY_COOKIE}; path=/; samesite=strict; httponly")),
        OVERVIEW_BODY,
    );
    for group in 1..=2 {
        portal.route(Method::Get, &lesson_list_url(group), 200, None, &lesson_list_body(group));
        for row in 1..=3 {
            portal.route(Method::Get, &edit_url(group, row), 200, None, &edit_body(group, row));
            portal.route(Method::Post, &edit_url(group, row), 200, None, "saved");
        }
    }
    portal
}

pub fn config(row_mismatch: RowMismatchPolicy) -> PortalConfig {
    PortalConfig {
        credentials: Credentials {
            login: "lecturer".to_string(),
            password: "secret".to_string(),
        },
        base_url: Url::parse(BASE).unwrap(),
        course_id: 27114,
        schedule_path: PathBuf::from("schedule.txt"),
        row_mismatch,
        debug_dump_path: None,
    }
}

pub fn topics() -> Vec<TopicRecord> {
    ScheduleParser::new()
        .unwrap()
        .parse(include_str!("../../schedule.txt"))
        .unwrap()
}

pub fn cookie_header(request: &PortalRequest) -> Option<&str> {
    request
        .headers
        .iter()
        .find(|(name, _)| *name == "cookie")
        .map(|(_, value)| value.as_str())
}

pub fn posted_topic(request: &PortalRequest) -> Option<String> {
    match &request.body {
        RequestBody::Multipart(snapshot) => snapshot.get("LessonTopic").map(str::to_string),
        RequestBody::Empty => None,
    }
}
