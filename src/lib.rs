mod authenticator;
mod config;
mod cookies;
mod error;
mod form_replay;
mod form_snapshot;
mod group_discoverer;
mod headers;
mod pages;
mod pipeline;
mod requests;
mod schedule;
mod session;
mod text_manipulators;

pub use authenticator::login;
pub use config::{Credentials, LoadFromEnv, PortalConfig, PortalEnv, RowMismatchPolicy};
pub use cookies::{find_cookie_with_prefix, parse_cookies};
pub use error::{PortalError, PortalResult};
pub use form_replay::{list_lesson_rows, submit_topic};
pub use form_snapshot::FormSnapshot;
pub use group_discoverer::{DiscoveredGroups, discover_groups};
pub use headers::{AUTH_COOKIE_NAME, HeaderList, build_headers};
pub use pages::{ANTIFORGERY_COOKIE_PREFIX, TOPIC_FIELD};
pub use pipeline::{RunReport, assign_topics, run};
pub use requests::{Method, PortalRequest, PortalResponse, RequestBody, RequestClient, Transport};
pub use schedule::{LessonKind, ScheduleParser, TopicRecord, load_schedule};
pub use session::{AntiforgeryToken, SessionContext};
