use std::{fmt, path::PathBuf, str::FromStr};

use reqwest::Url;
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::{PortalError, PortalResult};

const DEFAULT_BASE_URL: &str = "http://crd.usm.md";
const DEFAULT_COURSE_ID: u32 = 27114;
const DEFAULT_SCHEDULE_PATH: &str = "schedule.txt";
const DEFAULT_DEBUG_DUMP_PATH: &str = "group.html";

/// Raw env vars, before validation.
#[derive(Debug, Deserialize)]
pub struct PortalEnv {
    login: String,
    password: String,
    portal_base_url: Option<String>,
    course_id: Option<String>,
    schedule_path: Option<PathBuf>,
    row_mismatch: Option<String>,
    debug_dump_path: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What to do when a group has a different number of lesson rows than the
/// schedule has topics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowMismatchPolicy {
    /// Assign the shorter of the two lengths without saying anything.
    Truncate,
    /// Assign the shorter of the two lengths and log a warning.
    #[default]
    Warn,
    /// Abort before touching the group.
    Fail,
}

impl FromStr for RowMismatchPolicy {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "warn" => Ok(Self::Warn),
            "fail" => Ok(Self::Fail),
            other => Err(PortalError::Configuration(format!(
                "ROW_MISMATCH must be one of truncate, warn, fail; got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub credentials: Credentials,
    pub base_url: Url,
    pub course_id: u32,
    pub schedule_path: PathBuf,
    pub row_mismatch: RowMismatchPolicy,
    pub debug_dump_path: Option<PathBuf>,
}

impl PortalConfig {
    pub fn new() -> PortalResult<Self> {
        let portal_env = PortalEnv::load_from_env()?;
        Self::from_env(portal_env)
    }

    pub fn from_env(portal_env: PortalEnv) -> PortalResult<Self> {
        let raw_base_url = portal_env
            .portal_base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_base_url).map_err(|e| {
            PortalError::Configuration(format!("PORTAL_BASE_URL {raw_base_url:?} is invalid: {e}"))
        })?;

        let course_id = match portal_env.course_id {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                PortalError::Configuration(format!("COURSE_ID must be numeric, got {raw:?}"))
            })?,
            None => DEFAULT_COURSE_ID,
        };

        let row_mismatch = match portal_env.row_mismatch {
            Some(raw) => raw.parse()?,
            None => RowMismatchPolicy::default(),
        };

        // An explicitly empty DEBUG_DUMP_PATH turns the dump off.
        let debug_dump_path = match portal_env.debug_dump_path {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_DEBUG_DUMP_PATH)),
        };

        Ok(Self {
            credentials: Credentials {
                login: portal_env.login,
                password: portal_env.password,
            },
            base_url,
            course_id,
            schedule_path: portal_env
                .schedule_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEDULE_PATH)),
            row_mismatch,
            debug_dump_path,
        })
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> PortalResult<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        Self::load_from_iter(std::env::vars())
    }

    fn load_from_iter(vars: impl Iterator<Item = (String, String)>) -> PortalResult<Self> {
        envy::from_iter::<_, Self>(vars).map_err(|e| match e {
            envy::Error::MissingValue(field) => PortalError::Configuration(format!(
                "the environment variable {} is required",
                field.to_uppercase()
            )),
            other => PortalError::Configuration(format!(
                "failed to load env variables into config struct: {other}"
            )),
        })
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
