use log::{debug, info};
use reqwest::Url;

use crate::{
    config::Credentials,
    error::{PortalError, PortalResult},
    headers::{AUTH_COOKIE_NAME, build_headers},
    pages::LoginPage,
    requests::{PortalRequest, RequestBody, Transport},
    session::SessionContext,
};

const LOGIN_REDIRECT_STATUS: u16 = 302;

/// Logs in once and returns the session token from the auth cookie.
pub async fn login<T: Transport>(
    transport: &T,
    base_url: &Url,
    credentials: &Credentials,
) -> PortalResult<String> {
    let login_url = LoginPage::url(base_url)?;
    let url = LoginPage::submission_url(base_url, credentials)?;
    let headers = build_headers(&SessionContext::new(), login_url.as_str());
    debug!("POST {login_url}");

    let response = transport
        .send(PortalRequest::post(url, headers, RequestBody::Empty).without_redirects())
        .await?;

    if response.status != LOGIN_REDIRECT_STATUS {
        return Err(PortalError::Authentication(format!(
            "expected HTTP {LOGIN_REDIRECT_STATUS}, got HTTP {} {}",
            response.status, response.reason
        )));
    }

    let Some(set_cookie) = response.set_cookie.as_deref() else {
        return Err(PortalError::Authentication(
            "no cookies in login response".to_string(),
        ));
    };
    let token = LoginPage::extract_session_token(set_cookie).ok_or_else(|| {
        PortalError::Authentication(format!("login response has no {AUTH_COOKIE_NAME} cookie"))
    })?;

    info!("Authenticated against {base_url}");
    Ok(token)
}
