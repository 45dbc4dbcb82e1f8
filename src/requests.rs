use reqwest::{
    Client, ClientBuilder, Url,
    header::SET_COOKIE,
    multipart::Form,
    redirect::Policy,
};

use crate::{error::PortalResult, form_snapshot::FormSnapshot, headers::HeaderList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// Sent as `multipart/form-data`. The portal rejects url-encoded bodies.
    Multipart(FormSnapshot),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderList,
    pub body: RequestBody,
    pub follow_redirects: bool,
}

impl PortalRequest {
    pub fn get(url: Url, headers: HeaderList) -> Self {
        Self {
            method: Method::Get,
            url,
            headers,
            body: RequestBody::Empty,
            follow_redirects: true,
        }
    }

    pub fn post(url: Url, headers: HeaderList, body: RequestBody) -> Self {
        Self {
            method: Method::Post,
            url,
            headers,
            body,
            follow_redirects: true,
        }
    }

    pub fn without_redirects(self) -> Self {
        Self {
            follow_redirects: false,
            ..self
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PortalResponse {
    pub status: u16,
    pub reason: String,
    /// Every `Set-Cookie` header of the response joined with `"; "`.
    pub set_cookie: Option<String>,
    pub body: String,
}

impl PortalResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and reads the whole response. Implementations must not
/// retry.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: PortalRequest) -> PortalResult<PortalResponse>;
}

pub struct RequestClient {
    client: Client,
    // Login success is signalled by the 302 itself.
    no_redirect_client: Client,
}

impl RequestClient {
    pub fn new() -> PortalResult<Self> {
        let client = ClientBuilder::new().build()?;
        let no_redirect_client = ClientBuilder::new().redirect(Policy::none()).build()?;
        Ok(Self {
            client,
            no_redirect_client,
        })
    }
}

impl Transport for RequestClient {
    async fn send(&self, request: PortalRequest) -> PortalResult<PortalResponse> {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };

        let mut builder = match request.method {
            Method::Get => client.get(request.url),
            Method::Post => client.post(request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let RequestBody::Multipart(snapshot) = request.body {
            let form = snapshot
                .into_fields()
                .into_iter()
                .fold(Form::new(), |form, (name, value)| form.text(name, value));
            builder = builder.multipart(form);
        }

        let response = builder.send().await?;
        let status = response.status();
        let cookies: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        let set_cookie = if cookies.is_empty() {
            None
        } else {
            Some(cookies.join("; "))
        };

        Ok(PortalResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            set_cookie,
            body: response.text().await?,
        })
    }
}
