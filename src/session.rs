/// A cookie issued by the portal to guard state-changing requests. The name
/// is generated per deployment, so it travels together with the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntiforgeryToken {
    pub name: String,
    pub value: String,
}

/// Authentication artifacts gathered during one run.
///
/// Stages never mutate a shared context. Each one hands back a new value with
/// the field it discovered filled in, and a field that has been set is never
/// cleared again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    session_token: Option<String>,
    antiforgery_token: Option<AntiforgeryToken>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_token(self, token: impl Into<String>) -> Self {
        Self {
            session_token: Some(token.into()),
            ..self
        }
    }

    pub fn with_antiforgery_token(self, token: AntiforgeryToken) -> Self {
        Self {
            antiforgery_token: Some(token),
            ..self
        }
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn antiforgery_token(&self) -> Option<&AntiforgeryToken> {
        self.antiforgery_token.as_ref()
    }
}
