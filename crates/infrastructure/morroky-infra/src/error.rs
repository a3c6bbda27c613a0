#[derive(Debug, thiserror::Error)]
pub enum BaasError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not signed in")]
    NotSignedIn,
    #[error("backend returned no row")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaasErrorKind {
    Transport,
    Unauthorized,
    NotFound,
    Rejected,
    Codec,
}

impl BaasError {
    pub fn kind(&self) -> BaasErrorKind {
        match self {
            BaasError::Http(_) => BaasErrorKind::Transport,
            BaasError::Api { status, .. } => match *status {
                401 | 403 => BaasErrorKind::Unauthorized,
                404 | 406 => BaasErrorKind::NotFound,
                _ => BaasErrorKind::Rejected,
            },
            BaasError::Decode(_) => BaasErrorKind::Codec,
            BaasError::NotSignedIn => BaasErrorKind::Unauthorized,
            BaasError::EmptyResponse => BaasErrorKind::NotFound,
        }
    }

    /// Builds an [`BaasError::Api`] from a non-success response body. The
    /// auth, REST and storage services each name the message field differently.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["error_description", "msg", "message", "error"]
                    .iter()
                    .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        BaasError::Api { status, message }
    }
}
