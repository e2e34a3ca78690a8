use std::fmt;

use serenity::all::GatewayError;
use serenity::http::HttpError;
use tracing_error::SpanTrace;

#[derive(thiserror::Error)]
pub struct Error {
    pub source: anyhow::Error,
    pub span_trace: SpanTrace,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)?;
        write!(f, "\n\nSpan trace:\n")?;
        fmt::Display::fmt(&self.span_trace, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Error {
            source: error,
            span_trace: SpanTrace::capture(),
        }
    }
}

macro_rules! error_from {
    ($t:ty) => {
        impl From<$t> for Error {
            fn from(error: $t) -> Self {
                Error {
                    source: error.into(),
                    span_trace: SpanTrace::capture(),
                }
            }
        }
    };
}

error_from!(serenity::Error);
error_from!(sqlx::Error);
error_from!(std::io::Error);
error_from!(toml::de::Error);

pub type Result<T> = core::result::Result<T, Error>;

macro_rules! bail {
    ($($args:tt)*) => {
        return Err(anyhow::anyhow!($($args)*).into())
    };
}
pub(crate) use bail;

/// Whether a client startup error means the token was rejected, as opposed
/// to any other failure to reach or hold the gateway.
pub fn is_login_failure(error: &serenity::Error) -> bool {
    match error {
        serenity::Error::Gateway(GatewayError::InvalidAuthentication) => true,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            response.status_code == http::StatusCode::UNAUTHORIZED
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_authentication_is_a_login_failure() {
        let error = serenity::Error::Gateway(GatewayError::InvalidAuthentication);
        assert!(is_login_failure(&error));
    }

    #[test]
    fn other_gateway_errors_are_not() {
        let error = serenity::Error::Other("gateway fell over");
        assert!(!is_login_failure(&error));
    }

    #[test]
    fn anyhow_errors_keep_their_message() {
        let error: Error = anyhow::anyhow!("no such cog").into();
        assert_eq!(error.to_string(), "no such cog");
    }
}
