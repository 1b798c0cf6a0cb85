use thiserror::Error;

/// The single message shown to users for any failed lookup.
pub const USER_FACING_FAILURE: &str = "City not found. Please try again.";

/// Why a current-weather query produced no [`WeatherView`](crate::WeatherView).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The request never got a usable response: connect, DNS, timeout or
    /// body read failure.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The provider answered with a non-success status, typically 404 for an
    /// unknown city.
    #[error("Provider rejected the query with status {status}: {message}")]
    NotFound { status: u16, message: String },

    /// 2xx response whose body does not have the expected shape.
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

impl QueryError {
    /// Short tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Transport(_) => "transport",
            QueryError::NotFound { .. } => "not_found",
            QueryError::Malformed(_) => "malformed",
        }
    }

    /// Every kind collapses to the same user-visible text.
    pub fn user_message(&self) -> &'static str {
        USER_FACING_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_differ_but_user_message_does_not() {
        let errors = [
            QueryError::Transport("connection refused".into()),
            QueryError::NotFound { status: 404, message: "city not found".into() },
            QueryError::Malformed("missing field `temp`".into()),
        ];

        let kinds: Vec<_> = errors.iter().map(QueryError::kind).collect();
        assert_eq!(kinds, ["transport", "not_found", "malformed"]);

        for err in &errors {
            assert_eq!(err.user_message(), USER_FACING_FAILURE);
        }
    }

    #[test]
    fn display_carries_diagnostics() {
        let err = QueryError::NotFound { status: 404, message: "city not found".into() };
        assert_eq!(
            err.to_string(),
            "Provider rejected the query with status 404: city not found"
        );
    }
}
