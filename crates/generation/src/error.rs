// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Ways a collaborator call can fail.
///
/// Rate limiting and quota exhaustion are kept distinct because callers
/// can act on them; nothing here is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// The service is throttling requests.
    #[error("Generation service rate limit exceeded: {0}")]
    RateLimited(String),

    /// The account has no credits left.
    #[error("Generation service credits exhausted: {0}")]
    QuotaExhausted(String),

    /// No response arrived within the configured timeout.
    #[error("Generation service did not respond within {seconds} seconds")]
    Timeout {
        /// The timeout that expired.
        seconds: u64,
    },

    /// A response arrived but carried no usable schedule payload.
    #[error("Generation service returned an unusable response: {0}")]
    Malformed(String),

    /// The service answered with an unexpected HTTP status.
    #[error("Generation service returned HTTP {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The request never completed (DNS, TLS, connection reset).
    #[error("Generation request failed: {0}")]
    Transport(String),
}

impl CollaboratorError {
    /// Returns the machine-readable kind reported to callers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RateLimited(_) => "rate_limit",
            Self::QuotaExhausted(_) => "credits_exhausted",
            Self::Timeout { .. } => "collaborator_timeout",
            Self::Malformed(_) | Self::Upstream { .. } | Self::Transport(_) => {
                "collaborator_error"
            }
        }
    }
}
