//! Error types for the simPRO API client.
//!
//! # Design
//! Construction failures (`ConfigError`) are kept apart from request failures
//! (`ApiError`) because they happen before any network activity. Every
//! `ApiError` variant records which fetcher failed and keeps the underlying
//! cause as text, so callers can branch on the variant and still log the
//! original diagnostic.

use std::fmt;

use thiserror::Error;

/// The fetcher an `ApiError` originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListCompanies,
    GetCompany,
    ListSecurityGroups,
    GetSecurityGroup,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ListCompanies => "list_companies",
            Operation::GetCompany => "get_company",
            Operation::ListSecurityGroups => "list_security_groups",
            Operation::GetSecurityGroup => "get_security_group",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by `SimproClient` constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The bearer token was empty.
    #[error("client configuration: access token cannot be empty")]
    EmptyToken,

    /// The tenant domain was empty.
    #[error("client configuration: domain cannot be empty")]
    EmptyDomain,
}

/// Errors returned by `SimproClient` fetchers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The HTTP request could not be assembled (malformed URL or header).
    #[error("{operation}: failed to build request: {cause}")]
    RequestBuild { operation: Operation, cause: String },

    /// The round trip itself failed: DNS, TLS, connect, reset or timeout.
    #[error("{operation}: failed to execute request: {cause}")]
    RequestExecute { operation: Operation, cause: String },

    /// The server answered with a status outside the accepted set. The body
    /// was not read.
    #[error("{operation}: unexpected response status {status}")]
    UnexpectedStatus { operation: Operation, status: u16 },

    /// The status was accepted but the body could not be read.
    #[error("{operation}: failed to read response body: {cause}")]
    BodyRead { operation: Operation, cause: String },

    /// The body was non-empty and did not decode into the expected shape.
    #[error("{operation}: failed to decode response body: {cause}")]
    Decode { operation: Operation, cause: String },
}

impl ApiError {
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::RequestBuild { operation, .. }
            | ApiError::RequestExecute { operation, .. }
            | ApiError::UnexpectedStatus { operation, .. }
            | ApiError::BodyRead { operation, .. }
            | ApiError::Decode { operation, .. } => *operation,
        }
    }

    /// The HTTP status code, for `UnexpectedStatus` only.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
