//! Blocking client for the simPRO business-management API.
//!
//! # Overview
//! Construct a `SimproClient` once with the tenant domain and a bearer token,
//! select a company, then call the fetchers. Each fetcher performs exactly
//! one GET round trip and decodes the JSON body into a typed model.
//!
//! ```no_run
//! use simpro_core::SimproClient;
//!
//! let mut client = SimproClient::new("acme.simprocloud.com", "token", None)?;
//! let companies = client.list_companies()?;
//! if let Some(first) = companies.first() {
//!     client.set_company(first.id);
//!     let groups = client.list_security_groups()?;
//!     println!("{} has {} security groups", first.name, groups.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design
//! - Status policy: 200 and 404 are accepted, everything else is an
//!   `ApiError::UnexpectedStatus` and the body is never read.
//! - An empty body decodes to the zero value of the result type; callers
//!   cannot tell "not found" from "empty" at this layer.
//! - No retries, pagination or caching. Every failure is returned to the
//!   caller as is.
//! - The library emits `tracing` events at debug/trace level and never
//!   installs a subscriber.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{decode_body, SimproClient, ACCEPTED_STATUSES, API_BASE};
pub use config::{ClientConfig, Scheme, DEFAULT_TIMEOUT};
pub use error::{ApiError, ConfigError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use types::{
    BusinessGroupRef, Company, CompanyAddress, CompanySummary, DashboardRef, SecurityGroup,
    SecurityGroupSummary,
};
