//! Client context and resource fetchers for the simPRO API.
//!
//! # Design
//! `SimproClient` holds the tenant domain, bearer token and the currently
//! selected company. Each fetcher is split the same way: a `build_*` method
//! that produces an `HttpRequest`, and a fetch method that runs it through
//! [`SimproClient::execute`], reads the body and decodes it with
//! [`decode_body`]. Only the company id changes after construction.
//!
//! `set_company` takes `&mut self`, so sharing a client across threads while
//! switching companies needs external synchronization chosen by the caller.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
use crate::types::{Company, CompanySummary, SecurityGroup, SecurityGroupSummary};

/// Versioned companies collection, appended to the domain.
pub const API_BASE: &str = "/api/v1.0/companies/";

/// Statuses treated as a successful exchange. 404 is passed through: the API
/// answers unknown ids with an empty 404 body rather than an error payload.
pub const ACCEPTED_STATUSES: [u16; 2] = [200, 404];

/// Blocking client for one simPRO tenant.
pub struct SimproClient<T = UreqTransport> {
    domain: String,
    token: String,
    company_id: u64,
    config: ClientConfig,
    transport: T,
}

impl SimproClient<UreqTransport> {
    /// Create a client with the default configuration (HTTPS, 60 s timeout).
    ///
    /// The token is validated before the domain.
    pub fn new(domain: &str, token: &str, company: Option<u64>) -> Result<Self, ConfigError> {
        Self::with_config(domain, token, company, ClientConfig::default())
    }

    pub fn with_config(
        domain: &str,
        token: &str,
        company: Option<u64>,
        config: ClientConfig,
    ) -> Result<Self, ConfigError> {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(domain, token, company, config, transport)
    }
}

impl<T: Transport> SimproClient<T> {
    /// Create a client that sends its requests through `transport`.
    pub fn with_transport(
        domain: &str,
        token: &str,
        company: Option<u64>,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self, ConfigError> {
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        if domain.is_empty() {
            return Err(ConfigError::EmptyDomain);
        }
        Ok(Self {
            domain: domain.to_string(),
            token: token.to_string(),
            company_id: company.unwrap_or_default(),
            config,
            transport,
        })
    }

    /// Select the company scoping company and security group fetches. No
    /// remote validation is performed.
    pub fn set_company(&mut self, id: u64) {
        self.company_id = id;
    }

    pub fn company(&self) -> u64 {
        self.company_id
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn base_url(&self) -> String {
        format!("{}://{}{}", self.config.scheme.as_str(), self.domain, API_BASE)
    }

    fn get(&self, url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {}", self.token)),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            body: None,
        }
    }

    pub fn build_list_companies(&self) -> HttpRequest {
        self.get(self.base_url())
    }

    pub fn build_get_company(&self) -> HttpRequest {
        self.get(format!("{}{}", self.base_url(), self.company_id))
    }

    pub fn build_list_security_groups(&self) -> HttpRequest {
        self.get(format!(
            "{}{}/setup/securityGroups/",
            self.base_url(),
            self.company_id
        ))
    }

    pub fn build_get_security_group(&self, group_id: u64) -> HttpRequest {
        self.get(format!(
            "{}{}/setup/securityGroups/{group_id}",
            self.base_url(),
            self.company_id
        ))
    }

    /// List every company visible to the token.
    pub fn list_companies(&self) -> Result<Vec<CompanySummary>, ApiError> {
        self.fetch(Operation::ListCompanies, &self.build_list_companies())
    }

    /// Fetch the detail record of the selected company.
    pub fn get_company(&self) -> Result<Company, ApiError> {
        self.fetch(Operation::GetCompany, &self.build_get_company())
    }

    /// List the security groups of the selected company.
    pub fn list_security_groups(&self) -> Result<Vec<SecurityGroupSummary>, ApiError> {
        self.fetch(Operation::ListSecurityGroups, &self.build_list_security_groups())
    }

    /// Fetch one security group of the selected company.
    pub fn get_security_group(&self, group_id: u64) -> Result<SecurityGroup, ApiError> {
        self.fetch(
            Operation::GetSecurityGroup,
            &self.build_get_security_group(group_id),
        )
    }

    /// Dispatch `request` and apply the status allow-list. The body is left
    /// unread.
    pub fn execute(
        &self,
        operation: Operation,
        request: &HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        debug!(%operation, method = request.method.as_str(), url = %request.url, "sending request");

        let response = self.transport.execute(request).map_err(|e| match e {
            TransportError::Build(cause) => ApiError::RequestBuild { operation, cause },
            TransportError::Execute(cause) => ApiError::RequestExecute { operation, cause },
        })?;

        debug!(%operation, status = response.status, "received response");
        if !ACCEPTED_STATUSES.contains(&response.status) {
            return Err(ApiError::UnexpectedStatus {
                operation,
                status: response.status,
            });
        }
        Ok(response)
    }

    fn fetch<R>(&self, operation: Operation, request: &HttpRequest) -> Result<R, ApiError>
    where
        R: DeserializeOwned + Default,
    {
        let response = self.execute(operation, request)?;
        let body = response.read_body().map_err(|e| ApiError::BodyRead {
            operation,
            cause: e.to_string(),
        })?;
        decode_body(operation, &body)
    }
}

/// Decode a response body. An empty body yields the zero value of `R`, which
/// is how the API reports "nothing found". A bare `null` document is treated
/// the same way.
pub fn decode_body<R>(operation: Operation, body: &[u8]) -> Result<R, ApiError>
where
    R: DeserializeOwned + Default,
{
    trace!(%operation, len = body.len(), "decoding body");
    if body.is_empty() || body.trim_ascii() == b"null" {
        return Ok(R::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Decode {
        operation,
        cause: e.to_string(),
    })
}

impl<T> fmt::Debug for SimproClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimproClient")
            .field("domain", &self.domain)
            .field("company_id", &self.company_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
