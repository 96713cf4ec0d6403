use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

pub const DEFAULT_TOKEN: &str = "mock-token";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Address {
    #[serde(rename = "Line1")]
    pub line1: String,
    #[serde(rename = "Line2")]
    pub line2: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Company {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Address")]
    pub address: Address,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Timezone")]
    pub timezone: String,
    #[serde(rename = "Currency")]
    pub currency: String,
}

/// `{ID, Name}` pair used for list entries and nested references.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Reference {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SecurityGroup {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "BusinessGroup")]
    pub business_group: Option<Reference>,
    #[serde(rename = "Dashboards")]
    pub dashboards: Option<Vec<Reference>>,
}

#[derive(Clone, Debug)]
pub struct CompanyRecord {
    pub company: Company,
    pub security_groups: Vec<SecurityGroup>,
}

/// In-memory tenant served by the mock.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub companies: Vec<CompanyRecord>,
}

impl Dataset {
    /// Two companies; the first has one group without a business group and
    /// one with, the second has no groups.
    pub fn sample() -> Self {
        let head_office = Company {
            id: 0,
            name: "Acme Plumbing".to_string(),
            phone: "+61 3 9000 0000".to_string(),
            email: "office@acme.example".to_string(),
            address: Address {
                line1: "1 Main St".to_string(),
                line2: "Springfield VIC 3000".to_string(),
            },
            country: "Australia".to_string(),
            timezone: "Australia/Melbourne".to_string(),
            currency: "AUD".to_string(),
        };
        let branch = Company {
            id: 5,
            name: "Acme Electrical".to_string(),
            phone: "+64 9 300 0000".to_string(),
            email: "sparkies@acme.example".to_string(),
            address: Address {
                line1: "22 Queen St".to_string(),
                line2: String::new(),
            },
            country: "New Zealand".to_string(),
            timezone: "Pacific/Auckland".to_string(),
            currency: "NZD".to_string(),
        };

        Self {
            companies: vec![
                CompanyRecord {
                    company: head_office,
                    security_groups: vec![
                        SecurityGroup {
                            id: 1,
                            name: "Administrators".to_string(),
                            business_group: None,
                            dashboards: None,
                        },
                        SecurityGroup {
                            id: 4,
                            name: "Field Staff".to_string(),
                            business_group: Some(Reference {
                                id: 2,
                                name: "Service".to_string(),
                            }),
                            dashboards: Some(vec![
                                Reference {
                                    id: 10,
                                    name: "Jobs".to_string(),
                                },
                                Reference {
                                    id: 11,
                                    name: "Schedule".to_string(),
                                },
                            ]),
                        },
                    ],
                },
                CompanyRecord {
                    company: branch,
                    security_groups: Vec::new(),
                },
            ],
        }
    }

    fn company(&self, id: u64) -> Option<&CompanyRecord> {
        self.companies.iter().find(|r| r.company.id == id)
    }
}

#[derive(Clone, Debug)]
pub struct MockState {
    pub token: String,
    pub dataset: Arc<Dataset>,
}

impl MockState {
    pub fn new(token: impl Into<String>, dataset: Dataset) -> Self {
        Self {
            token: token.into(),
            dataset: Arc::new(dataset),
        }
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN, Dataset::sample())
    }
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route("/api/v1.0/companies/", get(list_companies))
        .route("/api/v1.0/companies/{company_id}", get(get_company))
        .route(
            "/api/v1.0/companies/{company_id}/setup/securityGroups/",
            get(list_security_groups),
        )
        .route(
            "/api/v1.0/companies/{company_id}/setup/securityGroups/{group_id}",
            get(get_security_group),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", state.token);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => {
            debug!("rejecting request with missing or wrong bearer token");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

async fn list_companies(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Reference>>, StatusCode> {
    authorize(&state, &headers)?;
    let companies = state
        .dataset
        .companies
        .iter()
        .map(|r| Reference {
            id: r.company.id,
            name: r.company.name.clone(),
        })
        .collect();
    Ok(Json(companies))
}

async fn get_company(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(company_id): Path<u64>,
) -> Result<Json<Company>, StatusCode> {
    authorize(&state, &headers)?;
    state
        .dataset
        .company(company_id)
        .map(|r| Json(r.company.clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_security_groups(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(company_id): Path<u64>,
) -> Result<Json<Vec<Reference>>, StatusCode> {
    authorize(&state, &headers)?;
    let record = state
        .dataset
        .company(company_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let groups = record
        .security_groups
        .iter()
        .map(|g| Reference {
            id: g.id,
            name: g.name.clone(),
        })
        .collect();
    Ok(Json(groups))
}

async fn get_security_group(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path((company_id, group_id)): Path<(u64, u64)>,
) -> Result<Json<SecurityGroup>, StatusCode> {
    authorize(&state, &headers)?;
    state
        .dataset
        .company(company_id)
        .and_then(|r| r.security_groups.iter().find(|g| g.id == group_id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
