//! Fetcher walkthrough against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every fetcher over
//! real HTTP through the default `ureq` transport, with the scheme switched
//! to plain HTTP.

use std::net::SocketAddr;

use mock_server::{Dataset, MockState, DEFAULT_TOKEN};
use simpro_core::{ApiError, ClientConfig, Company, Operation, Scheme, SecurityGroup, SimproClient};

fn start_mock_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, MockState::new(DEFAULT_TOKEN, Dataset::sample())).await
        })
        .unwrap();
    });

    addr
}

fn http_config() -> ClientConfig {
    ClientConfig {
        scheme: Scheme::Http,
        ..ClientConfig::default()
    }
}

#[test]
fn fetcher_walkthrough() {
    let addr = start_mock_server();
    let mut client =
        SimproClient::with_config(&addr.to_string(), DEFAULT_TOKEN, None, http_config()).unwrap();

    // Step 1: list companies.
    let companies = client.list_companies().unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[1].id, 5);
    assert_eq!(companies[1].name, "Acme Electrical");

    // Step 2: company 0 is selected by default.
    let company = client.get_company().unwrap();
    assert_eq!(company.name, "Acme Plumbing");
    assert_eq!(company.address.line1, "1 Main St");
    assert_eq!(company.currency, "AUD");

    // Step 3: security groups of company 0.
    let groups = client.list_security_groups().unwrap();
    let ids: Vec<u64> = groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 4]);

    // Step 4: group without business group or dashboards.
    let admins = client.get_security_group(1).unwrap();
    assert_eq!(admins.name, "Administrators");
    assert!(admins.business_group.is_none());
    assert!(admins.dashboards.is_empty());

    // Step 5: group with both references.
    let field = client.get_security_group(4).unwrap();
    assert_eq!(field.business_group.map(|b| b.name).as_deref(), Some("Service"));
    let dashboards: Vec<&str> = field.dashboards.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(dashboards, vec!["Jobs", "Schedule"]);

    // Step 6: unknown group answers 404 with an empty body.
    assert_eq!(client.get_security_group(99).unwrap(), SecurityGroup::default());

    // Step 7: switch company.
    client.set_company(5);
    assert_eq!(client.get_company().unwrap().timezone, "Pacific/Auckland");
    assert!(client.list_security_groups().unwrap().is_empty());

    // Step 8: unknown company decodes to zero values.
    client.set_company(404);
    assert_eq!(client.get_company().unwrap(), Company::default());
    assert!(client.list_security_groups().unwrap().is_empty());
}

#[test]
fn wrong_token_is_an_unexpected_status() {
    let addr = start_mock_server();
    let client =
        SimproClient::with_config(&addr.to_string(), "not-the-token", None, http_config()).unwrap();

    let err = client.list_companies().unwrap_err();
    assert_eq!(
        err,
        ApiError::UnexpectedStatus {
            operation: Operation::ListCompanies,
            status: 401
        }
    );
}

#[test]
fn unreachable_host_is_an_execute_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = SimproClient::with_config(
        &format!("127.0.0.1:{port}"),
        DEFAULT_TOKEN,
        Some(1),
        http_config(),
    )
    .unwrap();

    let err = client.get_company().unwrap_err();
    assert!(matches!(
        err,
        ApiError::RequestExecute {
            operation: Operation::GetCompany,
            ..
        }
    ));
}

#[test]
fn malformed_domain_is_a_build_error() {
    let client =
        SimproClient::with_config("bad domain", DEFAULT_TOKEN, None, http_config()).unwrap();

    let err = client.list_companies().unwrap_err();
    assert!(matches!(
        err,
        ApiError::RequestBuild {
            operation: Operation::ListCompanies,
            ..
        }
    ));
}
