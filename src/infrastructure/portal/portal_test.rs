use anyhow::Result;
use test_utils::course_info_fixture;
use test_utils::requirements_fixture;

use super::Portal;
use super::PortalError;

impl Portal {
    fn with_url(url: &str, cookie: &str) -> Portal {
        return Portal {
            course_info_url: format!("{url}/cart"),
            requirements_url: format!("{url}/requirements"),
            cookie: cookie.to_string(),
        };
    }
}

#[tokio::test]
async fn it_fetches_course_info() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/cart")
        .match_header("cookie", "PS_TOKEN=abc")
        .with_status(200)
        .with_body(course_info_fixture())
        .create();

    let portal = Portal::with_url(&server.url(), "PS_TOKEN=abc");
    let res = portal.fetch_course_info().await?;

    assert_eq!(res.len(), 2);
    assert_eq!(res[0].cart_classes.len(), 2);
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_resolves_an_empty_cart() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/cart")
        .with_status(200)
        .with_body("<html><body></body></html>")
        .create();

    let portal = Portal::with_url(&server.url(), "");
    let res = portal.fetch_course_info().await?;

    assert!(res.is_empty());
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_error_status() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/cart").with_status(503).create();

    let portal = Portal::with_url(&server.url(), "");
    let err = portal.fetch_course_info().await.unwrap_err();

    assert!(matches!(err, PortalError::Status { status: 503, .. }));
    assert!(err.is_network());
    mock.assert();
}

#[tokio::test]
async fn it_fails_when_unreachable() {
    let portal = Portal::with_url("http://127.0.0.1:1", "");
    let err = portal.fetch_requirements().await.unwrap_err();

    assert!(matches!(err, PortalError::Network(_)));
}

#[tokio::test]
async fn it_fetches_requirements() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/requirements")
        .with_status(200)
        .with_body(requirements_fixture())
        .create();

    let portal = Portal::with_url(&server.url(), "");
    let record = portal.fetch_requirements().await?;

    assert_eq!(record.results.len(), 2);
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fails_requirements_without_the_container() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/requirements")
        .with_status(200)
        .with_body("<html><body><h1>Sign in</h1></body></html>")
        .create();

    let portal = Portal::with_url(&server.url(), "");
    let res = portal.fetch_requirements().await;

    assert!(matches!(res, Err(PortalError::MissingElement(_))));
    mock.assert();
}
