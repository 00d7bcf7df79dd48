mod common;

use anyhow::Result;
use axum::http::StatusCode;

use common::ALICE_TOKEN;

#[tokio::test]
async fn tenant_dashboard_describes_scoped_views() -> Result<()> {
    let res = common::get(common::test_app(), "/t/acme/dashboard", Some(ALICE_TOKEN)).await?;

    assert_eq!(res.status, StatusCode::OK);
    let data = &res.body["data"];
    assert_eq!(data["page"], "dashboard");
    assert_eq!(data["tenant"]["base_path"], "/t/acme");
    assert_eq!(data["tenant"]["tenant_id"], "acme");
    assert_eq!(data["views"]["default"], "/t/acme/dashboard");
    assert_eq!(data["user"]["email"], "alice@x.com");

    let routes: Vec<&str> = data["views"]["views"]
        .as_array()
        .expect("views array")
        .iter()
        .filter_map(|entry| entry["route"].as_str())
        .collect();
    assert!(routes.iter().all(|route| route.starts_with("/t/acme/")), "{routes:?}");
    Ok(())
}

#[tokio::test]
async fn unscoped_documents_page_has_empty_base() -> Result<()> {
    let res = common::get(common::test_app(), "/documents/quotes", Some(ALICE_TOKEN)).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["tenant"]["base_path"], "");
    assert!(res.body["data"]["tenant"]["tenant_id"].is_null());
    assert_eq!(res.body["data"]["views"]["default"], "/documents/quotes");
    Ok(())
}

#[tokio::test]
async fn signed_out_visitor_is_sent_to_login() -> Result<()> {
    let res = common::get(common::test_app(), "/t/acme/finance/payments", None).await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn legacy_tenant_finance_forwards_to_payments() -> Result<()> {
    let res = common::get(common::test_app(), "/t/beta/finance", None).await?;

    assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.location(), Some("/t/beta/finance/payments"));
    assert!(res.body.is_null());
    Ok(())
}

#[tokio::test]
async fn legacy_documents_forward_to_quotes() -> Result<()> {
    let scoped = common::get(common::test_app(), "/t/acme/documents", Some(ALICE_TOKEN)).await?;
    assert_eq!(scoped.location(), Some("/t/acme/documents/quotes"));

    let unscoped = common::get(common::test_app(), "/documents", None).await?;
    assert_eq!(unscoped.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(unscoped.location(), Some("/documents/quotes"));
    Ok(())
}
