mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn deleting_a_payment_reports_success() -> Result<()> {
    let res = common::delete(common::test_app(), "/api/payments/pay-42").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Payment pay-42 deleted");
    Ok(())
}

#[tokio::test]
async fn deleting_a_tax_invoice_reports_success() -> Result<()> {
    let res = common::delete(common::test_app(), "/api/tax-invoices/inv-1").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Tax invoice inv-1 deleted");
    Ok(())
}

#[tokio::test]
async fn missing_ids_are_rejected() -> Result<()> {
    for uri in ["/api/payments", "/api/payments/", "/api/tax-invoices", "/api/tax-invoices/%20"] {
        let res = common::delete(common::test_app(), uri).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(res.body["error"], true);
    }
    Ok(())
}
