mod common;

use common::gateway::{client_for, controller_for, expect_no_requests, mount_get, output_of};
use payline::cmd_args::FlowCommand;
use payline::view_models::{FailureKind, VerifyFlow};
use serde_json::json;
use wiremock::MockServer;

#[tokio::test]
async fn paid_status_should_expose_payment_details() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/bankilypay/verify/TX-001",
        200,
        json!({"status": "paid", "apiID": "BK-778", "payment_date": "2024-04-12 10:31:00"}),
    )
    .await;

    let mut flow = VerifyFlow::new();
    flow.set_transaction_id("TX-001");
    let state = flow.submit(&client_for(&server)).await;

    let result = state.result().expect("verification should succeed");
    assert!(result.is_paid());
    assert_eq!(result.transaction_id, "TX-001");
    assert_eq!(result.api_id.as_deref(), Some("BK-778"));
    assert_eq!(result.payment_date.as_deref(), Some("2024-04-12 10:31:00"));
    assert!(flow.show_raw());
    assert_eq!(flow.raw().map(|raw| raw["status"].clone()), Some(json!("paid")));
}

#[tokio::test]
async fn pending_status_should_not_count_as_paid() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/bankilypay/verify/TX-002",
        200,
        json!({"status": "pending"}),
    )
    .await;

    let mut controller = controller_for(&server);
    let succeeded = controller
        .run_once(FlowCommand::Verify {
            transaction_id: "TX-002".to_string(),
        })
        .await
        .unwrap();
    assert!(succeeded);
    assert!(!controller.verify().state().result().unwrap().is_paid());

    let output = output_of(controller);
    assert!(output.contains("Vérification en cours..."));
    assert!(output.contains("Statut de paiement: PENDING"));
    assert!(output.contains("Le paiement n'a pas encore été effectué"));
    assert!(output.contains("Données brutes"));
}

#[tokio::test]
async fn http_error_should_keep_payload_and_show_it() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/bankilypay/verify/TX-404",
        404,
        json!({"error": {"code": 404, "message": "Transaction inconnue"}}),
    )
    .await;

    let mut flow = VerifyFlow::new();
    flow.set_transaction_id("TX-404");
    let state = flow.submit(&client_for(&server)).await;

    let failure = state.failure().expect("verification should fail");
    assert_eq!(failure.kind, FailureKind::Transport);
    assert_eq!(failure.message, "Transaction inconnue");
    assert!(flow.show_raw());
    assert_eq!(flow.raw().unwrap()["error"]["code"], 404);
}

#[tokio::test]
async fn http_error_without_message_should_use_fallback() {
    let server = MockServer::start().await;
    mount_get(&server, "/bankilypay/verify/TX-500", 500, json!({})).await;

    let mut controller = controller_for(&server);
    let succeeded = controller
        .run_once(FlowCommand::Verify {
            transaction_id: "TX-500".to_string(),
        })
        .await
        .unwrap();
    assert!(!succeeded);

    let output = output_of(controller);
    assert!(output.contains("Erreur : Failed to verify payment"));
}

#[tokio::test]
async fn blank_transaction_id_should_not_reach_gateway() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;

    let mut flow = VerifyFlow::new();
    flow.set_transaction_id("");
    let state = flow.submit(&client_for(&server)).await;

    assert_eq!(state.failure().map(|f| f.kind), Some(FailureKind::Validation));
    assert!(!flow.show_raw());
}

#[tokio::test]
async fn reset_should_clear_result_payload_and_input() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/bankilypay/verify/TX-001",
        200,
        json!({"status": "paid", "apiID": "BK-778"}),
    )
    .await;

    let mut flow = VerifyFlow::new();
    flow.set_transaction_id("TX-001");
    flow.submit(&client_for(&server)).await;
    assert!(flow.raw().is_some());

    flow.reset();
    assert!(flow.state().is_idle());
    assert!(flow.raw().is_none());
    assert_eq!(flow.transaction_id(), "");
}
