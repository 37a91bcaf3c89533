//! Mock Bankily-pay gateway helpers

use payline::config::IniProfile;
use payline::views::TerminalRenderer;
use payline::{AppController, GatewayClient};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";

/// Path prefix the mock gateway is mounted under, like a Dolibarr REST root
pub const API_ROOT: &str = "/api/index.php";

pub fn client_for(server: &MockServer) -> GatewayClient {
    let profile = IniProfile::blank()
        .with_server(format!("{}{}", server.uri(), API_ROOT))
        .with_api_key(API_KEY);
    GatewayClient::new(&profile).expect("mock gateway client")
}

pub fn controller_for(server: &MockServer) -> AppController<Vec<u8>> {
    AppController::new(client_for(server), TerminalRenderer::new(Vec::new(), false))
}

pub fn output_of(controller: AppController<Vec<u8>>) -> String {
    String::from_utf8(controller.into_renderer().into_inner()).expect("utf-8 output")
}

/// Mount a GET endpoint that must carry the API key
pub async fn mount_get(server: &MockServer, endpoint: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{API_ROOT}{endpoint}")))
        .and(header("DOLAPIKEY", API_KEY))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Fail the test if any request reaches the gateway
pub async fn expect_no_requests(server: &MockServer) {
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

pub fn invoice_body() -> Value {
    json!({
        "errorCode": 0,
        "errorMessage": "",
        "data": {
            "name": "Sahel Distribution",
            "phone": "22233445",
            "amount": "1800.00000000"
        },
        "details": {
            "status": "1",
            "payment_status": "0",
            "ref": "FA2404-0012",
            "date": "2024-04-12",
            "lines": [
                {
                    "description": "Ciment 50kg",
                    "quantity": "12.00",
                    "unit_price": "125.00000000",
                    "total": "1500.00000000",
                    "vat_rate": "20.000"
                },
                {
                    "description": "",
                    "quantity": "1",
                    "unit_price": "300.5",
                    "total": "12.50",
                    "vat_rate": "0"
                }
            ]
        }
    })
}
