use std::time::Duration;

use reqwest::blocking::Client;
use zerokit_admin_core::{AdminApiClient, Config, Request, Result};
use zerokit_admin_http_send_reqwest::ReqwestHttpSend;

fn main() -> Result<()> {
    env_logger::init();

    // Create a custom reqwest client with specific configuration
    let http = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("zerokit-admin-example/1.0")
        .build()
        .expect("build reqwest client");

    // Credentials come from the tenant's management portal. All
    // configuration is explicit; nothing is read from the environment.
    let client = AdminApiClient::new(
        Config {
            base_url: "https://abc12345.api.tresorit.io".to_string(),
            admin_key: "00".repeat(32),
            ..Default::default()
        },
        ReqwestHttpSend::new(http),
    )?;

    println!("Signing as {}", client.admin_user_id());

    let mut req = Request::new(
        http::Method::POST,
        "https://abc12345.api.tresorit.io/api/v4/admin/user/init-user-registration"
            .parse()
            .expect("valid url"),
    )
    .with_body(&br#"{"UserId":"user@example.com"}"#[..]);

    match client.call(&mut req) {
        Ok(resp) => {
            println!("Response status: {}", resp.status);
            if let Some(body) = &resp.body {
                println!("{}", String::from_utf8_lossy(body));
            }
        }
        Err(e) => {
            if let Some(api) = e.api_error() {
                eprintln!("API rejected the call: {} ({})", api.code, api.message);
            } else {
                eprintln!("Request failed: {e}");
            }
        }
    }

    Ok(())
}
