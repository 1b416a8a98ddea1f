use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde_json::Value;

/// Build an HTTP client with an optional Bearer token default header.
pub fn build_client(token: Option<&str>) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(tok) = token {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {}", tok).parse()?);
        builder = builder.default_headers(headers);
    }
    Ok(builder.build()?)
}

/// Normalize non-2xx responses into errors while returning the parsed
/// JSON body on success. Error bodies carry `code`/`message` (and field
/// `errors` for validation failures), which are folded into the message.
pub async fn expect_json(resp: reqwest::Response) -> anyhow::Result<Value> {
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(Value::Null);
    if status.is_success() {
        return Ok(body);
    }

    let message = body["message"].as_str().unwrap_or("unknown error");
    match body.get("errors") {
        Some(fields) => Err(anyhow::anyhow!(
            "request failed {}: {} {}",
            status,
            message,
            fields
        )),
        None => Err(anyhow::anyhow!("request failed {}: {}", status, message)),
    }
}
