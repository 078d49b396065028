//! Status-code checks shared by every request.

use crate::error::GatewayError;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success. 429 maps to
/// [`GatewayError::RateLimited`] (Retry-After seconds, 60 when absent or
/// unparseable); any other non-success maps to [`GatewayError::Api`] with the
/// body as message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(GatewayError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(GatewayError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}
