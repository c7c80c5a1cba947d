//! Response status handling shared by every Gemini call.

use crate::error::AiError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. A 429 becomes
/// [`AiError::RateLimited`] (the `Retry-After` header in seconds, 60 if
/// absent or unparseable); any other non-success status becomes
/// [`AiError::Api`] carrying the response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AiError> {
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(AiError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(AiError::Api {
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
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, retry_after: Option<&str>, body: &str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body.to_string()).unwrap())
    }

    #[test]
    fn retry_after_header_is_used() {
        assert_eq!(parse_retry_after(&mock_response(429, Some("120"), "")), 120);
    }

    #[test]
    fn retry_after_falls_back_to_sixty() {
        assert_eq!(parse_retry_after(&mock_response(429, None, "")), 60);
        assert_eq!(
            parse_retry_after(&mock_response(429, Some("Wed, 21 Oct 2026 07:28:00 GMT"), "")),
            60
        );
    }

    #[tokio::test]
    async fn rate_limited() {
        let err = check_response(mock_response(429, Some("5"), ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::RateLimited { retry_after_secs: 5 }));
    }

    #[tokio::test]
    async fn api_error_keeps_body() {
        let err = check_response(mock_response(400, None, "API key not valid"))
            .await
            .unwrap_err();
        match err {
            AiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, None, "{}")).await.is_ok());
    }
}
