use super::{Method, Response, Transport};
use crate::domain::{config::Config, error::PaciResult};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, trace};

const XML_CONTENT_TYPE: &str = "application/xml";

/// Service API client authenticating with HTTP basic auth
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> PaciResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("pacicli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn from_config(config: &Config) -> PaciResult<Self> {
        Self::new(&config.base_url, &config.username, &config.password)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, method: Method, path: &str, body: Option<String>) -> PaciResult<Response> {
        let url = self.url(path);
        debug!("Request {} {}", method, url);

        let mut request = self
            .http
            .request(method.into(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE))
            .basic_auth(&self.username, Some(&self.password));
        if let Some(body) = body {
            trace!("Raw request:\n{}", body);
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Response {} from {} {}", status, method, path);
        trace!("Raw response:\n{}", body);

        Ok(Response::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::Method;
    use httpmock::prelude::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ApiClient::new("https://api.example.com/paci/v1.0/", "u", "p").unwrap();
        assert_eq!(client.url("/ve"), "https://api.example.com/paci/v1.0/ve");
    }

    #[tokio::test]
    async fn test_get_with_basic_auth() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/paci/ve/web1")
                    .header("authorization", "Basic dXNlcjpzZWNyZXQ=")
                    .header("content-type", "application/xml");
                then.status(200).body("<ve><name>web1</name></ve>");
            })
            .await;

        let client = ApiClient::new(server.url("/paci"), "user", "secret").unwrap();
        let response = client.send(Method::Get, "/ve/web1", None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<ve><name>web1</name></ve>");
    }

    #[tokio::test]
    async fn test_put_sends_body_and_keeps_error_status() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/ve/web1")
                    .body("<reconfigure-ve><bandwidth>100</bandwidth></reconfigure-ve>");
                then.status(409).body("Server is busy");
            })
            .await;

        let client = ApiClient::new(server.base_url(), "user", "secret").unwrap();
        let response = client
            .send(
                Method::Put,
                "/ve/web1",
                Some("<reconfigure-ve><bandwidth>100</bandwidth></reconfigure-ve>".to_string()),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 409);
        assert_eq!(response.body, "Server is busy");
    }
}
