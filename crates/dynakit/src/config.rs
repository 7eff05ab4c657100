//! Client configuration.
//!
//! The helpers never build a client themselves; this is a convenience for
//! callers that want the usual environment-driven setup.

use aws_sdk_dynamodb::Client;

/// Default region when `AWS_REGION` is unset.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where the DynamoDB client should point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl ClientConfig {
    /// Builds a config from `AWS_ENDPOINT_URL` and `AWS_REGION` as returned by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|url| !url.is_empty()),
            region: lookup("AWS_REGION")
                .filter(|region| !region.is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
///
/// Credentials come from the SDK's default provider chain.
pub async fn create_client(config: &ClientConfig) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    tracing::debug!(target_env = %config.target_display(), "Creating DynamoDB client");

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}
