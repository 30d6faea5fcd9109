//! DynamoDB client construction.

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};

use dropvault_core::config::aws::AwsConfig;

/// Builds a DynamoDB client from static credentials and the configured
/// region. Construction is lazy; no connection is made until the first
/// request.
pub fn build_client(config: &AwsConfig) -> Client {
    let credentials = Credentials::new(
        &config.access_key,
        &config.secret_key,
        None,
        None,
        "dropvault",
    );

    let conf = aws_sdk_dynamodb::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .build();

    tracing::info!(region = %config.region, "DynamoDB client initialized");
    Client::from_conf(conf)
}
