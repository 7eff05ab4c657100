//! Exercises every helper against a running DynamoDB (usually DynamoDB Local).
//!
//! The table must already exist with a string partition key `PK`, a string
//! sort key `SK` and a global secondary index `GSI1` keyed on `GSI1PK`.
//!
//! ```bash
//! AWS_ENDPOINT_URL=http://localhost:8000 cargo run -p dynakit --example local-demo -- --table demo
//! ```

use anyhow::Result;
use clap::Parser;
use dynakit::config::{create_client, ClientConfig};
use dynakit::{
    increment_counter, pretty_print, pretty_print_records, query_by_index,
    query_by_key_condition_as, string_value, write_one, write_payloads, Condition, KeyCondition,
    Record, SerdePayload,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// dynakit local demo
#[derive(Parser, Debug)]
#[command(name = "local-demo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Table to write to and query
    #[arg(long, default_value = "dynakit-demo", env = "DYNAMODB_TABLE_NAME")]
    table: String,

    /// Custom endpoint URL (for local DynamoDB)
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// AWS region
    #[arg(long, default_value = "us-east-1", env = "AWS_REGION")]
    region: String,

    /// Number of events to batch-write
    #[arg(long, default_value = "60")]
    count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct Event {
    #[serde(rename = "PK")]
    pk: String,
    #[serde(rename = "SK")]
    sk: String,
    #[serde(rename = "GSI1PK")]
    gsi1_pk: String,
    kind: String,
    sequence: usize,
}

impl Event {
    fn new(owner: &str, sequence: usize) -> Self {
        Self {
            pk: format!("OWNER#{owner}"),
            sk: format!("EVENT#{sequence:05}"),
            gsi1_pk: if sequence % 2 == 0 { "EVEN" } else { "ODD" }.to_string(),
            kind: if sequence % 3 == 0 { "click" } else { "view" }.to_string(),
            sequence,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dynakit=debug,local_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ClientConfig::default().with_region(cli.region);
    if let Some(url) = cli.endpoint_url {
        config = config.with_endpoint_url(url);
    }
    tracing::info!(target_env = %config.target_display(), table = %cli.table, "Starting demo");

    let client = create_client(&config).await;

    // Single write
    let counter = Record::from([
        ("PK".to_string(), string_value("COUNTER#demo")),
        ("SK".to_string(), string_value("COUNTER#demo")),
    ]);
    write_one(&client, &counter, &cli.table).await?;

    // Batched write
    let events: Vec<Event> = (0..cli.count).map(|i| Event::new("ana", i)).collect();
    let payloads: Vec<SerdePayload<'_, Event>> = events.iter().map(SerdePayload).collect();
    let summary = write_payloads(&client, &payloads, &cli.table).await?;
    tracing::info!(
        requests = summary.requests,
        items = summary.items,
        unprocessed = summary.unprocessed.len(),
        "Batch write finished"
    );

    // Query on the secondary index, filtered
    let clicks = query_by_index(
        &client,
        &cli.table,
        "GSI1",
        "GSI1PK",
        "EVEN",
        Some(Condition::equal("kind", string_value("click"))),
    )
    .await?;
    pretty_print_records(&clicks);

    // Query on the primary key, typed
    let first_ten: Vec<Event> = query_by_key_condition_as(
        &client,
        &cli.table,
        KeyCondition::equal("PK", string_value("OWNER#ana")).and_sort_between(
            "SK",
            string_value("EVENT#00000"),
            string_value("EVENT#00009"),
        ),
        None,
    )
    .await?;
    pretty_print(&first_ten);

    // Atomic counter
    increment_counter(&client, &cli.table, counter, "hits", 1).await?;
    tracing::info!("Counter incremented");

    Ok(())
}
