use clap::{Parser, Subcommand};
use external_data::http::ErrorBody;
use external_data::ExternalData;

#[derive(Parser)]
#[command(name = "external-data-cli")]
#[command(about = "Client for the external data service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full external data document
    Fetch {
        /// Maximum prediction rows to request (1-5000)
        #[arg(short, long)]
        max_rows: Option<u32>,
    },
    /// Print file presence and record counts only
    Summary {
        /// Maximum prediction rows to request (1-5000)
        #[arg(short, long)]
        max_rows: Option<u32>,
    },
    /// Check service status
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Fetch { max_rows } => {
            let data = fetch(&client, base, max_rows).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Commands::Summary { max_rows } => {
            let data = fetch(&client, base, max_rows).await?;
            print_summary(&data);
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            let status = res.status();
            let body: serde_json::Value = res.json().await?;
            if !status.is_success() {
                return Err(format!("service returned status {}", status).into());
            }
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

async fn fetch(
    client: &reqwest::Client,
    base: &str,
    max_rows: Option<u32>,
) -> Result<ExternalData, Box<dyn std::error::Error>> {
    let mut request = client.get(format!("{}/api/external/data", base));
    if let Some(rows) = max_rows {
        request = request.query(&[("max_prediction_rows", rows)]);
    }

    let res = request.send().await?;
    let status = res.status();
    if !status.is_success() {
        let detail = match res.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => String::from("no detail"),
        };
        return Err(format!("service returned status {}: {}", status, detail).into());
    }

    Ok(res.json().await?)
}

fn print_summary(data: &ExternalData) {
    let flag = |present: bool| if present { "present" } else { "missing" };

    println!("base path:       {}", data.base_path);
    println!(
        "configured path: {}",
        data.configured_path.as_deref().unwrap_or("-")
    );
    println!(
        "metrics:         {} ({} records)",
        flag(data.files.metrics),
        data.metrics.len()
    );
    println!(
        "predictions:     {} ({} columns, {} rows)",
        flag(data.files.predictions),
        data.predictions.columns.len(),
        data.predictions.rows.len()
    );
    let probe_keys = data.probe.as_object().map_or(0, |probe| probe.len());
    println!("probe:           {} ({} keys)", flag(data.files.probe), probe_keys);
}
