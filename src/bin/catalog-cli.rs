use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Management CLI for the firmware catalog service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Status,
    /// Verify a firmware checksum by id
    Verify {
        /// Firmware id to look up
        firmware_id: i64,
        /// Expected checksum; when given, compares against the service's answer
        #[arg(short, long)]
        checksum: Option<String>,
    },
    /// List firmware records
    Firmware,
    /// List device families
    Families,
    /// List projects
    Projects,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/status", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Verify {
            firmware_id,
            checksum,
        } => {
            let body = json!({
                "firmware_id": firmware_id,
                "flasher": "catalog-cli",
                "flasher_version": env!("CARGO_PKG_VERSION"),
            });
            let res = client
                .post(format!("{}/api/flash_verify/", cli.url))
                .json(&body)
                .send()
                .await?;

            let response: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&response)?);

            if let Some(expected) = checksum {
                let reported = response
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                if reported == expected {
                    println!("Checksum matches.");
                } else {
                    eprintln!("Checksum mismatch: expected {}, got {}", expected, reported);
                    std::process::exit(1);
                }
            }
        }
        Commands::Firmware => {
            let res = client
                .get(format!("{}/api/firmware_list/all/", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Families => {
            let res = client
                .get(format!("{}/api/firmware_family_list/", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Projects => {
            let res = client
                .get(format!("{}/api/project_list/all/", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
