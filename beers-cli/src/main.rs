//! Beers CLI
//!
//! Command-line interface for the Beer Catalog API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use beers_client::BeersClient;
use beers_types::{BeerId, CreateBeerRequest};

#[derive(Parser)]
#[command(name = "beers")]
#[command(author, version, about = "Beer Catalog API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Beer Catalog API
    #[arg(long, env = "BEERS_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Beer catalog operations
    Beer {
        #[command(subcommand)]
        action: BeerCommands,
    },
    /// Price a box of beers
    BoxPrice {
        /// Beer ID
        id: i64,
        /// Number of units (server default: 1)
        #[arg(long)]
        quantity: Option<i64>,
        /// Target currency (server default: USD)
        #[arg(long)]
        currency: Option<String>,
    },
    /// List supported currencies
    Currencies,
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum BeerCommands {
    /// Create a new beer
    Create {
        /// Beer ID (positive, unused)
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        brewery: String,
        #[arg(long)]
        country: String,
        /// Unit price in `currency`
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Get beer details
    Get {
        /// Beer ID
        id: i64,
    },
    /// List all beers
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = BeersClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Beer { action } => match action {
            BeerCommands::Create {
                id,
                name,
                brewery,
                country,
                price,
                currency,
            } => {
                let req = CreateBeerRequest {
                    id: BeerId::new(id),
                    name,
                    brewery,
                    country,
                    price,
                    currency,
                };
                let beer = client.create_beer(&req).await?;
                println!("{}", serde_json::to_string_pretty(&beer)?);
            }
            BeerCommands::Get { id } => {
                let beer = client.get_beer(BeerId::new(id)).await?;
                println!("{}", serde_json::to_string_pretty(&beer)?);
            }
            BeerCommands::List => {
                let beers = client.list_beers().await?;
                println!("{}", serde_json::to_string_pretty(&beers)?);
            }
        },

        Commands::BoxPrice {
            id,
            quantity,
            currency,
        } => {
            let price = client
                .box_price(BeerId::new(id), quantity, currency.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&price)?);
        }

        Commands::Currencies => {
            let currencies = client.currencies().await?;
            println!("{}", currencies.join(" "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_box_price() {
        let cli = Cli::try_parse_from([
            "beers",
            "--api-url",
            "http://beers.local",
            "box-price",
            "3",
            "--quantity",
            "12",
            "--currency",
            "CLP",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://beers.local");
        match cli.command {
            Commands::BoxPrice {
                id,
                quantity,
                currency,
            } => {
                assert_eq!(id, 3);
                assert_eq!(quantity, Some(12));
                assert_eq!(currency.as_deref(), Some("CLP"));
            }
            _ => panic!("expected box-price"),
        }
    }

    #[test]
    fn test_parse_beer_create_defaults_currency() {
        let cli = Cli::try_parse_from([
            "beers", "beer", "create", "--id", "1", "--name", "Golden", "--brewery", "Kross",
            "--country", "Chile", "--price", "10.5",
        ])
        .unwrap();

        match cli.command {
            Commands::Beer {
                action: BeerCommands::Create { currency, price, .. },
            } => {
                assert_eq!(currency, "USD");
                assert_eq!(price, 10.5);
            }
            _ => panic!("expected beer create"),
        }
    }
}
