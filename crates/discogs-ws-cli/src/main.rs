// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use discogs_ws_client::blocking::DiscogsClient;
use discogs_ws_client::{Lookup, SearchType};
use discogs_ws_config::{load as load_config, AppConfig};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Query the Discogs web service and print the result as JSON
#[derive(Parser, Debug)]
#[command(name = "discogs-ws", author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// User-Agent header to send (overrides configuration)
    #[arg(long)]
    user_agent: Option<String>,
    /// Service base URL (overrides configuration)
    #[arg(long)]
    base_url: Option<String>,
    /// Print the unwrapped server document instead of the typed result
    #[arg(long)]
    raw: bool,
    /// Single-line output
    #[arg(long)]
    compact: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Look up a release by ID
    Release { id: u64 },
    /// Look up a master release by ID
    Master { id: u64 },
    /// Look up an artist by exact name, e.g. "Theo (3)"
    Artist {
        name: String,
        /// Include the artist's discography
        #[arg(long)]
        releases: bool,
    },
    /// Look up a label by exact name
    Label {
        name: String,
        /// Include the label's catalogue
        #[arg(long)]
        releases: bool,
    },
    /// Free-text search
    Search {
        query: String,
        /// One of all, releases, artists, labels
        #[arg(short = 't', long = "type", default_value = "all")]
        search_type: SearchType,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
}

impl Command {
    fn lookup(&self) -> Lookup {
        match self {
            Command::Release { id } => Lookup::Release(*id),
            Command::Master { id } => Lookup::Master(*id),
            Command::Artist { name, releases } => Lookup::artist(name.as_str(), *releases),
            Command::Label { name, releases } => Lookup::label(name.as_str(), *releases),
            Command::Search {
                query,
                search_type,
                page,
            } => Lookup::search(query.as_str(), *search_type, *page),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);
    apply_overrides(&mut config, &cli);

    let client = build_client(&config)?;
    let output = run(&client, &cli.command, cli.raw)?;

    let rendered = if cli.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{rendered}");

    Ok(())
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(user_agent) = &cli.user_agent {
        config.client.user_agent = user_agent.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.client.base_url = base_url.clone();
    }
}

fn build_client(config: &AppConfig) -> Result<DiscogsClient> {
    DiscogsClient::builder(config.client.user_agent.as_str())
        .base_url(config.client.base_url.as_str())
        .timeout(config.client.timeout())
        .build_blocking()
        .context("failed to configure Discogs client")
}

fn run(client: &DiscogsClient, command: &Command, raw: bool) -> Result<Value> {
    let lookup = command.lookup();
    debug!(target: "cli", ?lookup, raw, "running lookup");

    if raw {
        return Ok(client.get_raw(&lookup)?);
    }

    let value = match command {
        Command::Release { id } => serde_json::to_value(client.get_release(*id)?)?,
        Command::Master { id } => serde_json::to_value(client.get_master_release(*id)?)?,
        Command::Artist { name, releases } => {
            serde_json::to_value(client.get_artist(name, *releases)?)?
        }
        Command::Label { name, releases } => {
            serde_json::to_value(client.get_label(name, *releases)?)?
        }
        Command::Search {
            query,
            search_type,
            page,
        } => serde_json::to_value(client.search(query, *search_type, *page)?)?,
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("discogs-ws").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_artist_with_releases() {
        let cli = parse(&["artist", "Theo (3)", "--releases"]).unwrap();
        assert_eq!(cli.command.lookup(), Lookup::artist("Theo (3)", true));
    }

    #[test]
    fn test_parse_search_defaults() {
        let cli = parse(&["search", "nirvana"]).unwrap();
        assert_eq!(
            cli.command.lookup(),
            Lookup::search("nirvana", SearchType::All, 1)
        );
    }

    #[test]
    fn test_parse_search_options() {
        let cli = parse(&["search", "warp", "--type", "labels", "-p", "3"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Search {
                query: "warp".to_string(),
                search_type: SearchType::Labels,
                page: 3,
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_search_arguments() {
        assert!(parse(&["search", "warp", "--page", "3abc"]).is_err());
        assert!(parse(&["search", "warp", "--page", "0"]).is_err());
        assert!(parse(&["search", "warp", "--type", "tracks"]).is_err());
        assert!(parse(&["release", "-5"]).is_err());
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = parse(&[
            "--user-agent",
            "Override/1.0",
            "--base-url",
            "http://localhost:9999/",
            "master",
            "96559",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.client.user_agent, "Override/1.0");
        assert_eq!(config.client.base_url, "http://localhost:9999/");
        assert_eq!(config.client.timeout_secs, 30);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_against_stub_server() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/label/Warp%20Records"))
            .and(query_param("releases", "1"))
            .and(header("user-agent", "CliTest/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resp": { "label": { "name": "Warp Records", "releases": [] } }
            })))
            .expect(2)
            .mount(&server)
            .await;

        let mut config = AppConfig::default();
        config.client.user_agent = "CliTest/1.0".to_string();
        config.client.base_url = server.uri();

        let (typed, raw) = tokio::task::spawn_blocking(move || {
            let client = build_client(&config).unwrap();
            let command = Command::Label {
                name: "Warp Records".to_string(),
                releases: true,
            };
            (
                run(&client, &command, false).unwrap(),
                run(&client, &command, true).unwrap(),
            )
        })
        .await
        .unwrap();

        assert_eq!(typed["name"], "Warp Records");
        assert_eq!(typed["releases"], serde_json::json!([]));
        assert_eq!(raw, serde_json::json!({ "name": "Warp Records", "releases": [] }));
    }
}
