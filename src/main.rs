use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use powerctl::{
    cli::{Cli, Command},
    http::{Connection, DEFAULT_API_URL},
    output::{self, OutputFormat},
    version::BuildInfo,
    Auth, Client, Config,
};
use std::{io::Write, process::ExitCode, time::Duration};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Overrides the api endpoint, for pointing at a staging or mock server.
const API_URL_ENV: &str = "TIBBER_API_URL";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "powerctl=debug"
    } else {
        "powerctl=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Version => BuildInfo::current().write_to(&mut out)?,
        Command::Homes => {
            let session = Session::open(&cli)?;
            let homes = session.client.get_homes().await?;
            output::write_homes(&homes, session.format, &mut out)?;
        }
        Command::Prices { home } => {
            let session = Session::open(&cli)?;
            let home_id = match session.config.home_id_or(home.as_deref()) {
                Some(id) => id.to_owned(),
                None => only_home(&session.client).await?,
            };
            let prices = session.client.get_prices(&home_id).await?;
            output::write_prices(&home_id, &prices, session.format, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Everything a command talking to the api needs.
struct Session {
    config: Config,
    format: OutputFormat,
    client: Client<Connection>,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref()).context("failed to load config")?;
        config.validate()?;
        let format = match cli.format {
            Some(format) => format,
            None => config.format.parse::<OutputFormat>()?,
        };

        let cancel = CancellationToken::new();
        tokio::spawn({
            let cancel = cancel.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::debug!("interrupted, cancelling request");
                    cancel.cancel();
                }
            }
        });

        let api_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let client = Connection::builder()
            .api_url(api_url)
            .timeout(Duration::from_secs(cli.timeout))
            .cancellation(cancel)
            .build(Auth::access_token(&config.token))?
            .into_client();

        Ok(Self {
            config,
            format,
            client,
        })
    }
}

/// With no home configured, fall back to the account's only home.
async fn only_home(client: &Client<Connection>) -> Result<String> {
    let mut homes = client.get_homes().await?;
    match homes.len() {
        0 => Err(anyhow!("no homes found for this token")),
        1 => Ok(homes.remove(0).id),
        n => bail!(
            "{} homes found, pass --home or set TIBBER_HOME_ID to one of: {}",
            n,
            homes
                .iter()
                .map(|h| h.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
