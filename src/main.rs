use std::fs::{self, File};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use nimbus::TemperatureUnit;
use nimbus::core::config::{self, CliOverrides, MAX_REFRESH_INTERVAL};
use nimbus::geo::{FreeGeoIpLocator, LocationResolver, RetryPolicy};
use nimbus::startup::{self, StartupError};
use nimbus::tui;
use nimbus::weather::OpenWeatherMapProvider;

#[derive(Parser)]
#[command(name = "nimbus", version, about = "Weather and location dashboard for the terminal")]
struct Args {
    /// OpenWeatherMap API key (also saved to the config file)
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Unit used to display temperatures
    #[arg(short, long, value_enum)]
    temp_unit: Option<TemperatureUnit>,

    /// Minutes between weather refreshes (1-59)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_REFRESH_INTERVAL))
    )]
    interval: Option<u32>,

    /// Write the given options to ~/.nimbus/config.toml
    #[arg(short, long)]
    save_config: bool,
}

fn init_logging() {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    // ~/.nimbus/nimbus.log, falling back to the working directory
    let log_file = config::nimbus_dir()
        .and_then(|dir| fs::create_dir_all(&dir).ok().map(|_| dir.join("nimbus.log")))
        .and_then(|path| File::create(path).ok())
        .or_else(|| File::create("nimbus.log").ok());

    if let Some(log_file) = log_file {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();
    init_logging();

    info!("Nimbus starting up");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{e}");
            ExitCode::from(&e)
        }
    }
}

fn run(args: Args) -> Result<(), StartupError> {
    let file_config = config::load_config()?;

    let cli = CliOverrides {
        api_key: args.api_key.clone(),
        temp_unit: args.temp_unit,
        refresh_interval: args.interval,
    };

    if args.save_config || args.api_key.is_some() {
        let path = config::save_config(&config::merge_cli(&file_config, &cli))?;
        println!("Config saved to {}", path.display());
    }

    let resolved = config::resolve(&file_config, &cli);
    info!(
        "Resolved config: unit={}, interval={}m, tick={:?}",
        resolved.temp_unit.label(),
        resolved.refresh_interval,
        resolved.tick
    );

    let api_key = startup::require_api_key(&resolved)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;

    let weather = OpenWeatherMapProvider::new(
        api_key,
        resolved.weather_base_url.clone(),
        resolved.fetch_timeout,
    )
    .map_err(StartupError::Weather)?;
    let locator = FreeGeoIpLocator::new(resolved.geo_url.clone(), resolved.fetch_timeout)
        .map_err(StartupError::Geo)?;

    // Still in cooked mode here, so Ctrl+C is a real signal
    eprintln!("Getting location information...");
    let resolver = LocationResolver::new(
        Arc::new(locator),
        RetryPolicy::unbounded(resolved.retry_delay),
    );
    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let location = runtime.block_on(resolver.resolve(cancel))?;
    info!("Location: {}", location.display_name());

    tui::run(&resolved, location, &runtime, Arc::new(weather))?;
    Ok(())
}
