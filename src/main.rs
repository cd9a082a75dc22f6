//! gridboard - CLI entry point
//!
//! Runs the terminal dashboard by default. The other subcommands print a
//! JSON snapshot of the widget store, show current weather, and manage the
//! configuration file.

use clap::{Parser, Subcommand};
use gridboard::config::schema::MAX_COLUMNS;
use gridboard::config::{default, xdg, Config, ConfigLoader};
use gridboard::store::DashboardStore;
use gridboard::tui::app::App;
use gridboard::weather::{fetch_location, Location, WeatherFetcher};
use gridboard::{logging, WidgetKind};
use std::path::PathBuf;
use std::process::ExitCode;

/// Customizable widget dashboard on a responsive grid
#[derive(Parser)]
#[command(name = "gridboard")]
#[command(version, about = "Customizable widget dashboard on a responsive grid")]
struct Cli {
    /// Configuration file (defaults to the XDG config path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands for the gridboard CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal dashboard (default)
    Tui {
        /// Placement column count, overrides grid.columns
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_COLUMNS)))]
        columns: Option<u16>,
        /// Start with an empty grid instead of the sample widgets
        #[arg(long)]
        empty: bool,
    },

    /// Print the widget store as JSON
    Dump {
        /// Start from an empty grid instead of the sample widgets
        #[arg(long)]
        empty: bool,
        /// Add a widget of this kind (repeatable, applied in order)
        #[arg(long = "add", value_name = "KIND")]
        add: Vec<WidgetKind>,
        /// Placement column count, overrides grid.columns
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_COLUMNS)))]
        columns: Option<u16>,
    },

    /// Show current weather for a location
    Weather {
        /// Latitude in decimal degrees (defaults to weather.latitude)
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,
        /// Longitude in decimal degrees (defaults to weather.longitude)
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config;

    let command = cli.command.unwrap_or(Commands::Tui {
        columns: None,
        empty: false,
    });

    match command {
        // Config subcommands work without (or on a broken) config file
        Commands::Config { action } => {
            logging::init_stderr(Config::default().log.level);
            run_config_command(action, config_path)
        }
        Commands::Tui { columns, empty } => match load_config(config_path) {
            Some(config) => run_tui(&config, columns, empty),
            None => ExitCode::FAILURE,
        },
        Commands::Dump {
            empty,
            add,
            columns,
        } => match load_config(config_path) {
            Some(config) => {
                logging::init_stderr(config.log.level);
                run_dump_command(&config, columns, empty, &add)
            }
            None => ExitCode::FAILURE,
        },
        Commands::Weather { lat, lon } => match load_config(config_path) {
            Some(config) => {
                logging::init_stderr(config.log.level);
                let location = match (lat, lon) {
                    (Some(lat), Some(lon)) => Location::new(lat, lon),
                    _ => config.weather.location(),
                };
                run_weather_command(location)
            }
            None => ExitCode::FAILURE,
        },
    }
}

/// Loads and validates the configuration, reporting failures on stderr.
fn load_config(path: Option<PathBuf>) -> Option<Config> {
    match ConfigLoader::load(path.as_deref()) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Config error: {e}");
            None
        }
    }
}

/// Builds the initial store: the sample widgets unless `empty` is set or
/// the configuration turns them off.
fn initial_store(config: &Config, columns: Option<u16>, empty: bool) -> DashboardStore {
    let columns = columns.unwrap_or(config.grid.columns);
    if empty || !config.dashboard.seed_defaults {
        DashboardStore::new(columns)
    } else {
        DashboardStore::with_defaults(columns)
    }
}

/// Runs the terminal dashboard until the user quits.
fn run_tui(config: &Config, columns: Option<u16>, empty: bool) -> ExitCode {
    match logging::init_file(&config.log) {
        Ok(path) => tracing::info!(log = %path.display(), "gridboard starting"),
        Err(e) => {
            eprintln!("Error: cannot open log file: {e}");
            return ExitCode::FAILURE;
        }
    }

    // Values were checked by ConfigLoader::load
    let (tick_rate, refresh_interval) =
        match (config.tui.tick_rate(), config.weather.refresh_interval()) {
            (Ok(tick), Ok(refresh)) => (tick, refresh),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("Config error: {e}");
                return ExitCode::FAILURE;
            }
        };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(async {
        let mut app = App::new(initial_store(config, columns, empty))
            .with_tick_rate(tick_rate)
            .with_row_height(config.grid.row_height)
            .with_default_location(config.weather.location());
        if config.weather.enabled {
            let (fetcher, rx) = WeatherFetcher::new(refresh_interval);
            app = app.with_weather(fetcher, rx);
        }
        app.run().await
    });

    // Blocking weather fetches may still be running; don't wait for them.
    rt.shutdown_background();

    if let Err(e) = result {
        tracing::error!(error = %e, "TUI exited with an error");
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Builds a store, applies `--add` in order and prints it as JSON.
fn run_dump_command(
    config: &Config,
    columns: Option<u16>,
    empty: bool,
    add: &[WidgetKind],
) -> ExitCode {
    let mut store = initial_store(config, columns, empty);
    for &kind in add {
        store.add(kind);
    }
    match serde_json::to_string_pretty(&store) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to serialize store: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Fetches and prints current conditions.
fn run_weather_command(location: Location) -> ExitCode {
    match fetch_location(location) {
        Ok(data) => {
            println!("Weather at {location}");
            println!("  Conditions:  {}", data.description());
            if let Some(t) = data.temperature {
                println!("  Temperature: {t:.1}°C");
            }
            if let Some(h) = data.humidity {
                println!("  Humidity:    {h:.0}%");
            }
            if let Some(w) = data.wind_speed {
                println!("  Wind:        {w:.1} km/h");
            }
            if let Some(p) = data.pressure {
                println!("  Pressure:    {p:.0} hPa");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Weather error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `config init|path|validate`.
fn run_config_command(action: ConfigAction, path: Option<PathBuf>) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => {
            let created = match &path {
                Some(path) => default::create_default_config_at(path, force).map(|()| path.clone()),
                None => default::create_default_config(force),
            };
            created.map(|path| println!("Created configuration at {}", path.display()))
        }
        ConfigAction::Path => {
            let path = path.unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(path.as_deref()).map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["gridboard"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_tui_flags() {
        let cli = Cli::try_parse_from(["gridboard", "tui", "--columns", "4", "--empty"])
            .expect("parses");
        match cli.command {
            Some(Commands::Tui { columns, empty }) => {
                assert_eq!(columns, Some(4));
                assert!(empty);
            }
            _ => panic!("unexpected command variant"),
        }
    }

    #[test]
    fn test_columns_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["gridboard", "tui", "--columns", "0"]).is_err());
        assert!(Cli::try_parse_from(["gridboard", "dump", "--columns", "13"]).is_err());
    }

    #[test]
    fn test_dump_add_is_repeatable() {
        let cli = Cli::try_parse_from([
            "gridboard", "dump", "--empty", "--add", "chart", "--add", "Clock",
        ])
        .expect("parses");
        match cli.command {
            Some(Commands::Dump { empty, add, columns }) => {
                assert!(empty);
                assert_eq!(add, vec![WidgetKind::Chart, WidgetKind::Clock]);
                assert_eq!(columns, None);
            }
            _ => panic!("unexpected command variant"),
        }
    }

    #[test]
    fn test_dump_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["gridboard", "dump", "--add", "sparkline"]).is_err());
    }

    #[test]
    fn test_weather_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["gridboard", "weather", "--lat", "-33.87", "--lon", "151.21"])
            .expect("parses");
        match cli.command {
            Some(Commands::Weather { lat, lon }) => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.21));
            }
            _ => panic!("unexpected command variant"),
        }
    }

    #[test]
    fn test_weather_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["gridboard", "weather", "--lat", "10"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["gridboard", "config", "path", "--config", "/tmp/g.toml"])
            .expect("parses");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Path
            })
        ));
    }

    #[test]
    fn test_initial_store_respects_seed_setting() {
        let mut config = Config::default();
        assert_eq!(initial_store(&config, None, false).len(), 4);
        assert_eq!(initial_store(&config, None, true).len(), 0);
        config.dashboard.seed_defaults = false;
        assert_eq!(initial_store(&config, None, false).len(), 0);
        assert_eq!(initial_store(&config, Some(4), false).columns(), 4);
    }
}
