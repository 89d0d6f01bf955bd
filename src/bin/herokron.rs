//! Herokron CLI
//!
//! Manage Heroku API keys, their apps, and notification preferences.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use herokron::color::to_hex;
use herokron::{HerokronConfig, HerokuClient, Store};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "herokron")]
#[command(about = "Manage Heroku API keys, apps and Discord notifications")]
struct Cli {
    /// Database file (defaults to the per-platform location)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Config file to load on top of the default locations
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Database(DatabaseCommands),

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum DatabaseCommands {
    /// Register an API key and the apps it owns
    Add {
        /// Heroku API key
        key: String,
    },

    /// Forget an API key
    Remove {
        /// Heroku API key
        key: String,
    },

    /// List registered API keys
    Keys,

    /// List apps, across all keys or for one key
    Apps {
        /// Only list apps owned by this key
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Show which API key owns an app
    Owner {
        /// App name
        app: String,
    },

    /// Refresh app lists from Heroku
    Sync {
        /// Only refresh this key
        key: Option<String>,
    },

    /// Set or show the Discord webhook
    Webhook {
        /// Webhook URL; omit to show the current one
        url: Option<String>,
    },

    /// Set or show the embed color
    Color {
        /// `#RRGGBB`, `RRGGBB` or a base 10 integer; omit to show the current one
        value: Option<String>,
    },

    /// Show the whole database
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show {
        /// Output as TOML
        #[arg(long, conflicts_with = "json")]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a config file with default values
    Init {
        #[arg(short, long, default_value = "herokron.toml")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = HerokronConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Config { command } => run_config(&command, &config),
        Commands::Database(command) => {
            let path = match cli.database {
                Some(path) => path,
                None => config.database_path()?,
            };
            let mut store = Store::open(&path, HerokuClient::new(&config.heroku))?;
            run_database(command, &mut store)
        }
    }
}

fn run_database(
    command: DatabaseCommands,
    store: &mut Store,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        DatabaseCommands::Add { key } => {
            store.add_key(&key)?;
            let apps = store.apps_for(&key).unwrap_or_default();
            println!("✅ Added key with {} app(s)", apps.len());
            for app in apps {
                println!("  {}", app);
            }
        }

        DatabaseCommands::Remove { key } => {
            if store.key_exists(&key) {
                store.remove_key(&key)?;
                println!("✅ Removed key");
            } else {
                println!("Key is not registered.");
            }
        }

        DatabaseCommands::Keys => {
            let keys = store.keys();
            if keys.is_empty() {
                println!("No keys registered yet.");
            }
            for key in keys {
                println!("{}", key);
            }
        }

        DatabaseCommands::Apps { key } => match key {
            Some(key) => {
                let apps = store.apps_for(&key).ok_or("Key is not registered")?;
                for app in apps {
                    println!("{}", app);
                }
            }
            None => {
                for app in store.apps() {
                    println!("{}", app);
                }
            }
        },

        DatabaseCommands::Owner { app } => {
            let key = store
                .key_for(&app)
                .ok_or_else(|| format!("No registered key owns app {:?}", app))?;
            println!("{}", key);
        }

        DatabaseCommands::Sync { key } => match key {
            Some(key) => {
                let apps = store.sync_key(&key)?;
                println!("🔄 Synced key: {} app(s)", apps.len());
            }
            None => {
                let document = store.sync_all()?;
                println!(
                    "🔄 Synced {} key(s): {} app(s)",
                    document.registry.len(),
                    document.apps().len()
                );
            }
        },

        DatabaseCommands::Webhook { url } => {
            if let Some(url) = url {
                store.set_webhook(&url)?;
                println!("✅ Webhook set");
            }
            match store.webhook_url() {
                Some(url) => println!("{}", url),
                None => println!("No webhook configured."),
            }
        }

        DatabaseCommands::Color { value } => {
            if let Some(value) = value {
                store.set_color(&value)?;
                println!("✅ Color set");
            }
            println!("{} ({})", to_hex(store.color()), store.color());
        }

        DatabaseCommands::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.document())?);
            } else {
                println!("📋 Herokron database: {}\n", store.path().display());
                println!("Keys:");
                for entry in &store.document().registry {
                    println!("  {} ({} app(s))", entry.key, entry.apps.len());
                    for app in &entry.apps {
                        println!("    - {}", app);
                    }
                }
                println!("\nColor: {} ({})", to_hex(store.color()), store.color());
                match store.webhook_url() {
                    Some(url) => println!("Webhook: {}", url),
                    None => println!("Webhook: not configured"),
                }
            }
        }
    }

    Ok(())
}

fn run_config(
    command: &ConfigCommands,
    config: &HerokronConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ConfigCommands::Show { toml, json } => {
            if *toml {
                println!("{}", ::toml::to_string_pretty(config)?);
            } else if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("📋 Herokron Configuration\n");
                println!("Database:");
                match config.database_path() {
                    Ok(path) => println!("  Path: {}", path.display()),
                    Err(e) => println!("  Path: unavailable ({})", e),
                }
                println!("\nHeroku:");
                println!("  API: {}", config.heroku.api_url);
                println!("  Timeout: {}s", config.heroku.timeout_secs);
                println!("  User-Agent: {}", config.heroku.user_agent);
            }
        }

        ConfigCommands::Init { output } => {
            HerokronConfig::default().save(output)?;
            println!("✅ Created config file: {}", output);
        }
    }

    Ok(())
}
