//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "mapbox.country")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            print!("{}", render_config(&config));
        }

        // Key only: show that value
        (Some(key), None) => match config.get(key) {
            Some(value) if key == "mapbox.access_token" => println!("{}", mask(&value)),
            Some(value) => println!("{}", value),
            None => {
                return Err(Error::Config(format!(
                    "Unknown config key: {}\nAvailable keys: {}",
                    key,
                    Config::available_keys().join(", ")
                )));
            }
        },

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            if key == "mapbox.access_token" {
                println!("{} = {}", key, mask(value));
            } else {
                println!("{} = {}", key, value);
            }
        }

        // Value without key: not valid
        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Hide all but a recognisable prefix of a token
fn mask(token: &str) -> String {
    if token.is_empty() {
        "\"\" # not configured".to_string()
    } else {
        let prefix: String = token.chars().take(3).collect();
        format!("{}*** # configured", prefix)
    }
}

/// Render all configuration values, masking the access token
fn render_config(config: &Config) -> String {
    let mut out = String::new();

    out.push_str("[mapbox]\n");
    out.push_str(&format!("access_token = {}\n", mask(&config.mapbox.access_token)));
    out.push_str(&format!("base_url = \"{}\"\n", config.mapbox.base_url));
    out.push_str(&format!("country = \"{}\"\n", config.mapbox.country));
    out.push_str(&format!("timeout_secs = {}\n\n", config.mapbox.timeout_secs));

    out.push_str("[defaults]\n");
    out.push_str(&format!("radius = {}\n", config.defaults.radius));
    out.push_str(&format!("max_results = {}\n", config.defaults.max_results));
    out.push_str(&format!("mode = \"{}\"\n", config.defaults.mode));
    out.push_str(&format!("format = \"{}\"\n\n", config.defaults.format));

    out.push_str("[server]\n");
    out.push_str(&format!("host = \"{}\"\n", config.server.host));
    out.push_str(&format!("port = {}\n", config.server.port));

    out
}
