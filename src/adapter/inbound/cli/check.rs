//! Handler for the `check` command.

use anyhow::Context;

use crate::adapter::inbound::cli::command::CheckArgs;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration file and print a summary without starting
/// anything.
pub fn execute(args: &CheckArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("invalid configuration in {}", args.config.display()))?;

    println!("Configuration: {}", args.config.display());
    println!("{}", summary(&config));
    println!("Configuration is valid");
    Ok(())
}

fn list(names: &[&str]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Human-readable overview of what the configuration enables.
fn summary(config: &Config) -> String {
    let server = if config.server.is_enabled() {
        config.server.addr.trim().to_string()
    } else {
        "disabled".to_string()
    };
    let venues: Vec<&str> = config
        .venues
        .names()
        .filter(|name| config.venues.is_enabled(name))
        .collect();
    let trade: Vec<&str> = config.robot.trade_algorithms.iter().map(String::as_str).collect();
    let arbitrage: Vec<&str> = config
        .robot
        .arbitrage_algorithms
        .iter()
        .map(String::as_str)
        .collect();

    [
        format!("  Server:               {server}"),
        format!("  Venues:               {}", list(&venues)),
        format!("  Trade algorithms:     {}", list(&trade)),
        format!("  Arbitrage algorithms: {}", list(&arbitrage)),
        format!(
            "  Arbitrage interval:   {} ms",
            config.robot.arbitrage_interval_ms
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_enabled_venues_only() {
        let config = Config::parse_toml(concat!(
            "[server]\naddr = \"127.0.0.1:9000\"\n",
            "[venues.alpha]\nkey = \"a\"\n",
            "[venues.beta]\n",
            "[robot]\ntrade_algorithms = [\"spread\"]\n",
        ))
        .unwrap();

        let text = summary(&config);

        assert!(text.contains("127.0.0.1:9000"));
        assert!(text.contains("Venues:               alpha"));
        assert!(!text.contains("beta"));
        assert!(text.contains("spread"));
        assert!(text.contains("500 ms"));
    }

    #[test]
    fn summary_reports_disabled_server() {
        let text = summary(&Config::default());
        assert!(text.contains("disabled"));
        assert!(text.contains("Arbitrage algorithms: none"));
    }
}
