use clap::Parser;
use std::path::PathBuf;

/// Fetch Singapore private property transactions from URA and store them.
#[derive(Debug, Parser)]
#[command(name = "ura-ingest", version, about)]
pub struct Cli {
    /// Also fetch rental transaction data
    #[arg(long)]
    pub include_rentals: bool,

    /// Only show database statistics, do not fetch new data
    #[arg(long)]
    pub stats_only: bool,

    /// Read environment variables from this file instead of ./.env
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_off() {
        let cli = Cli::try_parse_from(["ura-ingest"]).unwrap();
        assert!(!cli.include_rentals);
        assert!(!cli.stats_only);
        assert!(cli.env_file.is_none());
    }

    #[test]
    fn flags_are_independent() {
        let cli = Cli::try_parse_from(["ura-ingest", "--stats-only", "--include-rentals"]).unwrap();
        assert!(cli.include_rentals);
        assert!(cli.stats_only);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["ura-ingest", "--rentals"]).is_err());
    }
}
