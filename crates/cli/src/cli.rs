use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Converts downloaded Blu-Ray discs to MKV files", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, env = "BDRIP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log with NZBGet message prefixes on stdout
    #[arg(long, global = true)]
    pub nzbget: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Convert the configured download (default)
    Run,
    /// List the titles of the discs found below a directory
    Scan {
        root: PathBuf,
        #[arg(long, default_value_t = 1)]
        discs: i32,
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_is_the_default() {
        let cli = Cli::try_parse_from(["bdrip"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.nzbget);
    }

    #[test]
    fn test_scan_arguments() {
        let cli = Cli::try_parse_from(["bdrip", "scan", "/downloads/movie", "--discs", "2", "--json"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Scan {
                root: PathBuf::from("/downloads/movie"),
                discs: 2,
                json: true,
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bdrip", "run", "--nzbget", "--config", "bdrip.toml"]).unwrap();
        assert!(cli.nzbget);
        assert_eq!(cli.config, Some(PathBuf::from("bdrip.toml")));
    }
}
