use clap::Parser;
use std::path::PathBuf;

/// See your contributions to Hacktoberfest without leaving your terminal
#[derive(Parser, Debug)]
#[command(name = "hacktoberfest-cli", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default is $HOME/.hacktoberfest-cli.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Specify the state of the PRs you want to see (e.g. open, closed)
    #[arg(short, long, default_value = "")]
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["hacktoberfest-cli"]).unwrap();
        assert_eq!(cli.config, None);
        assert_eq!(cli.state, "");
    }

    #[test]
    fn test_state_short_and_config() {
        let cli =
            Cli::try_parse_from(["hacktoberfest-cli", "-s", "open", "--config", "/tmp/c.toml"])
                .unwrap();
        assert_eq!(cli.state, "open");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_rejects_positional_args() {
        assert!(Cli::try_parse_from(["hacktoberfest-cli", "extra"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
