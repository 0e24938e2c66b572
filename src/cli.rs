use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "yts2nas")]
#[command(about = "Queue a list of movies on a Synology Download Station")]
#[command(long_about = "
yts2nas reads a text file with one movie title per line, looks each title up
on YTS, picks the best available release (2160p, then 1080p, then 720p) and
hands its magnet link to Download Station on your NAS. Titles that cannot be
queued are appended to a failure log.

Examples:
  yts2nas                            # Prompt for the list file
  yts2nas movies.txt                 # Use movies.txt directly
  yts2nas -c ~/nas.toml movies.txt   # Use a specific config file
")]
#[command(version)]
pub struct Cli {
    /// Movie list, one title per line (prompted for when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Override config file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override failure log path
    #[arg(long, value_name = "FILE")]
    pub failed_log: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate CLI arguments and show helpful error messages
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(file), Some(log)) = (&self.file, &self.failed_log) {
            if file == log {
                return Err("The failure log cannot be the movie list itself".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["yts2nas"]).unwrap();
        assert!(cli.file.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "yts2nas",
            "movies.txt",
            "--config",
            "nas.toml",
            "--failed-log",
            "out/failed.txt",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("movies.txt")));
        assert_eq!(cli.config, Some(PathBuf::from("nas.toml")));
        assert_eq!(cli.failed_log, Some(PathBuf::from("out/failed.txt")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_validation() {
        let cli = Cli::try_parse_from(["yts2nas", "movies.txt", "--failed-log", "movies.txt"])
            .unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["yts2nas", "movies.txt", "--failed-log", "failed.txt"])
            .unwrap();
        assert!(cli.validate().is_ok());
    }
}
