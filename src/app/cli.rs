//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gazemap - Render gaze recordings into heatmaps, trajectories, and
/// region-containment breakdowns
#[derive(Parser, Debug)]
#[command(name = "gazemap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every map for one or more gaze recordings
    Render {
        /// Input gaze CSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Mask JSON document for region containment
        #[arg(short, long)]
        masks: Option<PathBuf>,

        /// Output directory (default: timestamped under the maps dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Summarize gaze recordings without rendering
    Info {
        /// Input gaze CSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the default map output directory
    pub fn maps_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gazemap").join("maps"))
            .unwrap_or_else(|| PathBuf::from("maps"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_maps_dir() {
        let dir = Cli::maps_dir();
        assert!(dir.to_string_lossy().contains("maps"));
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_cli_parse_render_command() {
        let args = vec![
            "gazemap",
            "render",
            "session1.csv",
            "session2.csv",
            "--masks", "regions.json",
            "--out", "/tmp/maps",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render { inputs, masks, out } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(inputs[0], PathBuf::from("session1.csv"));
                assert_eq!(masks, Some(PathBuf::from("regions.json")));
                assert_eq!(out, Some(PathBuf::from("/tmp/maps")));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parse_render_defaults() {
        let args = vec!["gazemap", "render", "session.csv"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render { inputs, masks, out } => {
                assert_eq!(inputs.len(), 1);
                assert!(masks.is_none());
                assert!(out.is_none());
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_render_requires_inputs() {
        let args = vec!["gazemap", "render"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parse_info_command() {
        let args = vec!["gazemap", "info", "session.csv"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Info { inputs } => {
                assert_eq!(inputs, vec![PathBuf::from("session.csv")]);
            }
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show() {
        let args = vec!["gazemap", "config", "show"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Show } => {}
            _ => panic!("Expected Config Show"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let args = vec!["gazemap", "config", "init", "--force"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Init { force } } => {
                assert!(force);
            }
            _ => panic!("Expected Config Init"),
        }
    }

    #[test]
    fn test_cli_parse_config_init_defaults() {
        let args = vec!["gazemap", "config", "init"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Init { force } } => {
                assert!(!force);
            }
            _ => panic!("Expected Config Init"),
        }
    }

    #[test]
    fn test_cli_global_verbose_flag() {
        let args = vec!["gazemap", "--verbose", "info", "session.csv"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_global_config_flag() {
        let args = vec!["gazemap", "-c", "/custom/config.toml", "info", "session.csv"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_invalid_command_fails() {
        let args = vec!["gazemap", "replay"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_verify_command_structure() {
        let cmd = Cli::command();
        let subcommands: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        assert!(subcommands.contains(&"render"));
        assert!(subcommands.contains(&"info"));
        assert!(subcommands.contains(&"config"));
    }
}
