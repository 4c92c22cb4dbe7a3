//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_CONFIG_PATH, StaticConfig};

/// linkdrop - file drop and URL shortener service
#[derive(Parser, Debug)]
#[command(name = "linkdrop")]
#[command(version)]
#[command(about = "File drop and URL shortener service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// 写出示例配置，返回写入的路径
pub fn generate_config(output_path: Option<String>, force: bool) -> anyhow::Result<String> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    if std::path::Path::new(&path).exists() && !force {
        anyhow::bail!("{} already exists, use --force to overwrite", path);
    }

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_serve() {
        let cli = Cli::parse_from(["linkdrop"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn test_config_generate_args() {
        let cli = Cli::parse_from([
            "linkdrop",
            "--config",
            "/etc/ld.toml",
            "config",
            "generate",
            "out.toml",
        ]);
        assert_eq!(cli.config, "/etc/ld.toml");
        match cli.command {
            Some(Commands::Config {
                action: ConfigCommands::Generate { output_path, force },
            }) => {
                assert_eq!(output_path.as_deref(), Some("out.toml"));
                assert!(!force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_generate_config_refuses_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_string_lossy().into_owned();

        assert_eq!(generate_config(Some(path_str.clone()), false).unwrap(), path_str);
        assert!(generate_config(Some(path_str.clone()), false).is_err());
        assert!(generate_config(Some(path_str), true).is_ok());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[files]"));
    }
}
