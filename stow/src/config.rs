//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `STOW_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`, absent file is fine)
//! 2. **Environment variables** - Variables prefixed with `STOW_` override YAML values
//! 3. **BUCKET_NAME** - Special case: overrides `bucket` if set
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `STOW_UPLOAD__KEY_PREFIX=incoming` sets the `upload.key_prefix` field.
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Override server port
//! STOW_PORT=8080
//!
//! # Set the destination bucket (preferred method)
//! BUCKET_NAME="my-upload-bucket"
//!
//! # Or use STOW_BUCKET
//! STOW_BUCKET="my-upload-bucket"
//!
//! # Override nested values
//! STOW_UPLOAD__MAX_PAYLOAD_BYTES=5242880
//! ```

use clap::{Parser, Subcommand};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple CLI args - config file location plus the scaffolding subcommand
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "STOW_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the same boilerplate file into each of the given directories
    Scaffold {
        /// Name of the file to create in each directory (e.g. "main.tf")
        #[arg(long)]
        file_name: String,

        /// File content; defaults to an empty file
        #[arg(long, default_value = "")]
        content: String,

        /// Target directories (created if missing)
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
    },
}

/// Main application configuration.
///
/// All fields have defaults; a missing `bucket` is deliberately not a load
/// error, since uploads report it per invocation instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Destination S3 bucket for stored uploads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    /// Upload handling configuration
    pub upload: UploadConfig,
}

/// Upload handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Hard ceiling on the decoded payload size, in bytes
    pub max_payload_bytes: usize,
    /// Key prefix for stored objects
    pub key_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: 10 * 1024 * 1024,
            key_prefix: "uploads".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            bucket: None,
            upload: UploadConfig::default(),
        }
    }
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        Self::figment(args).extract()
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values.
            // STOW_CONFIG belongs to the CLI, not the config structure.
            .merge(Env::prefixed("STOW_").ignore(&["config"]).split("__"))
            // Common BUCKET_NAME convention maps onto `bucket`
            .merge(Env::raw().only(&["BUCKET_NAME"]).map(|_| "bucket".into()))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args_for(config: &str) -> Args {
        Args {
            config: config.to_string(),
            validate: false,
            command: None,
        }
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load(&args_for("missing.yaml"))?;

            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 8080);
            assert_eq!(config.bucket, None);
            assert_eq!(config.upload.max_payload_bytes, 10 * 1024 * 1024);
            assert_eq!(config.upload.key_prefix, "uploads");

            Ok(())
        });
    }

    #[test]
    fn yaml_values_load() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
host: 127.0.0.1
port: 9090
bucket: my-uploads
upload:
  max_payload_bytes: 1048576
  key_prefix: incoming
"#,
            )?;

            let config = Config::load(&args_for("test.yaml"))?;

            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 9090);
            assert_eq!(config.bucket.as_deref(), Some("my-uploads"));
            assert_eq!(config.upload.max_payload_bytes, 1024 * 1024);
            assert_eq!(config.upload.key_prefix, "incoming");

            Ok(())
        });
    }

    #[test]
    fn env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "port: 9090\n")?;

            jail.set_env("STOW_PORT", "8081");
            jail.set_env("STOW_UPLOAD__KEY_PREFIX", "dropbox");

            let config = Config::load(&args_for("test.yaml"))?;

            assert_eq!(config.port, 8081);
            assert_eq!(config.upload.key_prefix, "dropbox");

            Ok(())
        });
    }

    #[test]
    fn bucket_name_env_var_is_honored() {
        Jail::expect_with(|jail| {
            jail.set_env("BUCKET_NAME", "prod-uploads");

            let config = Config::load(&args_for("missing.yaml"))?;

            assert_eq!(config.bucket.as_deref(), Some("prod-uploads"));

            Ok(())
        });
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Config::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }
}
