//! Subcommand handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use pyu_gcs::client::GcsConnector;
use pyu_gcs::config::{AcceptDefaults, ProcessEnv, Prompt};
use pyu_gcs::{UploadPlugin, Uploader};

use crate::TRACING_TARGET_COMMAND;
use crate::config::{LinePrompt, load_uploader_config};

/// Prompts for the uploader settings and persists them at `config_path`.
pub fn configure(config_path: &Path, non_interactive: bool) -> anyhow::Result<()> {
    let mut config = load_uploader_config(config_path)?;
    let uploader = Uploader::new();

    let mut prompt: Box<dyn Prompt> = if non_interactive {
        Box::new(AcceptDefaults)
    } else {
        Box::new(LinePrompt::terminal())
    };

    uploader
        .configure(&mut config, &ProcessEnv, &mut *prompt)
        .context("failed to configure uploader")?;

    config
        .save(config_path)
        .with_context(|| format!("failed to save configuration to {}", config_path.display()))?;

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        path = %config_path.display(),
        "Configuration saved"
    );

    Ok(())
}

/// Uploads `files` one after another.
///
/// Every file is attempted even when an earlier one fails.
///
/// # Errors
///
/// Returns an error if the uploader cannot be initialized or any upload
/// failed.
pub async fn upload(
    config_path: &Path,
    connector: GcsConnector,
    files: &[PathBuf],
) -> anyhow::Result<()> {
    let config = load_uploader_config(config_path)?;

    let mut uploader = Uploader::with_connector(connector);
    uploader
        .initialize(&config, &ProcessEnv)
        .context("failed to initialize uploader")?;

    let failed = upload_all(&mut uploader, files).await;
    if failed > 0 {
        bail!("{failed} of {} uploads failed", files.len());
    }

    Ok(())
}

/// Uploads each file through `plugin` and returns the number of failures.
async fn upload_all<P: UploadPlugin>(plugin: &mut P, files: &[PathBuf]) -> usize {
    let mut failed = 0;

    for file in files {
        if plugin.upload_file(file).await {
            tracing::info!(
                target: TRACING_TARGET_COMMAND,
                plugin = P::NAME,
                file = %file.display(),
                "Uploaded"
            );
        } else {
            failed += 1;
        }
    }

    failed
}

#[cfg(test)]
mod tests {
    use pyu_gcs::config::{Environment, UploaderConfig};
    use pyu_gcs::{Result, UploadPlugin};

    use super::*;

    /// Plugin that fails every file whose name contains "bad".
    #[derive(Default)]
    struct Recording {
        attempted: Vec<PathBuf>,
    }

    #[async_trait::async_trait]
    impl UploadPlugin for Recording {
        const NAME: &'static str = "recording";
        const AUTHOR: &'static str = "tests";

        fn configure(
            &self,
            _config: &mut UploaderConfig,
            _env: &dyn Environment,
            _prompt: &mut dyn Prompt,
        ) -> Result<()> {
            Ok(())
        }

        fn initialize(&mut self, _config: &UploaderConfig, _env: &dyn Environment) -> Result<()> {
            Ok(())
        }

        async fn upload_file(&mut self, local_path: &Path) -> bool {
            self.attempted.push(local_path.to_path_buf());
            !local_path.to_string_lossy().contains("bad")
        }
    }

    #[tokio::test]
    async fn upload_all_attempts_every_file() {
        let mut plugin = Recording::default();
        let files = [
            PathBuf::from("dist/bad-1.zip"),
            PathBuf::from("dist/app-1.2.0.zip"),
            PathBuf::from("dist/bad-2.zip"),
        ];

        let failed = upload_all(&mut plugin, &files).await;

        assert_eq!(failed, 2);
        assert_eq!(plugin.attempted, files);
    }

    #[test]
    fn configure_non_interactive_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = UploaderConfig::new("releases", "v2", "/creds.json");
        config.save(&path).unwrap();

        configure(&path, true).unwrap();

        assert_eq!(UploaderConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn configure_non_interactive_requires_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(configure(&path, true).is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn upload_requires_credentials_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = UploaderConfig {
            bucket_name: Some("releases".into()),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let err = upload(&path, GcsConnector::new(), &[PathBuf::from("app.zip")])
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("credentials path is not set"));
    }
}
