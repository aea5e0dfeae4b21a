use std::path::PathBuf;

use crate::{
    cobalt::{CobaltClient, CobaltError, CommandRunner, FormatDescriptor, SystemRunner},
    domain::{AppError, DownloadOutcome, DownloadRequest},
    utils::quote_arg,
};

#[derive(Clone)]
pub struct DownloadCoordinator<R = SystemRunner> {
    client: CobaltClient<R>,
}

impl<R: CommandRunner> DownloadCoordinator<R> {
    pub fn new(client: CobaltClient<R>) -> Self {
        Self { client }
    }

    /// Runs the tool for `request`. A blank URL is rejected before anything
    /// is spawned; every other failure becomes a failed outcome.
    pub async fn download(&self, request: DownloadRequest) -> Result<DownloadOutcome, AppError> {
        let url = request.validate()?;

        let outcome = match self
            .client
            .download(
                url,
                request.format.format_id(),
                request.output_dir.as_deref(),
            )
            .await
        {
            Ok(stdout) => DownloadOutcome::succeeded(stdout),
            Err(CobaltError::ToolFailed { stderr, .. }) => DownloadOutcome::failed(stderr),
            Err(e) => DownloadOutcome::failed(e.to_string()),
        };

        Ok(outcome)
    }

    /// Formats offered for `url`, or nothing if the tool could not tell.
    pub async fn available_formats(&self, url: String) -> Vec<FormatDescriptor> {
        let url = url.trim();
        if url.is_empty() {
            return Vec::new();
        }

        match self.client.fetch_formats(url).await {
            Ok(formats) => formats,
            Err(e) => {
                tracing::warn!(error = %e, "Format lookup failed");
                Vec::new()
            }
        }
    }

    pub async fn choose_output_dir(&self, current: PathBuf) -> Option<PathBuf> {
        let mut dialog = rfd::AsyncFileDialog::new().set_title("Download directory");
        if current.is_dir() {
            dialog = dialog.set_directory(&current);
        } else if let Ok(cwd) = std::env::current_dir() {
            dialog = dialog.set_directory(cwd);
        }

        dialog
            .pick_folder()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    pub fn command_line(&self, request: &DownloadRequest) -> String {
        let args = self.client.download_args(
            request.url.trim(),
            request.format.format_id(),
            request.output_dir.as_deref(),
        );
        std::iter::once(self.client.config().program.as_str())
            .chain(args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
