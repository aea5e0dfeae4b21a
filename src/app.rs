use crate::application::DownloadCoordinator;
use crate::cobalt::{CobaltClient, FormatDescriptor};
use crate::config::AppConfig;
use crate::domain::{AppError, DownloadOutcome, DownloadPhase};
use crate::ui::{DownloadMessage, DownloadView};
use crate::utils::target_label;
use iced::Task;
use std::path::PathBuf;

pub struct DownloadApp {
    view: DownloadView,
    coordinator: DownloadCoordinator,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DownloadApp {
    pub fn new(config: AppConfig) -> Self {
        let coordinator = DownloadCoordinator::new(CobaltClient::new(config.cobalt));
        let view = DownloadView::new(config.download_dir.display().to_string());

        Self { view, coordinator }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// Queried URL and its formats; empty when the tool could not list any
    FormatsLoaded(String, Vec<FormatDescriptor>),
    OutputDirSelected(Option<PathBuf>),
    DownloadCompleted(Result<DownloadOutcome, AppError>),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                DownloadMessage::DownloadPressed if !app.view.phase.is_busy() => {
                    let request = app.view.request();

                    if let Err(e) = request.validate() {
                        app.view.warn(e.to_string());
                        return Task::none();
                    }

                    tracing::info!(
                        command = %app.coordinator.command_line(&request),
                        "Starting download"
                    );

                    let coordinator = app.coordinator.clone();
                    app.view.phase = DownloadPhase::Downloading;
                    app.view.outcome = None;
                    app.view.status_message =
                        format!("Downloading from {}...", target_label(&request.url));

                    return Task::perform(
                        async move { coordinator.download(request).await },
                        Message::DownloadCompleted,
                    );
                }
                DownloadMessage::CheckFormatsPressed if !app.view.phase.is_busy() => {
                    let url = app.view.url.trim().to_string();
                    if url.is_empty() {
                        app.view.warn("Enter a URL to see available formats");
                        return Task::none();
                    }

                    let coordinator = app.coordinator.clone();
                    app.view.phase = DownloadPhase::FetchingFormats;
                    app.view.status_message =
                        format!("Fetching formats for {}...", target_label(&url));

                    return Task::perform(
                        async move {
                            let formats = coordinator.available_formats(url.clone()).await;
                            (url, formats)
                        },
                        |(url, formats)| Message::FormatsLoaded(url, formats),
                    );
                }
                DownloadMessage::BrowsePressed if !app.view.phase.is_busy() => {
                    let coordinator = app.coordinator.clone();
                    let current = PathBuf::from(app.view.download_dir.trim());

                    return Task::perform(
                        async move { coordinator.choose_output_dir(current).await },
                        Message::OutputDirSelected,
                    );
                }
                _ => {}
            }
        }
        Message::FormatsLoaded(url, formats) => {
            // the URL was edited while the query ran
            if url != app.view.url.trim() {
                tracing::debug!(%url, "Discarding formats for a previous URL");
                app.view.warn("URL changed, check formats again");
                return Task::none();
            }

            tracing::debug!(count = formats.len(), "Formats loaded");
            app.view.set_formats(formats);
        }
        Message::OutputDirSelected(dir) => {
            // None means the dialog was cancelled
            if let Some(dir) = dir {
                app.view.download_dir = dir.display().to_string();
            }
        }
        Message::DownloadCompleted(result) => match result {
            Ok(outcome) => {
                if outcome.success {
                    tracing::info!("Download completed");
                } else {
                    tracing::warn!("Download failed");
                }
                app.view.finish(outcome);
            }
            Err(e) => {
                app.view.warn(e.to_string());
            }
        },
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    let command_preview = app.coordinator.command_line(&app.view.request());
    app.view.view(command_preview).map(Message::UiMessage)
}
