pub mod icon;

use iced::{
    widget::{button, column, container, pick_list, row, scrollable, text, text_input, Space},
    Element, Font, Length,
};

use crate::cobalt::FormatDescriptor;
use crate::domain::{DownloadOutcome, DownloadPhase, DownloadRequest, FormatChoice};

const ABOUT: &str = "Cobalt is a media downloader that doesn't piss you off. It's friendly, \
efficient, and doesn't have ads, trackers, paywalls, or other nonsense.\n\n\
• Downloads videos and audio from various platforms\n\
• Simple and straightforward interface\n\
• No ads or trackers\n\
• Open source project\n\n\
More information: https://github.com/medoxisto/cobalt";

/// Main view state
pub struct DownloadView {
    pub url: String,
    pub download_dir: String,
    pub show_advanced: bool,
    pub show_about: bool,
    /// `Best` first, then whatever the last format check returned
    pub formats: Vec<FormatChoice>,
    pub selected_format: FormatChoice,
    pub formats_checked: bool,
    pub status_message: String,
    pub phase: DownloadPhase,
    pub outcome: Option<DownloadOutcome>,
}

impl DownloadView {
    pub fn new(download_dir: impl Into<String>) -> Self {
        Self {
            url: String::new(),
            download_dir: download_dir.into(),
            show_advanced: false,
            show_about: false,
            formats: vec![FormatChoice::Best],
            selected_format: FormatChoice::Best,
            formats_checked: false,
            status_message: "Enter a media URL to download".to_string(),
            phase: DownloadPhase::Idle,
            outcome: None,
        }
    }
}

impl Default for DownloadView {
    fn default() -> Self {
        Self::new("downloads")
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    UrlChanged(String),
    DownloadDirChanged(String),
    AdvancedToggled,
    AboutToggled,
    FormatSelected(FormatChoice),
    CheckFormatsPressed,
    BrowsePressed,
    DownloadPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::UrlChanged(url) => {
                self.url = url;
                // formats were reported for the previous URL
                self.clear_formats();
            }
            DownloadMessage::DownloadDirChanged(dir) => {
                self.download_dir = dir;
            }
            DownloadMessage::AdvancedToggled => {
                self.show_advanced = !self.show_advanced;
            }
            DownloadMessage::AboutToggled => {
                self.show_about = !self.show_about;
            }
            DownloadMessage::FormatSelected(choice) => {
                self.selected_format = choice;
            }
            DownloadMessage::CheckFormatsPressed
            | DownloadMessage::BrowsePressed
            | DownloadMessage::DownloadPressed => {
                // Will be handled by the app
            }
        }
    }

    /// The request the form currently describes. Advanced options only
    /// apply while the advanced panel is open.
    pub fn request(&self) -> DownloadRequest {
        let request = DownloadRequest::new(self.url.trim());
        if !self.show_advanced {
            return request;
        }

        let request = request.with_format(self.selected_format.clone());
        match self.download_dir.trim() {
            "" => request,
            dir => request.with_output_dir(dir),
        }
    }

    pub fn set_formats(&mut self, formats: Vec<FormatDescriptor>) {
        self.formats = std::iter::once(FormatChoice::Best)
            .chain(formats.into_iter().map(FormatChoice::Specific))
            .collect();
        self.selected_format = FormatChoice::Best;
        self.formats_checked = true;
        self.phase = DownloadPhase::Idle;
        self.status_message = match self.formats.len() - 1 {
            0 => "No formats available for this URL".to_string(),
            1 => "Found 1 format".to_string(),
            n => format!("Found {n} formats"),
        };
    }

    pub fn finish(&mut self, outcome: DownloadOutcome) {
        if outcome.success {
            self.phase = DownloadPhase::Completed;
            self.status_message = "Download completed successfully!".to_string();
        } else {
            self.phase = DownloadPhase::Failed;
            self.status_message = "Download failed".to_string();
        }
        self.outcome = Some(outcome);
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        self.phase = DownloadPhase::Idle;
        self.status_message = warning.into();
    }

    fn clear_formats(&mut self) {
        self.formats = vec![FormatChoice::Best];
        self.selected_format = FormatChoice::Best;
        self.formats_checked = false;
    }

    fn format_hint(&self) -> Option<&'static str> {
        if self.url.trim().is_empty() {
            Some("Enter a URL to see available formats")
        } else if !self.formats_checked {
            Some("Click 'Check formats' to see available formats")
        } else if self.formats.len() == 1 {
            Some("No formats available for this URL")
        } else {
            None
        }
    }

    pub fn view(&self, command_preview: String) -> Element<'_, DownloadMessage> {
        let idle = !self.phase.is_busy();

        let mut content = column![
            text("Cobalt Media Downloader").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Enter media URL").size(16),
            text_input("https://example.com/video", &self.url)
                .on_input(DownloadMessage::UrlChanged)
                .on_submit(DownloadMessage::DownloadPressed)
                .padding(10),
            button(if self.show_advanced {
                "Hide advanced options"
            } else {
                "Show advanced options"
            })
            .on_press(DownloadMessage::AdvancedToggled),
        ]
        .padding(20)
        .spacing(10);

        if self.show_advanced {
            content = content.push(self.advanced_options(idle, command_preview));
        }

        content = content
            .push(Space::new().height(Length::Fixed(10.0)))
            .push(
                button(if self.phase == DownloadPhase::Downloading {
                    "Downloading..."
                } else {
                    "Download"
                })
                .on_press_maybe(idle.then_some(DownloadMessage::DownloadPressed))
                .width(Length::Fill)
                .padding([10, 20]),
            )
            .push(text(&self.status_message).size(14));

        if let Some(outcome) = &self.outcome {
            content = content.push(
                container(
                    scrollable(text(&outcome.output).font(Font::MONOSPACE).size(13))
                        .height(Length::Fixed(220.0)),
                )
                .padding(10)
                .width(Length::Fill),
            );
        }

        content = content.push(
            button(if self.show_about {
                "Hide About Cobalt"
            } else {
                "About Cobalt"
            })
            .on_press(DownloadMessage::AboutToggled),
        );
        if self.show_about {
            content = content.push(text(ABOUT).size(14));
        }

        content = content.push(
            text("Cobalt Media Downloader • Open Source Project").size(12),
        );

        scrollable(content).into()
    }

    fn advanced_options(&self, idle: bool, command_preview: String) -> Element<'_, DownloadMessage> {
        let directory = column![
            text("Download directory").size(14),
            row![
                text_input("downloads", &self.download_dir)
                    .on_input(DownloadMessage::DownloadDirChanged)
                    .padding(8),
                button("Browse...").on_press_maybe(idle.then_some(DownloadMessage::BrowsePressed)),
            ]
            .spacing(8),
        ]
        .spacing(6)
        .width(Length::FillPortion(1));

        let mut formats = column![
            text("Format").size(14),
            row![
                pick_list(
                    self.formats.as_slice(),
                    Some(&self.selected_format),
                    DownloadMessage::FormatSelected,
                )
                .width(Length::Fill),
                button("Check formats").on_press_maybe(
                    (idle && !self.url.trim().is_empty())
                        .then_some(DownloadMessage::CheckFormatsPressed)
                ),
            ]
            .spacing(8),
        ]
        .spacing(6)
        .width(Length::FillPortion(1));

        if let Some(hint) = self.format_hint() {
            formats = formats.push(text(hint).size(12));
        }

        container(
            column![
                row![directory, formats].spacing(20),
                text(format!("Command: {command_preview}")).size(12).font(Font::MONOSPACE),
            ]
            .spacing(10),
        )
        .padding(10)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(id: &str) -> FormatDescriptor {
        FormatDescriptor {
            format_id: id.to_string(),
            quality: "720p".to_string(),
            ext: "mp4".to_string(),
        }
    }

    #[test]
    fn test_url_change_clears_stale_formats() {
        let mut view = DownloadView::default();
        view.update(DownloadMessage::UrlChanged("https://example.com/a".to_string()));
        view.set_formats(vec![format("22"), format("18")]);
        view.update(DownloadMessage::FormatSelected(FormatChoice::Specific(format("22"))));
        assert_eq!(view.formats.len(), 3);

        view.update(DownloadMessage::UrlChanged("https://example.com/b".to_string()));
        assert_eq!(view.formats, vec![FormatChoice::Best]);
        assert_eq!(view.selected_format, FormatChoice::Best);
        assert!(!view.formats_checked);
    }

    #[test]
    fn test_request_ignores_hidden_advanced_options() {
        let mut view = DownloadView::new("media");
        view.update(DownloadMessage::UrlChanged(" https://example.com/a ".to_string()));
        view.update(DownloadMessage::FormatSelected(FormatChoice::Specific(format("22"))));

        assert_eq!(view.request(), DownloadRequest::new("https://example.com/a"));

        view.update(DownloadMessage::AdvancedToggled);
        let request = view.request();
        assert_eq!(request.format.format_id(), Some("22"));
        assert_eq!(request.output_dir, Some("media".into()));

        view.update(DownloadMessage::DownloadDirChanged("  ".to_string()));
        assert_eq!(view.request().output_dir, None);
    }

    #[test]
    fn test_empty_format_result() {
        let mut view = DownloadView::default();
        view.update(DownloadMessage::UrlChanged("https://example.com/a".to_string()));
        assert_eq!(
            view.format_hint(),
            Some("Click 'Check formats' to see available formats")
        );

        view.set_formats(Vec::new());
        assert_eq!(view.status_message, "No formats available for this URL");
        assert_eq!(view.format_hint(), Some("No formats available for this URL"));

        view.set_formats(vec![format("18")]);
        assert_eq!(view.status_message, "Found 1 format");
        assert_eq!(view.format_hint(), None);
    }

    #[test]
    fn test_finish_messages() {
        let mut view = DownloadView::default();
        view.finish(DownloadOutcome::succeeded("saved"));
        assert_eq!(view.status_message, "Download completed successfully!");
        assert_eq!(view.phase, DownloadPhase::Completed);

        view.finish(DownloadOutcome::failed("nope"));
        assert_eq!(view.status_message, "Download failed");
        assert_eq!(view.phase, DownloadPhase::Failed);
        assert_eq!(view.outcome.as_ref().map(|o| o.output.as_str()), Some("nope"));
    }
}
