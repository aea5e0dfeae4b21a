use std::path::Path;

use thiserror::Error;

use super::models::{CobaltConfig, FormatDescriptor, InfoResponse};
use super::runner::{CommandRunner, ProcessOutput, SystemRunner};

#[derive(Error, Debug)]
pub enum CobaltError {
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stderr}")]
    ToolFailed { code: Option<i32>, stderr: String },

    #[error("Invalid info response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CobaltError>;

#[derive(Debug, Clone)]
pub struct CobaltClient<R = SystemRunner> {
    config: CobaltConfig,
    runner: R,
}

impl CobaltClient {
    pub fn new(config: CobaltConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: CommandRunner> CobaltClient<R> {
    pub fn with_runner(config: CobaltConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &CobaltConfig {
        &self.config
    }

    /// Arguments for a download: `--url <url> [--format <id>] [--output <dir>]`
    pub fn download_args(
        &self,
        url: &str,
        format_id: Option<&str>,
        output_dir: Option<&Path>,
    ) -> Vec<String> {
        let mut args = self.base_args(url);

        if let Some(format_id) = format_id {
            args.extend(["--format".to_string(), format_id.to_string()]);
        }

        if let Some(dir) = output_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            args.extend(["--output".to_string(), dir.display().to_string()]);
        }

        args
    }

    /// Arguments for the info query: `--url <url> --info --json`
    pub fn info_args(&self, url: &str) -> Vec<String> {
        let mut args = self.base_args(url);
        args.extend(["--info".to_string(), "--json".to_string()]);
        args
    }

    fn base_args(&self, url: &str) -> Vec<String> {
        let mut args = self.config.base_args.clone();
        args.extend(["--url".to_string(), url.to_string()]);
        args
    }

    /// Runs a download and returns the tool's stdout on success
    #[tracing::instrument(skip(self))]
    pub async fn download(
        &self,
        url: &str,
        format_id: Option<&str>,
        output_dir: Option<&Path>,
    ) -> Result<String> {
        let args = self.download_args(url, format_id, output_dir);
        let output = self.invoke(&args).await?;
        Ok(output.stdout)
    }

    /// Queries the formats the tool can offer for `url`
    #[tracing::instrument(skip(self))]
    pub async fn fetch_formats(&self, url: &str) -> Result<Vec<FormatDescriptor>> {
        let args = self.info_args(url);
        let output = self.invoke(&args).await?;
        parse_formats(&output.stdout)
    }

    async fn invoke(&self, args: &[String]) -> Result<ProcessOutput> {
        let program = &self.config.program;
        tracing::info!(%program, ?args, "Invoking cobalt");

        let output = self
            .runner
            .run(program, args)
            .await
            .map_err(|source| CobaltError::Spawn {
                program: program.clone(),
                source,
            })
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to start cobalt"))?;

        if !output.success() {
            tracing::warn!(code = ?output.code, stderr = %output.stderr, "cobalt exited with failure");
            return Err(CobaltError::ToolFailed {
                code: output.code,
                stderr: output.stderr,
            });
        }

        Ok(output)
    }
}

/// Parses the `--info --json` payload. Records that do not describe a
/// format are skipped; a payload that is not a JSON object is an error.
pub fn parse_formats(stdout: &str) -> Result<Vec<FormatDescriptor>> {
    let value: serde_json::Value = serde_json::from_str(stdout)?;
    if !value.is_object() {
        return Err(CobaltError::InvalidJson(serde::de::Error::custom(
            "expected a JSON object",
        )));
    }
    let info: InfoResponse = serde_json::from_value(value)?;

    let formats = info
        .formats
        .into_iter()
        .filter_map(|raw| {
            serde_json::from_value::<FormatDescriptor>(raw)
                .inspect_err(|e| tracing::debug!(error = %e, "Skipping format entry"))
                .ok()
        })
        .collect();

    Ok(formats)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        io,
        path::PathBuf,
        sync::{Arc, Mutex},
    };

    use super::*;

    /// Records every invocation and replays a canned reply.
    #[derive(Clone)]
    pub(crate) struct FakeRunner {
        reply: std::result::Result<ProcessOutput, io::ErrorKind>,
        pub calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    }

    impl FakeRunner {
        pub fn exiting(code: i32, stdout: &str, stderr: &str) -> Self {
            Self {
                reply: Ok(ProcessOutput {
                    code: Some(code),
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                }),
                calls: Default::default(),
            }
        }

        pub fn unspawnable() -> Self {
            Self {
                reply: Err(io::ErrorKind::NotFound),
                calls: Default::default(),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn last_args(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .last()
                .map(|(_, args)| args.clone())
                .unwrap_or_default()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(
            &self,
            program: &str,
            args: &[String],
        ) -> impl std::future::Future<Output = io::Result<ProcessOutput>> + Send {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            let reply = self.reply.clone().map_err(io::Error::from);
            async move { reply }
        }
    }

    fn client(runner: FakeRunner) -> CobaltClient<FakeRunner> {
        CobaltClient::with_runner(CobaltConfig::default(), runner)
    }

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_download_args() {
        let client = client(FakeRunner::exiting(0, "", ""));
        let url = "https://example.com/video";

        assert_eq!(
            client.download_args(url, None, None),
            strings(&["-m", "cobalt.cli.main", "--url", url])
        );
        assert_eq!(
            client.download_args(url, Some("137"), None),
            strings(&["-m", "cobalt.cli.main", "--url", url, "--format", "137"])
        );

        let dir = PathBuf::from("downloads");
        assert_eq!(
            client.download_args(url, Some("137"), Some(dir.as_path())),
            strings(&[
                "-m",
                "cobalt.cli.main",
                "--url",
                url,
                "--format",
                "137",
                "--output",
                "downloads"
            ])
        );
        assert_eq!(
            client.download_args(url, None, Some(dir.as_path())),
            strings(&["-m", "cobalt.cli.main", "--url", url, "--output", "downloads"])
        );
    }

    #[test]
    fn test_empty_output_dir_is_omitted() {
        let client = client(FakeRunner::exiting(0, "", ""));
        let args = client.download_args("u", None, Some(Path::new("")));
        assert!(!args.contains(&"--output".to_string()));
    }

    #[test]
    fn test_info_args() {
        let client = client(FakeRunner::exiting(0, "", ""));
        assert_eq!(
            client.info_args("https://example.com/v"),
            strings(&[
                "-m",
                "cobalt.cli.main",
                "--url",
                "https://example.com/v",
                "--info",
                "--json"
            ])
        );
    }

    #[tokio::test]
    async fn test_download_returns_stdout() {
        let runner = FakeRunner::exiting(0, "Saved video.mp4\n", "");
        let client = client(runner.clone());

        let stdout = client
            .download("https://example.com/v", None, None)
            .await
            .unwrap();
        assert_eq!(stdout, "Saved video.mp4\n");

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "python");
    }

    #[tokio::test]
    async fn test_download_failure_carries_stderr() {
        let client = client(FakeRunner::exiting(2, "", "unsupported link"));

        match client.download("https://example.com/v", None, None).await {
            Err(CobaltError::ToolFailed { code, stderr }) => {
                assert_eq!(code, Some(2));
                assert_eq!(stderr, "unsupported link");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let client = client(FakeRunner::unspawnable());
        let err = client.download("u", None, None).await.unwrap_err();
        assert!(matches!(err, CobaltError::Spawn { .. }));
        assert!(err.to_string().starts_with("Failed to start `python`"));
    }

    #[tokio::test]
    async fn test_fetch_formats() {
        let stdout = r#"{"title": "clip", "formats": [
            {"format_id": "18", "quality": "360p", "ext": "mp4"},
            {"format_id": "140", "quality": "audio", "ext": "m4a"}
        ]}"#;
        let runner = FakeRunner::exiting(0, stdout, "");
        let client = client(runner.clone());

        let formats = client.fetch_formats("https://example.com/v").await.unwrap();
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[1].to_string(), "140 - audio - m4a");
        assert_eq!(runner.last_args()[4..].to_vec(), strings(&["--info", "--json"]));
    }

    #[tokio::test]
    async fn test_fetch_formats_malformed_json() {
        let client = client(FakeRunner::exiting(0, "Fetching info...\n{oops", ""));
        let err = client.fetch_formats("u").await.unwrap_err();
        assert!(matches!(err, CobaltError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_formats_edge_cases() {
        assert!(parse_formats("{}").unwrap().is_empty());
        assert!(parse_formats(r#"{"formats": []}"#).unwrap().is_empty());
        assert!(parse_formats("[]").is_err());
        assert!(parse_formats("").is_err());

        let formats =
            parse_formats(r#"{"formats": [{"quality": "hd"}, 7, {"format_id": "best"}]}"#)
                .unwrap();
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].format_id, "best");
    }
}
