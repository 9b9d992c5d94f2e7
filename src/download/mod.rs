use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::cli::{self, MenuChoice, OutputFormat};
use crate::config::Config;
use crate::output;
use crate::utils;
use crate::youtube::api::{collect_video_ids, DataApiClient};
use crate::youtube::resolver::resolve_channel;
use crate::youtube::transcript::{TranscriptClient, TranscriptError, TranscriptSource};
use crate::youtube::url;

const SINGLE_VIDEOS_DIR: &str = "single_videos";
const MULTIPLE_VIDEOS_DIR: &str = "multiple_videos";

/// Outcome of one processed video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemOutcome {
    Saved,
    NoCaptions,
    Failed,
}

/// Per-run download tally, scoped to a single workflow invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub successful: usize,
    pub failed: usize,
    pub no_captions: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Saved => self.successful += 1,
            ItemOutcome::NoCaptions => self.no_captions += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.successful + self.failed + self.no_captions
    }
}

/// Interactive menu loop driving the three download workflows.
pub struct Downloader {
    config: Config,
    api: DataApiClient,
    transcripts: TranscriptClient,
    quiet: bool,
}

impl Downloader {
    pub fn new(config: Config, quiet: bool) -> Self {
        let http = reqwest::Client::new();
        let api = DataApiClient::new(http.clone(), config.api_key.clone());
        let transcripts = TranscriptClient::new(http, config.language.clone());
        Self {
            config,
            api,
            transcripts,
            quiet,
        }
    }

    /// Blocking menu loop; returns when the user chooses Exit.
    pub async fn run(&self) -> Result<()> {
        loop {
            cli::display_menu();
            match cli::read_menu_choice()? {
                MenuChoice::Channel => {
                    let channel_url = cli::prompt_line("Enter the YouTube channel URL: ")?;
                    let format = cli::read_output_format()?;
                    self.download_channel(&channel_url, format).await?;
                }
                MenuChoice::SingleVideo => {
                    let video_url = cli::prompt_line("Enter the YouTube video URL: ")?;
                    let format = cli::read_output_format()?;
                    self.download_single_video(&video_url, format).await?;
                }
                MenuChoice::VideoFile => {
                    let file_path =
                        cli::prompt_line("Enter the path to the file containing video URLs: ")?;
                    let format = cli::read_output_format()?;
                    self.download_from_file(Path::new(&file_path), format).await?;
                }
                MenuChoice::Exit => {
                    println!("\nThank you for using YouTube Transcript Downloader!");
                    return Ok(());
                }
            }
        }
    }

    /// Workflow 1: every video on a channel.
    async fn download_channel(&self, channel_url: &str, format: OutputFormat) -> Result<()> {
        println!("\nResolving channel...");
        let channel_id = match resolve_channel(&self.api, channel_url).await {
            Some(id) => id,
            None => {
                println!(
                    "Could not resolve a channel for '{}'. Check the URL and your YOUTUBE_API_KEY.",
                    channel_url
                );
                return Ok(());
            }
        };
        println!("Channel ID: {}", channel_id);

        println!("Fetching video list...");
        let video_ids = collect_video_ids(&self.api, &channel_id).await;
        if video_ids.is_empty() {
            println!("No videos found for this channel (or the channel is inaccessible).");
            return Ok(());
        }
        println!("Found {} videos", video_ids.len());

        // Output directory is named after the resolved channel ID, not the input URL
        let output_dir = self.output_dir(&utils::sanitize_filename(&channel_id))?;

        let progress = self.batch_progress(video_ids.len());
        let summary =
            download_batch(&self.transcripts, &video_ids, &output_dir, format, &progress).await;
        progress.finish();

        print_summary(&summary);
        Ok(())
    }

    /// Workflow 2: one video.
    async fn download_single_video(&self, video_url: &str, format: OutputFormat) -> Result<()> {
        let output_dir = self.output_dir(SINGLE_VIDEOS_DIR)?;
        let progress = BatchProgress::hidden();
        process_video(&self.transcripts, video_url, &output_dir, format, &progress).await;
        Ok(())
    }

    /// Workflow 3: every non-blank line of a URL list file.
    async fn download_from_file(&self, path: &Path, format: OutputFormat) -> Result<()> {
        let content = fs_err::read_to_string(path)
            .with_context(|| format!("Failed to read URL list {}", path.display()))?;
        let urls = non_blank_lines(&content);
        if urls.is_empty() {
            println!("No URLs found in {}", path.display());
            return Ok(());
        }
        println!("\nFound {} URLs", urls.len());

        let output_dir = self.output_dir(MULTIPLE_VIDEOS_DIR)?;

        let progress = self.batch_progress(urls.len());
        let summary =
            download_batch(&self.transcripts, &urls, &output_dir, format, &progress).await;
        progress.finish();

        print_summary(&summary);
        Ok(())
    }

    fn output_dir(&self, subdir: &str) -> Result<PathBuf> {
        let dir = self.config.output_root.join(subdir);
        fs_err::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(dir)
    }

    fn batch_progress(&self, total: usize) -> BatchProgress {
        if self.quiet {
            BatchProgress::hidden()
        } else {
            BatchProgress::bar(total as u64)
        }
    }
}

/// Run the per-video pipeline over a batch, strictly in order, one at a time.
///
/// Every item runs inside its own guarded step; a failure never aborts the
/// remaining items.
async fn download_batch<S: TranscriptSource + ?Sized>(
    source: &S,
    urls: &[String],
    output_dir: &Path,
    format: OutputFormat,
    progress: &BatchProgress,
) -> RunSummary {
    let mut summary = RunSummary::default();
    for raw in urls {
        let outcome = process_video(source, raw, output_dir, format, progress).await;
        summary.record(outcome);
        progress.inc();
    }
    summary
}

/// Fetch one transcript and export it; never fails the caller.
async fn process_video<S: TranscriptSource + ?Sized>(
    source: &S,
    raw: &str,
    output_dir: &Path,
    format: OutputFormat,
    progress: &BatchProgress,
) -> ItemOutcome {
    let video_id = url::video_id(raw);
    progress.set_message(video_id.clone());

    match source.fetch_transcript(&video_id).await {
        Ok(segments) => {
            let stem = output_dir.join(utils::sanitize_filename(&video_id));
            match output::export_to_file(&segments, &stem, &format) {
                Ok(()) => {
                    progress.println(format!(
                        "  {}: saved {} segments as {}",
                        video_id,
                        segments.len(),
                        format
                    ));
                    ItemOutcome::Saved
                }
                Err(err) => {
                    progress.println(format!("  {}: could not write transcript: {:#}", video_id, err));
                    ItemOutcome::Failed
                }
            }
        }
        Err(TranscriptError::NoCaptions) => {
            progress.println(format!("  {}: no captions available", video_id));
            ItemOutcome::NoCaptions
        }
        Err(err) => {
            progress.println(format!("  {}: download failed: {}", video_id, err));
            ItemOutcome::Failed
        }
    }
}

/// Trimmed, non-empty lines of a URL list file, in file order.
fn non_blank_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", style("Download summary").bold());
    println!("  Successful:  {}", summary.successful);
    println!("  Failed:      {}", summary.failed);
    println!("  No captions: {}", summary.no_captions);
    println!("  Total:       {}", summary.total());
}

/// Progress bar wrapper so batch loops read the same with `--quiet`.
struct BatchProgress {
    bar: Option<ProgressBar>,
}

impl BatchProgress {
    fn bar(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap(),
        );
        Self { bar: Some(bar) }
    }

    fn hidden() -> Self {
        Self { bar: None }
    }

    fn set_message(&self, message: String) {
        if let Some(bar) = &self.bar {
            bar.set_message(message);
        }
    }

    fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn println(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }

    fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::transcript::MockTranscriptSource;
    use crate::youtube::TranscriptSegment;

    fn segments() -> Vec<TranscriptSegment> {
        vec![TranscriptSegment {
            text: "hello".to_string(),
            start: 0.0,
            duration: 1.0,
        }]
    }

    #[test]
    fn test_summary_counts_sum_to_total() {
        let mut summary = RunSummary::default();
        summary.record(ItemOutcome::Saved);
        summary.record(ItemOutcome::Saved);
        summary.record(ItemOutcome::NoCaptions);
        summary.record(ItemOutcome::Failed);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.no_captions, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_non_blank_lines_skips_blanks() {
        let lines = non_blank_lines("https://youtu.be/aaaaaaaaaaa\n\n   \nmalformed-line\n");
        assert_eq!(lines, vec!["https://youtu.be/aaaaaaaaaaa", "malformed-line"]);
    }

    #[tokio::test]
    async fn test_batch_failure_does_not_block_earlier_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockTranscriptSource::new();
        source
            .expect_fetch_transcript()
            .withf(|id| id == "aaaaaaaaaaa")
            .returning(|_| Ok(segments()));
        source
            .expect_fetch_transcript()
            .withf(|id| id == "malformed-line")
            .returning(|_| Err(TranscriptError::Parse("bad payload".to_string())));

        let urls = non_blank_lines("https://youtu.be/aaaaaaaaaaa\n\nmalformed-line\n");
        assert_eq!(urls.len(), 2);

        let summary = download_batch(
            &source,
            &urls,
            dir.path(),
            OutputFormat::Txt,
            &BatchProgress::hidden(),
        )
        .await;

        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), urls.len());
        // Line 1's file survives line 3's failure
        assert!(dir.path().join("aaaaaaaaaaa.txt").exists());
    }

    #[tokio::test]
    async fn test_no_captions_tallies_separately_from_failed() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockTranscriptSource::new();
        source
            .expect_fetch_transcript()
            .withf(|id| id == "nocaptions1")
            .returning(|_| Err(TranscriptError::NoCaptions));
        source
            .expect_fetch_transcript()
            .withf(|id| id == "goodvideo11")
            .returning(|_| Ok(segments()));

        let urls = vec!["nocaptions1".to_string(), "goodvideo11".to_string()];
        let summary = download_batch(
            &source,
            &urls,
            dir.path(),
            OutputFormat::Srt,
            &BatchProgress::hidden(),
        )
        .await;

        assert_eq!(summary.no_captions, 1);
        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.total(), urls.len());
    }
}
