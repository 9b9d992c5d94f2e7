use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(
    name = "yt-transcripts",
    about = "Download YouTube closed-caption transcripts for videos, URL lists, or entire channels",
    version,
    long_about = "An interactive CLI tool for downloading YouTube closed-caption transcripts. \
Supports single videos, newline-delimited URL list files, and whole channels, with JSON, \
plain-text, and SRT output."
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

/// Serialization layout for exported transcripts.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON array of {text, start, duration} objects
    Json,
    /// One caption line per segment
    Txt,
    /// SRT subtitle format
    Srt,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Txt => "txt",
            OutputFormat::Srt => "srt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Txt => write!(f, "txt"),
            OutputFormat::Srt => write!(f, "srt"),
        }
    }
}

/// The four top-level menu workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Channel,
    SingleVideo,
    VideoFile,
    Exit,
}

pub fn display_menu() {
    println!();
    println!("{}", style("=== YouTube Transcript Downloader ===").bold());
    println!("1. Download ALL transcripts from a YouTube channel");
    println!("2. Download transcript from a specific video");
    println!("3. Download transcripts from multiple videos (using a file)");
    println!("4. Exit");
    println!("{}", style("=====================================").bold());
}

pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim().parse::<u32>() {
        Ok(1) => Some(MenuChoice::Channel),
        Ok(2) => Some(MenuChoice::SingleVideo),
        Ok(3) => Some(MenuChoice::VideoFile),
        Ok(4) => Some(MenuChoice::Exit),
        _ => None,
    }
}

pub fn parse_format_choice(input: &str) -> Option<OutputFormat> {
    match input.trim().parse::<u32>() {
        Ok(1) => Some(OutputFormat::Json),
        Ok(2) => Some(OutputFormat::Txt),
        Ok(3) => Some(OutputFormat::Srt),
        _ => None,
    }
}

/// Prompt until the user enters a valid 1-4 menu choice.
pub fn read_menu_choice() -> Result<MenuChoice> {
    loop {
        let line = prompt_line("\nEnter your choice (1-4): ")?;
        match parse_menu_choice(&line) {
            Some(choice) => return Ok(choice),
            None => println!("Please enter a number between 1 and 4."),
        }
    }
}

/// Show the format menu and prompt until a valid 1-3 entry arrives.
///
/// Invalid numeric or non-numeric entries re-prompt without limit.
pub fn read_output_format() -> Result<OutputFormat> {
    println!("\nSelect output format:");
    println!("1. JSON");
    println!("2. TXT");
    println!("3. SRT");
    loop {
        let line = prompt_line("Enter your choice (1-3): ")?;
        match parse_format_choice(&line) {
            Some(format) => return Ok(format),
            None => println!("Please enter a number between 1 and 3."),
        }
    }
}

/// Print a prompt and read one line from stdin.
pub fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        anyhow::bail!("input stream closed");
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!(parse_menu_choice("1"), Some(MenuChoice::Channel));
        assert_eq!(parse_menu_choice(" 4 "), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("5"), None);
        assert_eq!(parse_menu_choice("0"), None);
        assert_eq!(parse_menu_choice("abc"), None);
        assert_eq!(parse_menu_choice(""), None);
    }

    #[test]
    fn test_parse_format_choice() {
        assert_eq!(parse_format_choice("1"), Some(OutputFormat::Json));
        assert_eq!(parse_format_choice("2"), Some(OutputFormat::Txt));
        assert_eq!(parse_format_choice("3"), Some(OutputFormat::Srt));
        assert_eq!(parse_format_choice("4"), None);
        assert_eq!(parse_format_choice("srt"), None);
    }

    #[test]
    fn test_format_extension_matches_display() {
        for format in [OutputFormat::Json, OutputFormat::Txt, OutputFormat::Srt] {
            assert_eq!(format.extension(), format.to_string());
        }
    }
}
