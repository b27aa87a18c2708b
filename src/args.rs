use clap::{Parser, ValueEnum};
use score_scout::config::FetchBackend;

#[derive(Parser, Debug)]
#[command(name = "score-scout")]
#[command(about = "Finds live cricket matches and extracts their scores")]
#[command(version)]
pub struct Args {
    /// Where to discover matches (default: the config file's source, else html)
    #[arg(short, long, value_enum)]
    pub source: Option<SourceArg>,

    /// Override the listing page or feed URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// JSON configuration file (flags override its values)
    #[arg(short, long)]
    pub config: Option<String>,

    /// How pages are fetched
    #[arg(short, long, value_enum)]
    pub fetcher: Option<FetcherArg>,

    /// Read timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Wait for taps on stdin before fetching each score
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Html,
    Feed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FetcherArg {
    Http,
    Webdriver,
}

impl From<FetcherArg> for FetchBackend {
    fn from(arg: FetcherArg) -> Self {
        match arg {
            FetcherArg::Http => FetchBackend::Http,
            FetcherArg::Webdriver => FetchBackend::WebDriver,
        }
    }
}

/// Maps a line typed on stdin to a tap count
pub fn taps_from_line(line: &str) -> Option<u32> {
    match line.trim() {
        "" | "1" => Some(1),
        "q" | "quit" => Some(2),
        other => other.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taps_from_line() {
        assert_eq!(taps_from_line(""), Some(1));
        assert_eq!(taps_from_line(" 1 "), Some(1));
        assert_eq!(taps_from_line("2"), Some(2));
        assert_eq!(taps_from_line("q"), Some(2));
        assert_eq!(taps_from_line("what"), None);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["score-scout", "--source", "feed", "-f", "webdriver", "-i"]);
        assert_eq!(args.source, Some(SourceArg::Feed));
        assert_eq!(args.fetcher, Some(FetcherArg::Webdriver));
        assert!(args.interactive);
        assert!(args.url.is_none());
        assert_eq!(FetchBackend::from(FetcherArg::Webdriver), FetchBackend::WebDriver);
    }
}
