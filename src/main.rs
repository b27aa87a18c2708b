use clap::Parser;
use score_scout::config::{FeedSourceConfig, HtmlSourceConfig, ScoreboardConfig, SourceConfig};
use score_scout::session::{self, Session, TapHandle};
use score_scout::{Orchestrator, Scoreboard, SourceType};
use std::io::BufRead;

mod args;
use args::{Args, SourceArg, taps_from_line};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let orchestrator = match build_orchestrator(&args) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            ::log::error!("Failed to set up: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.interactive {
        run_interactive(&orchestrator).await;
    } else {
        run_once(&orchestrator).await;
    }

    orchestrator.shutdown().await;
}

fn build_orchestrator(args: &Args) -> Result<Orchestrator, Box<dyn std::error::Error>> {
    let mut board = match (&args.config, args.source, &args.url) {
        // Nothing else says which source to use, so the URL decides
        (None, None, Some(url)) => Scoreboard::new(SourceType::from_url(url)),
        _ => Scoreboard::from_config(load_config(args)?),
    };
    if let Some(url) = &args.url {
        board = board.with_source_url(url);
    }
    if let Some(fetcher) = args.fetcher {
        board = board.with_backend(fetcher.into());
    }
    if let Some(timeout) = args.timeout {
        board = board.with_timeout(timeout);
    }

    board.build()
}

fn load_config(args: &Args) -> Result<ScoreboardConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ScoreboardConfig::from_file(path)?,
        None => ScoreboardConfig::default(),
    };

    // An explicit --source different from the file's source replaces it
    config.source = match (args.source, config.source) {
        (Some(SourceArg::Html), SourceConfig::Feed(_)) => {
            SourceConfig::Html(HtmlSourceConfig::default())
        }
        (Some(SourceArg::Feed), SourceConfig::Html(_)) => {
            SourceConfig::Feed(FeedSourceConfig::default())
        }
        (_, source) => source,
    };

    Ok(config)
}

async fn run_once(orchestrator: &Orchestrator) {
    let start_time = std::time::Instant::now();
    let matches = orchestrator.refresh().await;

    if matches.is_empty() {
        println!("No matches available");
    }
    for (i, m) in matches.iter().enumerate() {
        println!("{}. {}", i + 1, m.title);
        if m.has_url() {
            println!("   {}", m.score.as_deref().unwrap_or_default());
        }
    }

    ::log::info!(
        "Refreshed {} matches in {:.2} seconds",
        matches.len(),
        start_time.elapsed().as_secs_f64()
    );
}

async fn run_interactive(orchestrator: &Orchestrator) {
    let matches = orchestrator.live_matches().await;
    for (i, m) in matches.iter().enumerate() {
        println!("{}. {}", i + 1, m.title);
    }
    println!("Enter = show next score, q = quit");

    let mut session = Session::new(matches);
    let (handle, mut listener) = session::tap_channel();

    forward_stdin(handle.clone());
    let ctrl_c_handle = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_handle.stop();
        }
    });
    drop(handle);

    let end = session::run(orchestrator, &mut session, &mut listener, |line| {
        println!("{}", line)
    })
    .await;
    ::log::info!("Session ended: {:?}", end);
}

/// Turns stdin lines into taps; end of input finishes the session after queued taps.
///
/// A blocking stdin read cannot be cancelled, so it runs on a detached thread
/// that the runtime never waits for.
fn forward_stdin(handle: TapHandle) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => match taps_from_line(&line) {
                    Some(count) => {
                        if !handle.blocking_tap(count) {
                            return;
                        }
                    }
                    None => ::log::warn!("Ignoring input: {}", line),
                },
                Err(e) => {
                    ::log::error!("Failed to read stdin: {}", e);
                    handle.stop();
                    return;
                }
            }
        }
        handle.blocking_tap(2);
    });
}
