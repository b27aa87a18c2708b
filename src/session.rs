//! Interactive session: which match is selected, and the tap signal that
//! decides when its score is fetched.

use crate::orchestrator::Orchestrator;
use crate::results::MatchSummary;
use tokio::sync::{mpsc, watch};

/// Result of waiting for user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The user tapped this many times
    Taps(u32),
    /// The session was asked to stop while waiting
    Stopped,
}

/// Producer side of the tap signal, held by whatever reads user input
#[derive(Debug, Clone)]
pub struct TapHandle {
    taps: mpsc::Sender<u32>,
    stop: watch::Sender<bool>,
}

impl TapHandle {
    /// Report a tap gesture. Returns false once the listener is gone.
    pub async fn tap(&self, count: u32) -> bool {
        self.taps.send(count).await.is_ok()
    }

    /// Report a tap from a thread outside the runtime, such as a blocking stdin reader.
    ///
    /// Must not be called from async code.
    pub fn blocking_tap(&self, count: u32) -> bool {
        self.taps.blocking_send(count).is_ok()
    }

    /// Abort any pending and future waits
    pub fn stop(&self) {
        // Only fails when the listener is gone, which is already stopped.
        let _ = self.stop.send(true);
    }
}

/// Consumer side of the tap signal
#[derive(Debug)]
pub struct TapListener {
    taps: mpsc::Receiver<u32>,
    stop: watch::Receiver<bool>,
}

impl TapListener {
    /// Blocks until a tap gesture arrives or the session is stopped.
    ///
    /// A stop request takes precedence over queued taps. Once every handle is
    /// dropped the queued taps are still delivered, then the wait reports a stop.
    pub async fn wait_for_taps(&mut self) -> WaitOutcome {
        if *self.stop.borrow() {
            return WaitOutcome::Stopped;
        }

        tokio::select! {
            biased;
            Ok(_) = self.stop.wait_for(|stopped| *stopped) => WaitOutcome::Stopped,
            tap = self.taps.recv() => match tap {
                Some(count) => WaitOutcome::Taps(count),
                None => WaitOutcome::Stopped,
            },
        }
    }
}

/// Creates a connected tap handle and listener
pub fn tap_channel() -> (TapHandle, TapListener) {
    let (taps_tx, taps_rx) = mpsc::channel(16);
    let (stop_tx, stop_rx) = watch::channel(false);
    (
        TapHandle {
            taps: taps_tx,
            stop: stop_tx,
        },
        TapListener {
            taps: taps_rx,
            stop: stop_rx,
        },
    )
}

/// The discovered matches and the one currently selected
#[derive(Debug, Clone, Default)]
pub struct Session {
    matches: Vec<MatchSummary>,
    selected_index: usize,
}

impl Session {
    pub fn new(matches: Vec<MatchSummary>) -> Self {
        Self {
            matches,
            selected_index: 0,
        }
    }

    pub fn matches(&self) -> &[MatchSummary] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// The selected match, if there are any
    pub fn selected(&self) -> Option<&MatchSummary> {
        self.matches.get(self.selected_index)
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.selected().map(|m| m.title.as_str())
    }

    /// Selects the match at `index`; out-of-range indexes are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.matches.len() {
            self.selected_index = index;
            true
        } else {
            false
        }
    }

    /// Moves the selection forward, wrapping at the end
    pub fn select_next(&mut self) {
        if !self.matches.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.matches.len();
        }
    }

    /// Stores a fetched score on the selected match
    fn record_score(&mut self, scored: MatchSummary) {
        if let Some(slot) = self.matches.get_mut(self.selected_index) {
            *slot = scored;
        }
    }
}

/// How a session loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user asked to finish (two or more taps)
    Finished,
    /// The stop signal fired while waiting
    Stopped,
}

/// Runs the tap-driven loop.
///
/// One tap fetches the score of the selected match, hands "title: score" to
/// `show` and advances the selection. Two or more taps finish the session.
pub async fn run<F>(
    orchestrator: &Orchestrator,
    session: &mut Session,
    listener: &mut TapListener,
    mut show: F,
) -> SessionEnd
where
    F: FnMut(&str),
{
    loop {
        match listener.wait_for_taps().await {
            WaitOutcome::Stopped => {
                ::log::info!("Session stopped while waiting for taps");
                return SessionEnd::Stopped;
            }
            WaitOutcome::Taps(0) => continue,
            WaitOutcome::Taps(1) => {
                let Some(selected) = session.selected().cloned() else {
                    show("No matches available");
                    continue;
                };

                ::log::debug!(
                    "Fetching score for match {}: {}",
                    session.selected_index(),
                    selected.title
                );
                let scored = orchestrator.score_match(&selected).await;
                let line = format!(
                    "{}: {}",
                    scored.title,
                    scored.score.as_deref().unwrap_or_default()
                );
                show(&line);
                session.record_score(scored);
                session.select_next();
            }
            WaitOutcome::Taps(n) => {
                ::log::info!("Received {} taps, finishing session", n);
                return SessionEnd::Finished;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, Fetcher};
    use crate::results::SCORE_NOT_AVAILABLE;
    use crate::sources::MatchSource;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct PanelFetcher;

    #[async_trait]
    impl Fetcher for PanelFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            if url.ends_with("/a") {
                Ok("<div class='ds-text-compact-m ds-text-typo-title ds-text-right ds-whitespace-nowrap'>AUS 99/1</div>".to_string())
            } else {
                Err(FetchError::Status(500))
            }
        }
    }

    struct NoSource;

    #[async_trait]
    impl MatchSource for NoSource {
        fn name(&self) -> &'static str {
            "none"
        }

        async fn discover(&self) -> Vec<MatchSummary> {
            Vec::new()
        }
    }

    fn matches() -> Vec<MatchSummary> {
        vec![
            MatchSummary::new(
                "Australia vs England".to_string(),
                "https://www.espncricinfo.com/live-cricket-scores/s/a".to_string(),
            ),
            MatchSummary::new(
                "India vs Pakistan".to_string(),
                "https://www.espncricinfo.com/live-cricket-scores/s/b".to_string(),
            ),
        ]
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(Box::new(NoSource), Arc::new(PanelFetcher))
    }

    #[tokio::test]
    async fn test_wait_returns_tap_count() {
        let (handle, mut listener) = tap_channel();
        assert!(handle.tap(2).await);
        assert_eq!(listener.wait_for_taps().await, WaitOutcome::Taps(2));
    }

    #[tokio::test]
    async fn test_stop_interrupts_waiting() {
        let (handle, mut listener) = tap_channel();
        let waiter = tokio::spawn(async move { listener.wait_for_taps().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.stop();

        let outcome = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("wait should end after stop")
            .unwrap();
        assert_eq!(outcome, WaitOutcome::Stopped);
    }

    #[tokio::test]
    async fn test_stop_takes_precedence_over_queued_taps() {
        let (handle, mut listener) = tap_channel();
        handle.tap(1).await;
        handle.stop();
        assert_eq!(listener.wait_for_taps().await, WaitOutcome::Stopped);
    }

    #[tokio::test]
    async fn test_dropped_handle_stops() {
        let (handle, mut listener) = tap_channel();
        drop(handle);
        assert_eq!(listener.wait_for_taps().await, WaitOutcome::Stopped);
    }

    #[tokio::test]
    async fn test_taps_from_a_plain_thread() {
        let (handle, mut listener) = tap_channel();
        let stopper = handle.clone();

        std::thread::spawn(move || {
            assert!(handle.blocking_tap(1));
            assert!(handle.blocking_tap(2));
        })
        .join()
        .unwrap();

        assert_eq!(listener.wait_for_taps().await, WaitOutcome::Taps(1));
        assert_eq!(listener.wait_for_taps().await, WaitOutcome::Taps(2));

        stopper.stop();
        assert_eq!(listener.wait_for_taps().await, WaitOutcome::Stopped);
    }

    #[tokio::test]
    async fn test_queued_taps_survive_dropped_handle() {
        let (handle, mut listener) = tap_channel();
        handle.tap(2).await;
        drop(handle);

        assert_eq!(listener.wait_for_taps().await, WaitOutcome::Taps(2));
        assert_eq!(listener.wait_for_taps().await, WaitOutcome::Stopped);
    }

    #[test]
    fn test_selection() {
        let mut session = Session::new(matches());
        assert_eq!(session.selected_title(), Some("Australia vs England"));

        assert!(session.select(1));
        assert_eq!(session.selected_title(), Some("India vs Pakistan"));
        assert!(!session.select(5));
        assert_eq!(session.selected_index(), 1);

        session.select_next();
        assert_eq!(session.selected_index(), 0);

        let mut empty = Session::default();
        empty.select_next();
        assert!(empty.selected().is_none());
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_run_shows_scores_then_finishes() {
        let orchestrator = orchestrator();
        let mut session = Session::new(matches());
        let (handle, mut listener) = tap_channel();

        handle.tap(1).await;
        handle.tap(1).await;
        handle.tap(2).await;

        let mut shown = Vec::new();
        let end = run(&orchestrator, &mut session, &mut listener, |line| {
            shown.push(line.to_string())
        })
        .await;

        assert_eq!(end, SessionEnd::Finished);
        assert_eq!(
            shown,
            vec![
                "Australia vs England: AUS 99/1".to_string(),
                format!("India vs Pakistan: {}", SCORE_NOT_AVAILABLE),
            ]
        );
        assert_eq!(session.matches()[0].score.as_deref(), Some("AUS 99/1"));
        assert_eq!(session.selected_index(), 0);
    }

    #[tokio::test]
    async fn test_run_stops_cleanly() {
        let orchestrator = orchestrator();
        let mut session = Session::new(matches());
        let (handle, mut listener) = tap_channel();
        handle.stop();

        let mut shown = Vec::new();
        let end = run(&orchestrator, &mut session, &mut listener, |line| {
            shown.push(line.to_string())
        })
        .await;

        assert_eq!(end, SessionEnd::Stopped);
        assert!(shown.is_empty());
    }

    #[tokio::test]
    async fn test_run_without_matches() {
        let orchestrator = orchestrator();
        let mut session = Session::default();
        let (handle, mut listener) = tap_channel();
        handle.tap(1).await;
        handle.tap(3).await;

        let mut shown = Vec::new();
        let end = run(&orchestrator, &mut session, &mut listener, |line| {
            shown.push(line.to_string())
        })
        .await;

        assert_eq!(end, SessionEnd::Finished);
        assert_eq!(shown, vec!["No matches available".to_string()]);
    }
}
