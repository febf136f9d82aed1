// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;

use super::{SuggestionSource, DEBOUNCE_INTERVAL};

/// What the suggestion popup should show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SuggestionState {
    #[default]
    Hidden,
    Loading { keyword: String },
    Ready { keyword: String, suggestions: Vec<String> },
}

impl SuggestionState {
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::Ready { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Debounces keyword requests onto a tokio runtime.
///
/// Every [`Self::request`] takes a new sequence number. A request only fires if no newer one was
/// issued during the quiet interval, and its response is only published if it is still the
/// latest when it arrives. Failures hide the popup.
pub struct SuggestionDebouncer {
    source: Arc<dyn SuggestionSource>,
    handle: Handle,
    latest: Arc<AtomicU64>,
    delay: Duration,
    state: Arc<watch::Sender<SuggestionState>>,
}

impl std::fmt::Debug for SuggestionDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionDebouncer")
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl SuggestionDebouncer {
    pub fn new(source: Arc<dyn SuggestionSource>, handle: Handle) -> Self {
        let (state, _) = watch::channel(SuggestionState::Hidden);
        Self {
            source,
            handle,
            latest: Arc::new(AtomicU64::new(0)),
            delay: DEBOUNCE_INTERVAL,
            state: Arc::new(state),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SuggestionState {
        self.state.borrow().clone()
    }

    /// Schedules a lookup for `keyword` and returns its sequence number. A blank keyword hides
    /// the popup right away.
    pub fn request(&self, keyword: &str) -> u64 {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let keyword = keyword.trim().to_owned();
        if keyword.is_empty() {
            self.state.send_replace(SuggestionState::Hidden);
            return seq;
        }

        let source = Arc::clone(&self.source);
        let latest = Arc::clone(&self.latest);
        let state = Arc::clone(&self.state);
        let delay = self.delay;
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != seq {
                return;
            }

            state.send_replace(SuggestionState::Loading { keyword: keyword.clone() });
            let result = source.suggest(&keyword).await;
            if latest.load(Ordering::SeqCst) != seq {
                log::debug!("discarding stale suggestions for {keyword:?} (seq {seq})");
                return;
            }

            let next = match result {
                Ok(suggestions) if !suggestions.is_empty() => {
                    SuggestionState::Ready { keyword, suggestions }
                }
                Ok(_) => SuggestionState::Hidden,
                Err(err) => {
                    log::warn!("suggestions for {keyword:?} unavailable: {err}");
                    SuggestionState::Hidden
                }
            };
            state.send_replace(next);
        });
        seq
    }

    /// Hides the popup and invalidates anything in flight.
    pub fn hide(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(SuggestionState::Hidden);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::runtime::Handle;

    use super::{SuggestionDebouncer, SuggestionState};
    use crate::suggest::testing::FakeSource;

    fn debouncer(source: &Arc<FakeSource>) -> SuggestionDebouncer {
        SuggestionDebouncer::new(source.clone(), Handle::current())
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_collapse_into_one_request() {
        let source = Arc::new(FakeSource::default());
        let debouncer = debouncer(&source);
        let mut rx = debouncer.subscribe();

        for keyword in ["f", "fo", "for", "fore"] {
            debouncer.request(keyword);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        let ready = rx
            .wait_for(|state| matches!(state, SuggestionState::Ready { .. }))
            .await
            .map(|state| state.clone())
            .unwrap();

        assert_eq!(source.calls(), ["fore"]);
        assert_eq!(ready.suggestions(), ["fore 1", "fore 2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_is_discarded() {
        let source = Arc::new(FakeSource {
            delays: BTreeMap::from([("slow".to_owned(), Duration::from_secs(2))]),
            ..FakeSource::default()
        });
        let debouncer = debouncer(&source);
        let mut rx = debouncer.subscribe();

        debouncer.request("slow");
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(debouncer.state(), SuggestionState::Loading { keyword: "slow".to_owned() });

        debouncer.request("fast");
        rx.wait_for(|state| matches!(state, SuggestionState::Ready { .. })).await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(source.calls(), ["slow", "fast"]);
        let SuggestionState::Ready { keyword, .. } = debouncer.state() else {
            panic!("expected ready state");
        };
        assert_eq!(keyword, "fast");
    }

    #[tokio::test(start_paused = true)]
    async fn failure_hides_the_popup() {
        let source = Arc::new(FakeSource {
            failing: vec!["boom".to_owned()],
            ..FakeSource::default()
        });
        let debouncer = debouncer(&source);

        debouncer.request("boom");
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(debouncer.state(), SuggestionState::Hidden);
        assert_eq!(source.calls(), ["boom"]);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_keyword_and_hide_cancel_pending_requests() {
        let source = Arc::new(FakeSource::default());
        let debouncer = debouncer(&source);

        debouncer.request("lake");
        debouncer.request("   ");
        assert_eq!(debouncer.state(), SuggestionState::Hidden);

        debouncer.request("river");
        debouncer.hide();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(source.calls().is_empty());
        assert!(!debouncer.state().is_visible());
    }
}
