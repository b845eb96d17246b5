//! Lookup coordination
//!
//! Owns the current lookup cycle for one search box. Every new input cancels
//! the cycle in flight before issuing its own requests, and a cycle commits
//! suggestions only while it is still the current one, so the committed list
//! always belongs to the most recent input even when responses arrive out of
//! order.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::try_join;
use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::merge::rank_suggestions;
use super::segment::{SegmentedInput, segment};
use crate::backend::LookupBackend;
use crate::config::{CompletionScope, Config};
use crate::config::types::DEFAULT_RESULTS_LIMIT;
use crate::error::SuggestError;

/// Per-coordinator lookup settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSettings {
    /// UI language passed to the backend
    pub language: String,
    /// Maximum number of suggestions committed per cycle
    pub results_limit: usize,
    pub completion: CompletionScope,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            results_limit: DEFAULT_RESULTS_LIMIT,
            completion: CompletionScope::Word,
        }
    }
}

impl LookupSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            language: config.backend.language.clone(),
            results_limit: config.lookup.results_limit,
            completion: config.lookup.completion,
        }
    }
}

/// How a lookup cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The cycle committed this suggestion list
    Updated(Vec<String>),
    /// A newer input (or a clear) replaced the cycle; nothing was committed
    Superseded,
}

/// The cycle currently allowed to commit
#[derive(Debug)]
struct LookupCycle {
    id: u64,
    token: CancellationToken,
}

#[derive(Debug, Default)]
struct CycleSlot {
    last_id: u64,
    current: Option<LookupCycle>,
}

/// A started cycle, owned by the future that drives it
struct PendingCycle<'a> {
    id: u64,
    token: CancellationToken,
    input: SegmentedInput,
    guard: CycleGuard<'a>,
}

/// Retires a cycle whose future is dropped before it commits or fails
///
/// Dropping cancels the cycle's token, which stops its requests, and clears
/// the slot if the cycle is still current.
struct CycleGuard<'a> {
    slot: &'a Mutex<CycleSlot>,
    id: u64,
    cancel_on_drop: Option<DropGuard>,
}

impl CycleGuard<'_> {
    fn disarm(&mut self) {
        if let Some(guard) = self.cancel_on_drop.take() {
            guard.disarm();
        }
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if self.cancel_on_drop.is_none() {
            return;
        }

        let mut slot = lock_slot(self.slot);
        if slot
            .current
            .as_ref()
            .is_some_and(|current| current.id == self.id)
        {
            slot.current = None;
            log::debug!("Dropped lookup cycle {}", self.id);
        }
        // `cancel_on_drop` cancels the token once this returns
    }
}

/// Coordinates lookups and ranking for one search box
pub struct LookupCoordinator<B> {
    backend: B,
    settings: LookupSettings,
    slot: Mutex<CycleSlot>,
    results: watch::Sender<Vec<String>>,
}

impl<B: LookupBackend> LookupCoordinator<B> {
    pub fn new(backend: B, settings: LookupSettings) -> Self {
        let (results, _) = watch::channel(Vec::new());
        Self {
            backend,
            settings,
            slot: Mutex::new(CycleSlot::default()),
            results,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &LookupSettings {
        &self.settings
    }

    /// Watch the committed suggestion list
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.results.subscribe()
    }

    /// Snapshot of the committed suggestion list
    pub fn lookup_results(&self) -> Vec<String> {
        self.results.borrow().clone()
    }

    /// Whether a cycle is in flight. Dropping a lookup's future retires its
    /// cycle.
    pub fn is_pending(&self) -> bool {
        self.lock_slot().current.is_some()
    }

    /// Reset the suggestions to empty and cancel any cycle in flight
    pub fn clear_lookup_results(&self) {
        let mut slot = self.lock_slot();
        cancel_current(&mut slot);
        self.results.send_replace(Vec::new());
    }

    /// Look up suggestions for `input`
    ///
    /// The previous cycle is cancelled and the new one installed before this
    /// returns; the returned future only performs the requests and the
    /// commit. Empty input commits an empty list without issuing requests.
    ///
    /// Resolves to `Superseded` if another call (or a clear) replaced this
    /// cycle before it could commit, whatever its requests returned. A
    /// transport failure of a current cycle is returned as an error and
    /// leaves the committed list untouched.
    pub fn get_lookup_results<'a>(
        &'a self,
        input: &str,
    ) -> impl Future<Output = Result<LookupOutcome, SuggestError>> + use<'a, B> {
        let started = self.start_cycle(input);

        async move {
            let Some(mut cycle) = started else {
                return Ok(LookupOutcome::Updated(Vec::new()));
            };

            let fetched = tokio::select! {
                biased;

                _ = cycle.token.cancelled() => None,
                fetched = self.fetch_candidates(&cycle) => Some(fetched),
            };

            let Some(fetched) = fetched else {
                log::debug!("Discarded superseded lookup cycle {}", cycle.id);
                return Ok(LookupOutcome::Superseded);
            };

            match fetched {
                Ok(candidates) => {
                    let suggestions = rank_suggestions(
                        &candidates,
                        cycle.input.pattern(),
                        self.settings.completion,
                        self.settings.results_limit,
                    );
                    if self.commit(&mut cycle, suggestions.clone()) {
                        Ok(LookupOutcome::Updated(suggestions))
                    } else {
                        log::debug!("Discarded superseded lookup cycle {}", cycle.id);
                        Ok(LookupOutcome::Superseded)
                    }
                }
                Err(e) => {
                    if self.finish(&mut cycle) {
                        log::warn!("Lookup cycle {} failed: {}", cycle.id, e);
                        Err(e)
                    } else {
                        log::debug!("Ignoring failure of superseded cycle {}: {}", cycle.id, e);
                        Ok(LookupOutcome::Superseded)
                    }
                }
            }
        }
    }

    /// Cancel the current cycle and install a new one for `input`
    fn start_cycle(&self, input: &str) -> Option<PendingCycle<'_>> {
        let mut slot = self.lock_slot();
        cancel_current(&mut slot);

        let Some(input) = segment(input) else {
            self.results.send_replace(Vec::new());
            return None;
        };

        slot.last_id = slot.last_id.wrapping_add(1);
        let id = slot.last_id;
        let token = CancellationToken::new();
        slot.current = Some(LookupCycle {
            id,
            token: token.clone(),
        });

        log::debug!(
            "Started lookup cycle {} for {:?} ({} word(s))",
            id,
            input.full_phrase(),
            input.word_count()
        );

        let guard = CycleGuard {
            slot: &self.slot,
            id,
            cancel_on_drop: Some(token.clone().drop_guard()),
        };

        Some(PendingCycle {
            id,
            token,
            input,
            guard,
        })
    }

    /// Run the cycle's requests concurrently and concatenate their matches,
    /// full-phrase matches first
    async fn fetch_candidates(&self, cycle: &PendingCycle<'_>) -> Result<Vec<String>, SuggestError> {
        let input = &cycle.input;
        let language = self.settings.language.as_str();

        let phrase_token = cycle.token.child_token();
        let phrase_request = async {
            let response = self
                .backend
                .lookup(input.full_phrase(), language, &phrase_token)
                .await?;
            Ok::<_, SuggestError>(
                response
                    .match_texts()
                    .map(str::to_string)
                    .collect::<Vec<_>>(),
            )
        };

        let last_word = input
            .last_word()
            .filter(|word| *word != input.full_phrase());

        let Some(last_word) = last_word else {
            return phrase_request.await;
        };

        let word_token = cycle.token.child_token();
        let word_request = async {
            let response = self.backend.lookup(last_word, language, &word_token).await?;
            // Place each last-word match back into the typed phrase
            Ok::<_, SuggestError>(
                response
                    .match_texts()
                    .map(|text| input.substitute_last_word(text))
                    .collect::<Vec<_>>(),
            )
        };

        let (mut candidates, word_candidates) = try_join(phrase_request, word_request).await?;
        candidates.extend(word_candidates);
        Ok(candidates)
    }

    /// Publish suggestions if `cycle` is still current
    fn commit(&self, cycle: &mut PendingCycle<'_>, suggestions: Vec<String>) -> bool {
        let mut slot = self.lock_slot();
        if !is_current(&slot, cycle) {
            return false;
        }

        slot.current = None;
        cycle.guard.disarm();
        log::debug!(
            "Lookup cycle {} committed {} suggestion(s)",
            cycle.id,
            suggestions.len()
        );
        self.results.send_replace(suggestions);
        true
    }

    /// Retire `cycle` without committing; false if it was already superseded
    fn finish(&self, cycle: &mut PendingCycle<'_>) -> bool {
        let mut slot = self.lock_slot();
        if !is_current(&slot, cycle) {
            return false;
        }

        slot.current = None;
        cycle.guard.disarm();
        true
    }

    fn lock_slot(&self) -> MutexGuard<'_, CycleSlot> {
        lock_slot(&self.slot)
    }
}

fn lock_slot(slot: &Mutex<CycleSlot>) -> MutexGuard<'_, CycleSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn is_current(slot: &CycleSlot, cycle: &PendingCycle<'_>) -> bool {
    !cycle.token.is_cancelled()
        && slot
            .current
            .as_ref()
            .is_some_and(|current| current.id == cycle.id)
}

fn cancel_current(slot: &mut CycleSlot) {
    if let Some(previous) = slot.current.take() {
        previous.token.cancel();
        log::debug!("Cancelled lookup cycle {}", previous.id);
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod coordinator_tests;
