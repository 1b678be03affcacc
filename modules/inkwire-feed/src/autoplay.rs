//! Visibility-weighted selection of feed items eligible for inline
//! video autoplay.
//!
//! The viewport observer reports id → visible-fraction updates; bursts
//! are coalesced by a debounce window, then the selector picks the most
//! visible eligible items up to a concurrency cap. Demotion uses a
//! lower threshold than promotion (hysteresis) so items straddling a
//! scroll boundary don't flicker on and off.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::debounce::Debouncer;

#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    /// Minimum visible fraction for an item to be promoted.
    pub play_threshold: f32,
    /// An active item stays active until it drops below this.
    pub stop_threshold: f32,
    /// Maximum simultaneously active items.
    pub max_active: usize,
    /// Quiet window for coalescing visibility bursts.
    pub debounce: Duration,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            play_threshold: 0.60,
            stop_threshold: 0.18,
            max_active: 1,
            debounce: Duration::from_millis(200),
        }
    }
}

/// Change to the active set. The playback collaborator acquires
/// resources for `activated` and releases them for `deactivated`;
/// the selector itself holds only identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDiff {
    pub activated: Vec<i64>,
    pub deactivated: Vec<i64>,
}

impl SelectionDiff {
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }
}

pub struct AutoplaySelector {
    play_threshold: f32,
    stop_threshold: f32,
    max_active: usize,
    visibility: HashMap<i64, f32>,
    eligible: HashSet<i64>,
    active: Vec<i64>,
}

impl AutoplaySelector {
    pub fn new(config: &AutoplayConfig) -> Self {
        Self {
            play_threshold: config.play_threshold,
            stop_threshold: config.stop_threshold,
            max_active: config.max_active,
            visibility: HashMap::new(),
            eligible: HashSet::new(),
            active: Vec::new(),
        }
    }

    /// Replace the set of autoplay-capable items (video-bearing posts
    /// currently mounted in the feed).
    pub fn set_eligible(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.eligible = ids.into_iter().collect();
    }

    /// Record a visibility report. A fraction of zero removes the entry.
    pub fn update(&mut self, id: i64, fraction: f32) {
        if fraction <= 0.0 {
            self.visibility.remove(&id);
        } else {
            self.visibility.insert(id, fraction);
        }
    }

    pub fn active(&self) -> &[i64] {
        &self.active
    }

    /// Recompute the active set and return what changed.
    pub fn recompute(&mut self) -> SelectionDiff {
        // Active items above the stop threshold may not be demoted,
        // even in favor of a more visible candidate at the cap.
        let retained: Vec<i64> = self
            .active
            .iter()
            .copied()
            .filter(|id| self.eligible.contains(id))
            .filter(|id| self.fraction(*id) >= self.stop_threshold)
            .collect();

        let mut candidates: Vec<(i64, f32)> = self
            .visibility
            .iter()
            .map(|(id, fraction)| (*id, *fraction))
            .filter(|(id, fraction)| {
                self.eligible.contains(id)
                    && *fraction >= self.play_threshold
                    && !retained.contains(id)
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let mut next = retained;
        for (id, _) in candidates {
            if next.len() >= self.max_active {
                break;
            }
            next.push(id);
        }

        let activated: Vec<i64> = next
            .iter()
            .copied()
            .filter(|id| !self.active.contains(id))
            .collect();
        let deactivated: Vec<i64> = self
            .active
            .iter()
            .copied()
            .filter(|id| !next.contains(id))
            .collect();
        self.active = next;
        SelectionDiff {
            activated,
            deactivated,
        }
    }

    fn fraction(&self, id: i64) -> f32 {
        self.visibility.get(&id).copied().unwrap_or(0.0)
    }
}

/// Debounced wrapper around the selector. Visibility reports re-arm
/// the quiet window; once it elapses, one recomputation runs and any
/// change is emitted on the channel.
pub struct AutoplayController {
    selector: Arc<Mutex<AutoplaySelector>>,
    debouncer: Debouncer,
    tx: mpsc::UnboundedSender<SelectionDiff>,
}

impl AutoplayController {
    pub fn new(config: AutoplayConfig) -> (Self, mpsc::UnboundedReceiver<SelectionDiff>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            selector: Arc::new(Mutex::new(AutoplaySelector::new(&config))),
            debouncer: Debouncer::new(config.debounce),
            tx,
        };
        (controller, rx)
    }

    pub fn set_eligible(&self, ids: impl IntoIterator<Item = i64>) {
        self.lock().set_eligible(ids);
    }

    pub fn report(&self, id: i64, fraction: f32) {
        self.lock().update(id, fraction);
        let selector = Arc::clone(&self.selector);
        let tx = self.tx.clone();
        self.debouncer.call(move || async move {
            let diff = selector
                .lock()
                .expect("autoplay selector lock poisoned")
                .recompute();
            if diff.is_empty() {
                return;
            }
            debug!(?diff, "active set changed");
            let _ = tx.send(diff);
        });
    }

    pub fn active(&self) -> Vec<i64> {
        self.lock().active().to_vec()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AutoplaySelector> {
        self.selector.lock().expect("autoplay selector lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(max_active: usize) -> AutoplaySelector {
        AutoplaySelector::new(&AutoplayConfig {
            max_active,
            ..AutoplayConfig::default()
        })
    }

    #[test]
    fn hysteresis_band_prevents_flicker() {
        let mut s = selector(1);
        s.set_eligible([1]);

        s.update(1, 0.65);
        let diff = s.recompute();
        assert_eq!(diff.activated, vec![1]);

        // Below play, above stop: stays active.
        s.update(1, 0.30);
        let diff = s.recompute();
        assert!(diff.is_empty());
        assert_eq!(s.active(), &[1]);

        // Below stop: deactivated.
        s.update(1, 0.15);
        let diff = s.recompute();
        assert_eq!(diff.deactivated, vec![1]);
        assert!(s.active().is_empty());
    }

    #[test]
    fn most_visible_wins_under_cap() {
        let mut s = selector(1);
        s.set_eligible([1, 2, 3]);
        s.update(1, 0.70);
        s.update(2, 0.95);
        s.update(3, 0.61);
        let diff = s.recompute();
        assert_eq!(diff.activated, vec![2]);
    }

    #[test]
    fn cap_allows_multiple_when_raised() {
        let mut s = selector(2);
        s.set_eligible([1, 2, 3]);
        s.update(1, 0.70);
        s.update(2, 0.95);
        s.update(3, 0.61);
        s.recompute();
        assert_eq!(s.active(), &[2, 1]);
    }

    #[test]
    fn retained_item_keeps_its_slot() {
        let mut s = selector(1);
        s.set_eligible([1, 2]);
        s.update(1, 0.80);
        s.recompute();

        // 1 fades but stays above stop; 2 is now more visible. The cap
        // is full with the retained item, so 2 is not promoted.
        s.update(1, 0.30);
        s.update(2, 0.90);
        let diff = s.recompute();
        assert!(diff.is_empty());
        assert_eq!(s.active(), &[1]);

        // Once 1 crosses the stop threshold, 2 takes over.
        s.update(1, 0.10);
        let diff = s.recompute();
        assert_eq!(diff.activated, vec![2]);
        assert_eq!(diff.deactivated, vec![1]);
    }

    #[tokio::test]
    async fn controller_coalesces_bursts_into_one_diff() {
        let (controller, mut rx) = AutoplayController::new(AutoplayConfig {
            debounce: Duration::from_millis(15),
            ..AutoplayConfig::default()
        });
        controller.set_eligible([1, 2]);

        // A scroll burst: three reports inside one quiet window.
        controller.report(1, 0.70);
        controller.report(2, 0.90);
        controller.report(1, 0.95);

        let diff = tokio::time::timeout(Duration::from_millis(300), rx.recv())
            .await
            .expect("expected one selection diff")
            .expect("channel open");
        assert_eq!(diff.activated, vec![1], "decided on the final visibility values");
        assert_eq!(controller.active(), vec![1]);

        // Quiet: no further emissions.
        assert!(tokio::time::timeout(Duration::from_millis(60), rx.recv())
            .await
            .is_err());
    }

    #[test]
    fn ineligible_items_never_activate() {
        let mut s = selector(1);
        s.set_eligible([2]);
        s.update(1, 0.99);
        assert!(s.recompute().is_empty());
    }

    #[test]
    fn zero_fraction_removes_entry() {
        let mut s = selector(1);
        s.set_eligible([1]);
        s.update(1, 0.80);
        s.recompute();
        s.update(1, 0.0);
        let diff = s.recompute();
        assert_eq!(diff.deactivated, vec![1]);
    }

    #[test]
    fn losing_eligibility_deactivates() {
        let mut s = selector(1);
        s.set_eligible([1]);
        s.update(1, 0.80);
        s.recompute();
        s.set_eligible([2]);
        let diff = s.recompute();
        assert_eq!(diff.deactivated, vec![1]);
    }
}
