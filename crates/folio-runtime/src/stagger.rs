#![forbid(unsafe_code)]

//! Per-item reveal delays.
//!
//! Items sharing one container reveal in sequence: item `i` waits
//! `i * stagger` after the container becomes visible. [`delay_for`] is the
//! pure function; [`StaggeredReveal`] bundles it with the container's
//! visibility handle.

use std::time::Duration;

use folio_core::config::RevealConfig;
use folio_core::intersection::ElementId;

use crate::reactive::{ReadOnly, Subscription};
use crate::visibility::{VisibilityHandle, VisibilityTracker};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Delay for item `index`: `index * stagger`.
///
/// Indices are not clamped. Only a product beyond [`Duration::MAX`]
/// saturates.
#[must_use]
pub fn delay_for(index: usize, stagger: Duration) -> Duration {
    let total = stagger.as_nanos().saturating_mul(index as u128);
    let secs = total / NANOS_PER_SEC;
    if secs > u128::from(u64::MAX) {
        return Duration::MAX;
    }
    // Both casts are in range: secs was checked and the remainder is < 1e9.
    Duration::new(secs as u64, (total % NANOS_PER_SEC) as u32)
}

/// Delays for `count` items, in order.
pub fn delays(count: usize, stagger: Duration) -> impl Iterator<Item = Duration> {
    (0..count).map(move |i| delay_for(i, stagger))
}

/// A container's one-shot visibility plus per-item delays.
#[derive(Debug)]
pub struct StaggeredReveal {
    handle: VisibilityHandle,
    item_count: usize,
    stagger: Duration,
}

impl StaggeredReveal {
    #[must_use]
    pub fn is_in_view(&self) -> bool {
        self.handle.is_visible()
    }

    #[must_use]
    pub fn delay_for(&self, index: usize) -> Duration {
        delay_for(index, self.stagger)
    }

    /// One delay per item.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        delays(self.item_count, self.stagger)
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[must_use]
    pub fn stagger(&self) -> Duration {
        self.stagger
    }

    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        self.handle.element()
    }

    #[must_use]
    pub fn signal(&self) -> ReadOnly<bool> {
        self.handle.signal()
    }

    pub fn subscribe(&self, callback: impl Fn(&bool) + 'static) -> Subscription {
        self.handle.subscribe(callback)
    }

    #[must_use]
    pub fn handle(&self) -> &VisibilityHandle {
        &self.handle
    }

    pub fn dispose(&self) -> bool {
        self.handle.dispose()
    }
}

impl VisibilityTracker {
    /// Track a container whose `item_count` children reveal in sequence,
    /// `config.stagger_delay` apart.
    pub fn track_with_stagger(
        &self,
        element: Option<ElementId>,
        item_count: usize,
        config: &RevealConfig,
    ) -> StaggeredReveal {
        StaggeredReveal {
            handle: self.track(element, config),
            item_count,
            stagger: config.stagger_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::fake::FakeIntersection;
    use proptest::prelude::*;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn five_items_at_100ms() {
        let got: Vec<_> = delays(5, ms(100)).collect();
        assert_eq!(got, vec![ms(0), ms(100), ms(200), ms(300), ms(400)]);
    }

    #[test]
    fn index_zero_is_zero() {
        assert_eq!(delay_for(0, ms(150)), Duration::ZERO);
        assert_eq!(delay_for(0, Duration::MAX), Duration::ZERO);
    }

    #[test]
    fn large_index_is_not_clamped() {
        assert_eq!(delay_for(1_000_000, ms(100)), Duration::from_secs(100_000));
    }

    #[test]
    fn overflow_saturates() {
        assert_eq!(delay_for(usize::MAX, Duration::MAX), Duration::MAX);
    }

    #[test]
    fn staggered_reveal_shares_container_visibility() {
        let fake = Rc::new(FakeIntersection::new());
        let tracker = VisibilityTracker::new(fake.clone());
        let grid = ElementId::new(7);
        let config = RevealConfig::default().with_stagger_ms(150);
        let reveal = tracker.track_with_stagger(Some(grid), 4, &config);

        assert!(!reveal.is_in_view());
        assert_eq!(reveal.item_count(), 4);
        assert_eq!(reveal.delay_for(3), ms(450));
        assert_eq!(
            reveal.delays().collect::<Vec<_>>(),
            vec![ms(0), ms(150), ms(300), ms(450)]
        );

        fake.enter(grid);
        assert!(reveal.is_in_view());
        assert_eq!(fake.observe_count(grid), 1);
        assert_eq!(fake.unobserve_count(), 1);
    }

    #[test]
    fn shapes_are_distinct() {
        let fake = Rc::new(FakeIntersection::new());
        let tracker = VisibilityTracker::new(fake.clone());
        let config = RevealConfig::default();
        let bare: VisibilityHandle = tracker.track(Some(ElementId::new(1)), &config);
        let staggered: StaggeredReveal =
            tracker.track_with_stagger(Some(ElementId::new(2)), 3, &config);
        assert_eq!(bare.element(), Some(ElementId::new(1)));
        assert_eq!(staggered.element(), Some(ElementId::new(2)));
        assert_eq!(staggered.delay_for(2), ms(200));
    }

    proptest! {
        #[test]
        fn delay_is_linear(i in 0usize..100_000, d in 1u64..10_000) {
            let stagger = ms(d);
            prop_assert_eq!(delay_for(i, stagger), ms(i as u64 * d));
        }

        #[test]
        fn delays_increase(count in 1usize..64, d in 1u64..1000) {
            let all: Vec<_> = delays(count, ms(d)).collect();
            prop_assert_eq!(all.len(), count);
            prop_assert!(all.windows(2).all(|w| w[1] - w[0] == ms(d)));
        }
    }
}
