// Price board: the "current price" and "current buyer" labels shared by the
// bid form and the live feed.
//
// Both writers stamp their updates from one `Sequencer` when the update comes
// off the network. The board keeps the stamp of the last applied update and
// refuses anything older, so a late-arriving stale write never overwrites a
// newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::protocol::PriceUpdate;

/// Ordering token for price updates. Larger is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Stamp(pub u64);

/// Hands out strictly increasing stamps. Shared by every update source.
#[derive(Debug, Default)]
pub struct Sequencer {
    next: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next stamp. The first stamp issued is `Stamp(1)`.
    pub fn stamp(&self) -> Stamp {
        Stamp(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Text of the current-price label for a given price.
pub fn prezzo_label(update: &PriceUpdate) -> String {
    format!("Prezzo attuale: € {}", update.nuovo_prezzo)
}

/// Text of the current-buyer label for a given bidder.
pub fn acquirente_label(update: &PriceUpdate) -> String {
    format!("Offerta fatta da: {}", update.acquirente)
}

/// The two price-display labels and the stamp of their last write.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceBoard {
    /// `#prezzo-attuale` content.
    pub prezzo_attuale: String,
    /// `#acquirente-attuale` content (rendered small).
    pub acquirente_attuale: String,
    last_applied: Stamp,
}

impl PriceBoard {
    /// Board with the server-rendered initial label texts.
    pub fn new(prezzo_attuale: String, acquirente_attuale: String) -> Self {
        Self {
            prezzo_attuale,
            acquirente_attuale,
            last_applied: Stamp::default(),
        }
    }

    /// Repaint both labels unless a newer update has already been applied.
    /// Returns whether the labels changed hands.
    pub fn apply(&mut self, update: &PriceUpdate, stamp: Stamp) -> bool {
        if stamp <= self.last_applied {
            return false;
        }
        self.prezzo_attuale = prezzo_label(update);
        self.acquirente_attuale = acquirente_label(update);
        self.last_applied = stamp;
        true
    }

    pub fn last_applied(&self) -> Stamp {
        self.last_applied
    }
}
