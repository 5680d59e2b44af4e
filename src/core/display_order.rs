//! Stable display order for possible cards
//!
//! Possible cards are shown sorted by a content hash so that answer cards land
//! at unpredictable positions while the order stays identical across calls,
//! processes and platforms.
//!
//! Key format: XXH3-64 (seed 0) over the card's words in printed order, each
//! word's UTF-8 bytes followed by a 0x1F unit separator. Hash ties fall back to
//! lexicographic word order, which makes the order total.

use super::card::Card;
use std::cmp::Ordering;
use xxhash_rust::xxh3::xxh3_64;

const WORD_SEPARATOR: u8 = 0x1F;

/// Content hash used as the primary display key
#[must_use]
pub fn display_hash(card: &Card) -> u64 {
    let mut bytes = Vec::with_capacity(card.words().iter().map(|w| w.len() + 1).sum());
    for word in card.words() {
        bytes.extend_from_slice(word.as_bytes());
        bytes.push(WORD_SEPARATOR);
    }
    xxh3_64(&bytes)
}

/// Total order over card content used for display
#[must_use]
pub fn compare_display_order(a: &Card, b: &Card) -> Ordering {
    display_hash(a)
        .cmp(&display_hash(b))
        .then_with(|| a.words().cmp(b.words()))
}

/// Sort cards into display order in place
pub fn sort_for_display(cards: &mut [Card]) {
    cards.sort_by_cached_key(|card| (display_hash(card), card.words().clone()));
}
