//! Flash-card study deck: a private ordering of the store's items plus a cursor.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::VocabItem;
use crate::store::VocabStore;

#[derive(Clone, Debug, Default)]
pub struct StudyDeck {
  store: Arc<VocabStore>,
  cards: Vec<Arc<VocabItem>>,
  index: usize,
}

impl StudyDeck {
  pub fn new(store: Arc<VocabStore>) -> Self {
    Self { cards: store.items().to_vec(), index: 0, store }
  }

  /// True when this deck was built from exactly this snapshot.
  pub fn is_built_from(&self, store: &Arc<VocabStore>) -> bool {
    Arc::ptr_eq(&self.store, store)
  }

  pub fn current(&self) -> Option<&VocabItem> {
    self.cards.get(self.index).map(Arc::as_ref)
  }

  /// Zero-based cursor and deck size.
  pub fn position(&self) -> (usize, usize) {
    (self.index, self.cards.len())
  }

  /// `"3 / 10"`; empty for an empty deck.
  pub fn counter(&self) -> String {
    if self.cards.is_empty() {
      String::new()
    } else {
      format!("{} / {}", self.index + 1, self.cards.len())
    }
  }

  /// Move forward; returns false at the last card.
  pub fn next(&mut self) -> bool {
    if self.index + 1 < self.cards.len() {
      self.index += 1;
      true
    } else {
      false
    }
  }

  /// Move back; returns false at the first card.
  pub fn prev(&mut self) -> bool {
    if self.index > 0 {
      self.index -= 1;
      true
    } else {
      false
    }
  }

  /// Reorder the deck uniformly and go back to the first card.
  pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    self.cards.shuffle(rng);
    self.index = 0;
    debug!(target: "study", cards = self.cards.len(), "Deck shuffled");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn store() -> Arc<VocabStore> {
    Arc::new(VocabStore::from_items(vec![
      VocabItem::new("uno", "one"),
      VocabItem::new("dos", "two"),
      VocabItem::new("tres", "three"),
    ]))
  }

  #[test]
  fn navigation_stops_at_the_ends() {
    let mut deck = StudyDeck::new(store());
    assert_eq!(deck.counter(), "1 / 3");
    assert!(!deck.prev());
    assert!(deck.next());
    assert!(deck.next());
    assert!(!deck.next());
    assert_eq!(deck.current().unwrap().term, "tres");
    assert_eq!(deck.counter(), "3 / 3");
    assert!(deck.prev());
    assert_eq!(deck.position(), (1, 3));
  }

  #[test]
  fn shuffle_resets_cursor_and_keeps_store_order() {
    let store = store();
    let mut deck = StudyDeck::new(Arc::clone(&store));
    deck.next();
    deck.shuffle(&mut StdRng::seed_from_u64(8));
    assert_eq!(deck.position(), (0, 3));
    assert_eq!(store.items()[0].term, "uno");

    let mut terms: Vec<String> = Vec::new();
    loop {
      terms.push(deck.current().unwrap().term.clone());
      if !deck.next() {
        break;
      }
    }
    terms.sort();
    assert_eq!(terms, vec!["dos", "tres", "uno"]);
  }

  #[test]
  fn empty_deck_has_no_card() {
    let mut deck = StudyDeck::new(Arc::default());
    assert!(deck.current().is_none());
    assert!(!deck.next());
    assert!(!deck.prev());
    assert_eq!(deck.counter(), "");
  }

  #[test]
  fn remembers_its_snapshot() {
    let store = store();
    let deck = StudyDeck::new(Arc::clone(&store));
    assert!(deck.is_built_from(&store));
    let same_items = Arc::new((*store).clone());
    assert!(!deck.is_built_from(&same_items));
  }
}
