//! Gallery model
//!
//! An ordered, id-keyed card collection. The server owns canonical state;
//! this is the transient mirror the UI renders from, rebuilt fully on each
//! load. Insertion order is server order and is never re-sorted locally.

use indexmap::IndexMap;
use serde::Serialize;

use recipes_common::models::RecipeSummary;

/// One gallery card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub times_cooked: i64,
    pub image_url: Option<String>,
}

impl Card {
    /// Counter text shown on the card
    pub fn cooked_label(&self) -> String {
        format!("Cooked {} times", self.times_cooked)
    }
}

impl From<&RecipeSummary> for Card {
    fn from(summary: &RecipeSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title.clone(),
            times_cooked: summary.times_cooked,
            image_url: summary.image_url.clone(),
        }
    }
}

/// Ordered card collection keyed by recipe id
#[derive(Debug, Default)]
pub struct GalleryModel {
    cards: IndexMap<i64, Card>,
}

impl GalleryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all cards
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Insert a card, keeping at most one per id
    ///
    /// Returns false (and leaves the existing card untouched) when a card
    /// with this id is already present.
    pub fn insert(&mut self, card: Card) -> bool {
        if self.cards.contains_key(&card.id) {
            return false;
        }
        self.cards.insert(card.id, card);
        true
    }

    /// Set one card's counter to the server-returned value
    ///
    /// Returns false when no card has this id.
    pub fn set_times_cooked(&mut self, id: i64, times_cooked: i64) -> bool {
        match self.cards.get_mut(&id) {
            Some(card) => {
                card.times_cooked = times_cooked;
                true
            }
            None => false,
        }
    }

    /// Remove one card, preserving the order of the rest
    pub fn remove(&mut self, id: i64) -> bool {
        self.cards.shift_remove(&id).is_some()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.cards.contains_key(&id)
    }

    pub fn get(&self, id: i64) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// One-way render: snapshot of all cards in insertion order
    pub fn render(&self) -> Vec<Card> {
        self.cards.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64, title: &str) -> Card {
        Card {
            id,
            title: title.to_string(),
            times_cooked: 0,
            image_url: None,
        }
    }

    #[test]
    fn insert_is_idempotent_per_id() {
        let mut model = GalleryModel::new();
        assert!(model.insert(card(7, "Soup")));
        assert!(!model.insert(card(7, "Impostor Soup")));

        let rendered = model.render();
        assert_eq!(rendered.len(), 1);
        // The original card wins
        assert_eq!(rendered[0].title, "Soup");
    }

    #[test]
    fn render_preserves_insertion_order() {
        let mut model = GalleryModel::new();
        model.insert(card(3, "Stew"));
        model.insert(card(1, "Soup"));
        model.insert(card(2, "Pasta"));

        let ids: Vec<i64> = model.render().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut model = GalleryModel::new();
        model.insert(card(3, "Stew"));
        model.insert(card(1, "Soup"));
        model.insert(card(2, "Pasta"));

        assert!(model.remove(1));
        assert!(!model.remove(1));

        let ids: Vec<i64> = model.render().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn cooked_label_matches_card_text() {
        let mut c = card(7, "Soup");
        assert_eq!(c.cooked_label(), "Cooked 0 times");
        c.times_cooked = 1;
        assert_eq!(c.cooked_label(), "Cooked 1 times");
    }
}
