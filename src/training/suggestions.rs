//! Multiple-guess hints: candidate endings for a card

use rand::seq::SliceRandom;
use rand::RngCore;

use super::filter::TenseFilter;
use super::models::Card;

/// Distinct endings from cards that share the target's tense and its family
/// (or its verb, when the target has no family), in shuffled order.
///
/// The target's own ending is always included when it is non-empty.
pub fn suggestions_for<'a, I>(
    card: &Card,
    cards: I,
    filter: &TenseFilter,
    rng: &mut dyn RngCore,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut endings: Vec<String> = Vec::new();

    for entry in cards {
        if filter.is_excluded(&entry.tense_id) || entry.ending.is_empty() {
            continue;
        }

        if entry.tense_id != card.tense_id {
            continue;
        }

        let same_group = if card.verb_family.is_empty() {
            entry.verb_id == card.verb_id
        } else {
            entry.verb_family == card.verb_family
        };
        if !same_group {
            continue;
        }

        if !endings.contains(&entry.ending) {
            endings.push(entry.ending.clone());
        }
    }

    if !card.ending.is_empty() {
        endings.retain(|ending| ending != &card.ending);
        endings.push(card.ending.clone());
    }

    endings.shuffle(rng);
    endings
}
