//! Answer checking

use super::algorithm::normalize_answer;
use super::models::{Card, Evaluation};

/// Compare an answer against the card's ending and its full form.
///
/// Accents, apostrophes, surrounding whitespace and case are ignored.
/// Any input is accepted; an empty answer is simply wrong unless the card
/// itself has no ending.
pub fn check_answer(card: &Card, raw_input: &str) -> Evaluation {
    let full_form = card.composed_form();
    let input = normalize_answer(raw_input);

    let correct = input == normalize_answer(&card.ending) || input == normalize_answer(&full_form);

    Evaluation { correct, full_form }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(stem: &str, ending: &str, tail: &str) -> Card {
        Card {
            card_id: "v::t::p".into(),
            verb_id: "v".into(),
            infinitive: "v".into(),
            raw_infinitive: "v".into(),
            tense_id: "t".into(),
            tense_label: String::new(),
            description: String::new(),
            verb_family: String::new(),
            emoji: String::new(),
            pronoun: "p".into(),
            stem: stem.into(),
            ending: ending.into(),
            tail: tail.into(),
            full_form: format!("{}[{}]{}", stem, ending, tail),
            context_ru: String::new(),
            context_eng: String::new(),
        }
    }

    #[test]
    fn test_ending_matches() {
        let result = check_answer(&card("habl", "as", ""), " AS ");
        assert!(result.correct);
        assert_eq!(result.full_form, "hablas");
    }

    #[test]
    fn test_full_form_matches() {
        assert!(check_answer(&card("habl", "as", ""), "hablas").correct);
        assert!(check_answer(&card("me lev", "o", " pronto"), "Me levo pronto").correct);
    }

    #[test]
    fn test_accents_and_apostrophes_ignored() {
        assert!(check_answer(&card("habl", "é", ""), "e").correct);
        assert!(check_answer(&card("habl", "e", ""), "é").correct);
        assert!(check_answer(&card("l'", "habla", ""), "lhabla").correct);
    }

    #[test]
    fn test_wrong_and_empty_answers() {
        assert!(!check_answer(&card("habl", "a", ""), "x").correct);
        assert!(!check_answer(&card("habl", "a", ""), "").correct);
        assert!(!check_answer(&card("habl", "a", ""), "habl").correct);
    }
}
