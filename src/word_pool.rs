//! Word drawing with per-category repetition control
//!
//! Words already drawn from a category are remembered until every word of
//! that category has come up once. The next draw then starts a new cycle:
//! any word may be picked, and the history restarts with that word only.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{category::Category, id::Id, random::RandomSource};

/// Words already drawn, per category, since the last reset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsedWords {
    by_category: HashMap<Id, HashSet<String>>,
}

impl UsedWords {
    /// Words drawn from a category in the current cycle
    pub fn get(&self, category: Id) -> Option<&HashSet<String>> {
        self.by_category.get(&category)
    }

    /// Whether a word was already drawn from a category in the current cycle
    pub fn contains(&self, category: Id, word: &str) -> bool {
        self.get(category).is_some_and(|used| used.contains(word))
    }

    /// Whether no category has any draw history
    pub fn is_empty(&self) -> bool {
        self.by_category.values().all(HashSet::is_empty)
    }

    /// Drops the history of every category
    pub fn clear(&mut self) {
        self.by_category.clear();
    }

    /// Drops the history of a single category
    pub fn forget_category(&mut self, category: Id) {
        self.by_category.remove(&category);
    }

    /// Drops one word from a category's history, after it left the category
    pub fn forget_word(&mut self, category: Id, word: &str) {
        if let Some(used) = self.by_category.get_mut(&category) {
            used.remove(word);
        }
    }
}

/// Outcome of [`draw_word`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    /// The word to draw (the category name when the category has no words)
    pub word: String,
    /// The history after this draw
    pub used: UsedWords,
    /// Whether this draw started a new cycle for the category
    pub cycled: bool,
}

/// Draws the next word from a category
///
/// Words not yet used in the current cycle are picked uniformly. When none
/// is left, a new cycle starts: the pick is uniform over the whole list and
/// the history for the category becomes just the drawn word. A category
/// without words yields its own name and leaves the history untouched.
///
/// # Examples
///
/// ```rust
/// use pictionary_roulette::{category::Category, word_pool::{draw_word, UsedWords}};
///
/// let category = Category::new("Colors", vec!["Red".to_owned()]);
/// let mut rng = fastrand::Rng::with_seed(1);
///
/// let first = draw_word(&category, &UsedWords::default(), &mut rng);
/// assert_eq!(first.word, "Red");
/// assert!(!first.cycled);
///
/// let second = draw_word(&category, &first.used, &mut rng);
/// assert!(second.cycled);
/// ```
pub fn draw_word<R: RandomSource>(category: &Category, used: &UsedWords, rng: &mut R) -> Draw {
    if category.words.is_empty() {
        return Draw {
            word: category.name.clone(),
            used: used.clone(),
            cycled: false,
        };
    }

    let available: Vec<&String> = category
        .words
        .iter()
        .filter(|word| !used.contains(category.id, word))
        .collect();

    let mut next = used.clone();
    let history = next.by_category.entry(category.id).or_default();

    if let Some(word) = rng.choose(&available) {
        let word = (*word).clone();
        history.insert(word.clone());
        return Draw {
            word,
            used: next,
            cycled: false,
        };
    }

    let word = rng
        .choose(&category.words)
        .cloned()
        .unwrap_or_else(|| category.name.clone());
    history.clear();
    history.insert(word.clone());
    Draw {
        word,
        used: next,
        cycled: true,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::random::scripted::Scripted;

    fn category(words: &[&str]) -> Category {
        Category::new("Test", words.iter().map(|w| (*w).to_owned()).collect())
    }

    #[test]
    fn test_two_words_cycle_on_third_draw() {
        let category = category(&["A", "B"]);
        let mut rng = fastrand::Rng::with_seed(9);

        let first = draw_word(&category, &UsedWords::default(), &mut rng);
        let second = draw_word(&category, &first.used, &mut rng);
        assert!(!first.cycled);
        assert!(!second.cycled);
        assert_ne!(first.word, second.word);

        let third = draw_word(&category, &second.used, &mut rng);
        assert!(third.cycled);
        let expected: HashSet<String> = [third.word.clone()].into();
        assert_eq!(third.used.get(category.id), Some(&expected));
    }

    #[test]
    fn test_never_repeats_within_a_cycle() {
        let words = ["a", "b", "c", "d", "e", "f", "g"];
        let category = category(&words);
        let mut rng = fastrand::Rng::with_seed(2024);
        let mut used = UsedWords::default();
        let mut seen = HashSet::new();

        for _ in 0..words.len() {
            let draw = draw_word(&category, &used, &mut rng);
            assert!(!draw.cycled);
            assert!(!used.contains(category.id, &draw.word));
            assert!(seen.insert(draw.word.clone()));
            used = draw.used;
        }

        assert_eq!(seen.len(), words.len());
    }

    #[test]
    fn test_history_stays_subset_of_words() {
        let category = category(&["x", "y", "z"]);
        let mut rng = fastrand::Rng::with_seed(5);
        let mut used = UsedWords::default();

        for _ in 0..30 {
            used = draw_word(&category, &used, &mut rng).used;
            let history = used.get(category.id).unwrap();
            assert!(history.iter().all(|w| category.words.contains(w)));
        }
    }

    #[test]
    fn test_empty_category_yields_its_name() {
        let empty = Category::new("Secret", Vec::new());
        let mut used = UsedWords::default();
        used.by_category
            .insert(Id::new(), ["kept".to_owned()].into());
        let mut rng = fastrand::Rng::with_seed(0);

        let draw = draw_word(&empty, &used, &mut rng);
        assert_eq!(draw.word, "Secret");
        assert!(!draw.cycled);
        assert_eq!(draw.used, used);
    }

    #[test]
    fn test_pick_comes_from_unused_words() {
        let category = category(&["A", "B", "C"]);
        let mut used = UsedWords::default();
        used.by_category
            .insert(category.id, ["A".to_owned()].into());

        let mut rng = Scripted::new(&[1]);
        let draw = draw_word(&category, &used, &mut rng);
        assert_eq!(draw.word, "C");
        assert!(draw.used.contains(category.id, "A"));
        assert!(draw.used.contains(category.id, "C"));
    }

    #[test]
    fn test_same_seed_same_draws() {
        let category = category(&["1", "2", "3", "4", "5"]);
        let run = |seed| {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut used = UsedWords::default();
            (0..12)
                .map(|_| {
                    let draw = draw_word(&category, &used, &mut rng);
                    used = draw.used;
                    draw.word
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_forget_and_clear() {
        let category = category(&["A", "B"]);
        let mut rng = fastrand::Rng::with_seed(4);
        let mut used = draw_word(&category, &UsedWords::default(), &mut rng).used;
        let word = used.get(category.id).unwrap().iter().next().unwrap().clone();

        used.forget_word(category.id, &word);
        assert!(used.is_empty());

        used = draw_word(&category, &used, &mut rng).used;
        used.forget_category(category.id);
        assert!(used.get(category.id).is_none());

        used = draw_word(&category, &used, &mut rng).used;
        assert!(!used.is_empty());
        used.clear();
        assert!(used.is_empty());
    }
}
