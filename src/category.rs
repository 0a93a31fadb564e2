//! Categories and their word lists
//!
//! A category is one wheel segment. Only categories with at least one word
//! can be selected by a spin; empty ones are kept for editing and shown on
//! the wheel only when nothing else is available.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    constants::category::{MAX_CATEGORY_COUNT, MAX_NAME_LENGTH, MAX_WORD_COUNT, MAX_WORD_LENGTH},
    defaults,
    id::Id,
};

/// A named group of words that can land on the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Category {
    /// Stable identifier, unique across the category set
    #[garde(skip)]
    pub id: Id,
    /// Display label
    #[garde(length(chars, min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,
    /// Candidate words, in the order they were added
    #[garde(length(max = MAX_WORD_COUNT), inner(length(chars, min = 1, max = MAX_WORD_LENGTH)))]
    pub words: Vec<String>,
}

impl Category {
    /// Creates a category with a fresh identifier
    pub fn new<S: Into<String>>(name: S, words: Vec<String>) -> Self {
        Self {
            id: Id::new(),
            name: name.into(),
            words,
        }
    }

    /// Whether a spin may land on this category
    pub fn is_selectable(&self) -> bool {
        !self.words.is_empty()
    }

    fn has_word(&self, word: &str) -> bool {
        let needle = word.to_lowercase();
        self.words.iter().any(|w| w.to_lowercase() == needle)
    }
}

/// Errors raised while editing categories and words
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The category name is empty or contains only whitespace
    #[error("category name cannot be empty")]
    EmptyName,
    /// The category name exceeds the maximum allowed length
    #[error("category name is too long")]
    NameTooLong,
    /// Another category already uses this name
    #[error("category name already in-use")]
    DuplicateName,
    /// The word is empty or contains only whitespace
    #[error("word cannot be empty")]
    EmptyWord,
    /// The word exceeds the maximum allowed length
    #[error("word is too long")]
    WordTooLong,
    /// The category already contains this word
    #[error("word already in category")]
    DuplicateWord,
    /// The category cannot hold more words
    #[error("category is full")]
    TooManyWords,
    /// No more categories can be created
    #[error("too many categories")]
    TooManyCategories,
    /// No category has the given identifier
    #[error("category not found")]
    UnknownCategory,
    /// The category does not contain the given word
    #[error("word not found")]
    UnknownWord,
    /// Loaded data breaks a category invariant
    #[error("invalid category data: {0}")]
    Invalid(String),
}

fn clean_name(name: &str) -> Result<&str, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::NameTooLong);
    }
    Ok(name)
}

fn clean_word(word: &str) -> Result<&str, Error> {
    let word = word.trim();
    if word.is_empty() {
        return Err(Error::EmptyWord);
    }
    if word.chars().count() > MAX_WORD_LENGTH {
        return Err(Error::WordTooLong);
    }
    Ok(word)
}

/// The editable set of categories shown on the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryBook {
    categories: Vec<Category>,
}

impl Default for CategoryBook {
    fn default() -> Self {
        Self::defaults()
    }
}

impl CategoryBook {
    /// The built-in category set
    pub fn defaults() -> Self {
        Self {
            categories: defaults::categories(),
        }
    }

    /// Builds a book from loaded categories, checking every invariant
    ///
    /// Names and words are trimmed the same way edits are, so uniqueness is
    /// checked on what would be displayed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Invalid` when a category fails validation, has a blank
    /// name or word, when two categories share an identifier or a name
    /// (ignoring case), or when a category lists the same word twice.
    pub fn from_categories(mut categories: Vec<Category>) -> Result<Self, Error> {
        if categories.len() > MAX_CATEGORY_COUNT {
            return Err(Error::TooManyCategories);
        }
        for category in &mut categories {
            category
                .validate()
                .map_err(|e| Error::Invalid(e.to_string()))?;
            let invalid = |e: Error| Error::Invalid(format!("{e} in {:?}", category.name));
            let name = clean_name(&category.name).map_err(invalid)?.to_owned();
            let words = category
                .words
                .iter()
                .map(|w| clean_word(w).map(str::to_owned).map_err(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            if !words.iter().map(|w| w.to_lowercase()).all_unique() {
                return Err(Error::Invalid(format!("duplicate word in {name}")));
            }
            category.name = name;
            category.words = words;
        }
        if !categories.iter().map(|c| c.id).all_unique() {
            return Err(Error::Invalid("duplicate category id".to_owned()));
        }
        if !categories.iter().map(|c| c.name.to_lowercase()).all_unique() {
            return Err(Error::Invalid("duplicate category name".to_owned()));
        }
        Ok(Self { categories })
    }

    /// All categories in display order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether there are no categories at all
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Looks up a category by identifier
    pub fn get(&self, id: Id) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Categories a spin can land on
    pub fn selectable(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.is_selectable()).collect()
    }

    /// Categories drawn on the wheel
    ///
    /// This is the selectable set, or every category when none has words
    /// (in which case spinning is disabled).
    pub fn displayed(&self) -> Vec<&Category> {
        let selectable = self.selectable();
        if selectable.is_empty() {
            self.categories.iter().collect()
        } else {
            selectable
        }
    }

    /// Whether at least one category can be selected
    pub fn can_spin(&self) -> bool {
        self.categories.iter().any(Category::is_selectable)
    }

    fn name_taken(&self, name: &str, except: Option<Id>) -> bool {
        let needle = name.to_lowercase();
        self.categories
            .iter()
            .filter(|c| Some(c.id) != except)
            .any(|c| c.name.to_lowercase() == needle)
    }

    fn get_mut(&mut self, id: Id) -> Result<&mut Category, Error> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::UnknownCategory)
    }

    /// Adds an empty category
    ///
    /// # Errors
    ///
    /// * `Error::EmptyName` - Name is empty after trimming whitespace
    /// * `Error::NameTooLong` - Name exceeds the maximum length
    /// * `Error::DuplicateName` - Another category has the same name, ignoring case
    /// * `Error::TooManyCategories` - The book is full
    pub fn add_category(&mut self, name: &str) -> Result<Id, Error> {
        let name = clean_name(name)?;
        if self.name_taken(name, None) {
            return Err(Error::DuplicateName);
        }
        if self.categories.len() >= MAX_CATEGORY_COUNT {
            return Err(Error::TooManyCategories);
        }
        let category = Category::new(name, Vec::new());
        let id = category.id;
        self.categories.push(category);
        Ok(id)
    }

    /// Renames a category, keeping its words and identifier
    ///
    /// # Errors
    ///
    /// Same name rules as [`CategoryBook::add_category`], plus
    /// `Error::UnknownCategory` when the identifier is not present.
    pub fn rename_category(&mut self, id: Id, name: &str) -> Result<String, Error> {
        let name = clean_name(name)?;
        if self.name_taken(name, Some(id)) {
            return Err(Error::DuplicateName);
        }
        let category = self.get_mut(id)?;
        name.clone_into(&mut category.name);
        Ok(category.name.clone())
    }

    /// Removes a category and returns it
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownCategory` when the identifier is not present.
    pub fn remove_category(&mut self, id: Id) -> Result<Category, Error> {
        let position = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::UnknownCategory)?;
        Ok(self.categories.remove(position))
    }

    /// Appends a word to a category
    ///
    /// # Errors
    ///
    /// * `Error::EmptyWord` - Word is empty after trimming whitespace
    /// * `Error::WordTooLong` - Word exceeds the maximum length
    /// * `Error::DuplicateWord` - The category already has it, ignoring case
    /// * `Error::TooManyWords` - The category is full
    /// * `Error::UnknownCategory` - The identifier is not present
    pub fn add_word(&mut self, id: Id, word: &str) -> Result<String, Error> {
        let word = clean_word(word)?;
        let category = self.get_mut(id)?;
        if category.has_word(word) {
            return Err(Error::DuplicateWord);
        }
        if category.words.len() >= MAX_WORD_COUNT {
            return Err(Error::TooManyWords);
        }
        category.words.push(word.to_owned());
        Ok(word.to_owned())
    }

    /// Removes a word from a category
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownCategory` or `Error::UnknownWord`.
    pub fn remove_word(&mut self, id: Id, word: &str) -> Result<String, Error> {
        let category = self.get_mut(id)?;
        let position = category
            .words
            .iter()
            .position(|w| w == word)
            .ok_or(Error::UnknownWord)?;
        Ok(category.words.remove(position))
    }

    /// Replaces every category with the built-in set
    pub fn reset_to_defaults(&mut self) {
        *self = Self::defaults();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_owned()).collect()
    }

    fn book() -> CategoryBook {
        CategoryBook::from_categories(vec![
            Category::new("Animals", words(&["Cat", "Dog"])),
            Category::new("Empty", Vec::new()),
            Category::new("Food", words(&["Pizza"])),
        ])
        .unwrap()
    }

    #[test]
    fn test_selectable_skips_empty_categories() {
        let book = book();
        let names: Vec<&str> = book.selectable().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Animals", "Food"]);
        assert_eq!(book.displayed().len(), 2);
        assert!(book.can_spin());
    }

    #[test]
    fn test_displayed_falls_back_to_all_categories() {
        let book = CategoryBook::from_categories(vec![
            Category::new("A", Vec::new()),
            Category::new("B", Vec::new()),
        ])
        .unwrap();

        assert!(book.selectable().is_empty());
        assert_eq!(book.displayed().len(), 2);
        assert!(!book.can_spin());
    }

    #[test]
    fn test_add_category_rules() {
        let mut book = book();

        assert_eq!(book.add_category("   "), Err(Error::EmptyName));
        assert_eq!(book.add_category("animals"), Err(Error::DuplicateName));
        assert_eq!(
            book.add_category(&"x".repeat(MAX_NAME_LENGTH + 1)),
            Err(Error::NameTooLong)
        );
        assert_eq!(book.len(), 3);

        let id = book.add_category("  Movies ").unwrap();
        let movies = book.get(id).unwrap();
        assert_eq!(movies.name, "Movies");
        assert!(movies.words.is_empty());
        assert!(!movies.is_selectable());
    }

    #[test]
    fn test_rename_category_allows_own_name_in_other_case() {
        let mut book = book();
        let id = book.categories()[0].id;

        assert_eq!(book.rename_category(id, "ANIMALS").unwrap(), "ANIMALS");
        assert_eq!(book.rename_category(id, "Food"), Err(Error::DuplicateName));
        assert_eq!(
            book.rename_category(Id::new(), "Other"),
            Err(Error::UnknownCategory)
        );
    }

    #[test]
    fn test_word_editing() {
        let mut book = book();
        let id = book.categories()[1].id;

        assert_eq!(book.add_word(id, " "), Err(Error::EmptyWord));
        assert_eq!(book.add_word(id, " Guitar ").unwrap(), "Guitar");
        assert_eq!(book.add_word(id, "guitar"), Err(Error::DuplicateWord));
        assert!(book.get(id).unwrap().is_selectable());

        assert_eq!(book.remove_word(id, "Piano"), Err(Error::UnknownWord));
        assert_eq!(book.remove_word(id, "Guitar").unwrap(), "Guitar");
        assert!(!book.get(id).unwrap().is_selectable());
    }

    #[test]
    fn test_remove_category() {
        let mut book = book();
        let id = book.categories()[2].id;

        let removed = book.remove_category(id).unwrap();
        assert_eq!(removed.name, "Food");
        assert!(book.get(id).is_none());
        assert_eq!(book.remove_category(id), Err(Error::UnknownCategory));
    }

    #[test]
    fn test_from_categories_rejects_duplicates() {
        let a = Category::new("Same", words(&["x"]));
        let b = Category::new("same", words(&["y"]));
        assert!(matches!(
            CategoryBook::from_categories(vec![a.clone(), b]),
            Err(Error::Invalid(_))
        ));

        let twin = Category {
            name: "Other".to_owned(),
            ..a.clone()
        };
        assert!(matches!(
            CategoryBook::from_categories(vec![a, twin]),
            Err(Error::Invalid(_))
        ));

        let repeated = Category::new("Repeated", words(&["Sol", "sol"]));
        assert!(matches!(
            CategoryBook::from_categories(vec![repeated]),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn test_from_categories_rejects_blank_words() {
        for blank in ["", "   "] {
            let bad = Category::new("Bad", words(&[blank, "Perro"]));
            assert!(
                matches!(
                    CategoryBook::from_categories(vec![bad]),
                    Err(Error::Invalid(_))
                ),
                "word {blank:?} should be rejected"
            );
        }

        let blank_name = Category::new("   ", words(&["Perro"]));
        assert!(matches!(
            CategoryBook::from_categories(vec![blank_name]),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn test_from_categories_trims_before_comparing() {
        let padded = Category::new(" Animales ", words(&[" Perro", "Gato "]));
        let book = CategoryBook::from_categories(vec![padded]).unwrap();
        assert_eq!(book.categories()[0].name, "Animales");
        assert_eq!(book.categories()[0].words, words(&["Perro", "Gato"]));

        let clash = vec![
            Category::new("Animales", words(&["Perro"])),
            Category::new(" animales ", words(&["Gato"])),
        ];
        assert!(matches!(
            CategoryBook::from_categories(clash),
            Err(Error::Invalid(_))
        ));

        let repeated = Category::new("Comida", words(&["Pan", " pan"]));
        assert!(matches!(
            CategoryBook::from_categories(vec![repeated]),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut book = book();
        book.reset_to_defaults();
        assert_eq!(book, CategoryBook::defaults());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let book = CategoryBook::from_categories(vec![Category::new("A", words(&["b"]))]).unwrap();
        let json = serde_json::to_value(&book).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "A");
        assert_eq!(json[0]["words"][0], "b");
    }
}
