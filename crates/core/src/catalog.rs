//! Static registry of categories and their skills.

use std::collections::HashSet;
use std::fmt;

use rand::RngCore;
use thiserror::Error;

use crate::checker::AnswerChecker;
use crate::generators::{self, GenerateFn};
use crate::model::{CategoryId, Generated};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("category {0} is registered more than once")]
    DuplicateCategory(CategoryId),
    #[error("category {0} has an empty display name")]
    EmptyDisplayName(CategoryId),
}

//
// ─── SKILL ─────────────────────────────────────────────────────────────────────
//

/// A named generator paired with the checker that grades its answers.
#[derive(Clone)]
pub struct Skill {
    name: String,
    generate: GenerateFn,
    checker: AnswerChecker,
}

impl Skill {
    #[must_use]
    pub fn new(name: impl Into<String>, generate: GenerateFn, checker: AnswerChecker) -> Self {
        Self {
            name: name.into(),
            generate,
            checker,
        }
    }

    /// A skill kept in the catalog whose generator always signals skip.
    #[must_use]
    pub fn retired(name: impl Into<String>) -> Self {
        Self::new(name, generators::retired, AnswerChecker::NormalizedText)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn checker(&self) -> AnswerChecker {
        self.checker
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> Generated {
        (self.generate)(rng)
    }
}

impl fmt::Debug for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skill")
            .field("name", &self.name)
            .field("checker", &self.checker)
            .finish_non_exhaustive()
    }
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct Category {
    id: CategoryId,
    display_name: String,
    skills: Vec<Skill>,
}

impl Category {
    #[must_use]
    pub fn new(id: CategoryId, display_name: impl Into<String>, skills: Vec<Skill>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            skills,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Ordered set of categories. Registration order is the tie-break order used
/// during cold-start selection.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// # Errors
    ///
    /// Returns [`CatalogError`] when a category id repeats or a display name
    /// is blank.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(categories.len());
        for category in &categories {
            if category.display_name.trim().is_empty() {
                return Err(CatalogError::EmptyDisplayName(category.id.clone()));
            }
            if !seen.insert(&category.id) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }
        Ok(Self { categories })
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    #[must_use]
    pub fn display_name(&self, id: &CategoryId) -> Option<&str> {
        self.category(id).map(Category::display_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, Question};

    fn fixed(_rng: &mut dyn RngCore) -> Generated {
        Generated::Ready(Question::new("1 + 1", Answer::text("2")))
    }

    fn category(id: &str, name: &str) -> Category {
        Category::new(
            CategoryId::new(id).unwrap(),
            name,
            vec![Skill::new("sum", fixed, AnswerChecker::ExactNumeric)],
        )
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![category("a", "A"), category("a", "Again")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCategory(CategoryId::new("a").unwrap()));
    }

    #[test]
    fn rejects_blank_display_name() {
        let err = Catalog::new(vec![category("a", "  ")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyDisplayName(_)));
    }

    #[test]
    fn lookup_by_id_preserves_registration_order() {
        let catalog = Catalog::new(vec![category("b", "Bee"), category("a", "Ay")]).unwrap();
        let ids: Vec<_> = catalog.categories().iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(catalog.display_name(&CategoryId::new("a").unwrap()), Some("Ay"));
        assert_eq!(catalog.display_name(&CategoryId::new("zzz").unwrap()), None);
    }

    #[test]
    fn retired_skill_always_skips() {
        let skill = Skill::retired("Old");
        let mut rng = rand::rng();
        assert_eq!(skill.generate(&mut rng), Generated::Skip);
        assert_eq!(skill.name(), "Old");
    }
}
