use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_IMPORTANCE, MAX_IMPORTANCE, MIN_IMPORTANCE};
use crate::planner::PlannerError;

/// 科目重要度，取值范围 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Importance(u8);

impl Importance {
    pub fn new(rating: u8) -> Result<Self, PlannerError> {
        if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&rating) {
            return Err(PlannerError::invalid(format!(
                "importance must be between {MIN_IMPORTANCE} and {MAX_IMPORTANCE}, got {rating}"
            )));
        }
        Ok(Self(rating))
    }

    pub fn weight(self) -> u32 {
        u32::from(self.0)
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(DEFAULT_IMPORTANCE)
    }
}

impl TryFrom<u8> for Importance {
    type Error = PlannerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Importance> for u8 {
    fn from(value: Importance) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectImportance {
    pub subject: String,
    pub importance: Importance,
}

/// Selected subjects and their importance, kept in selection order.
///
/// The key set of this map *is* the set of selected subjects: a subject is
/// selected exactly when it has an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportanceMap {
    entries: Vec<SubjectImportance>,
}

impl ImportanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.position(subject).is_some()
    }

    pub fn get(&self, subject: &str) -> Option<Importance> {
        self.position(subject).map(|idx| self.entries[idx].importance)
    }

    /// Returns `false` when the subject was already selected; its rating is kept.
    pub fn insert(&mut self, subject: &str, importance: Importance) -> bool {
        if self.contains(subject) {
            return false;
        }
        self.entries.push(SubjectImportance {
            subject: subject.to_string(),
            importance,
        });
        true
    }

    pub fn remove(&mut self, subject: &str) -> Option<Importance> {
        let idx = self.position(subject)?;
        Some(self.entries.remove(idx).importance)
    }

    /// Overwrites the rating of an already selected subject.
    pub fn set(&mut self, subject: &str, importance: Importance) -> Result<(), PlannerError> {
        let idx = self
            .position(subject)
            .ok_or_else(|| PlannerError::invalid(format!("subject '{subject}' is not selected")))?;
        self.entries[idx].importance = importance;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Importance)> {
        self.entries
            .iter()
            .map(|entry| (entry.subject.as_str(), entry.importance))
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.subject.as_str())
    }

    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|entry| entry.importance.weight()).sum()
    }

    fn position(&self, subject: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.subject == subject)
    }
}

impl<'a> FromIterator<(&'a str, Importance)> for ImportanceMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, Importance)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (subject, importance) in iter {
            map.insert(subject, importance);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imp(v: u8) -> Importance {
        Importance::new(v).unwrap()
    }

    #[test]
    fn importance_range_is_enforced() {
        assert!(Importance::new(0).is_err());
        assert!(Importance::new(6).is_err());
        assert_eq!(Importance::new(1).unwrap().weight(), 1);
        assert_eq!(Importance::new(5).unwrap().weight(), 5);
        assert_eq!(Importance::default().weight(), 3);
    }

    #[test]
    fn importance_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<Importance>("4").is_ok());
        assert!(serde_json::from_str::<Importance>("9").is_err());
    }

    #[test]
    fn insert_keeps_selection_order_and_ignores_duplicates() {
        let mut map = ImportanceMap::new();
        assert!(map.insert("Math", imp(5)));
        assert!(map.insert("History", imp(1)));
        assert!(!map.insert("Math", imp(2)));

        let subjects: Vec<&str> = map.subjects().collect();
        assert_eq!(subjects, vec!["Math", "History"]);
        assert_eq!(map.get("Math"), Some(imp(5)));
        assert_eq!(map.total_weight(), 6);
    }

    #[test]
    fn remove_drops_the_entry() {
        let mut map: ImportanceMap = [("Math", imp(5)), ("Art", imp(2))].into_iter().collect();
        assert_eq!(map.remove("Math"), Some(imp(5)));
        assert_eq!(map.remove("Math"), None);
        assert!(!map.contains("Math"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn set_requires_selected_subject() {
        let mut map = ImportanceMap::new();
        assert!(matches!(
            map.set("Physics", imp(4)),
            Err(PlannerError::InvalidInput(_))
        ));
        map.insert("Physics", Importance::default());
        map.set("Physics", imp(4)).unwrap();
        assert_eq!(map.get("Physics"), Some(imp(4)));
    }
}
