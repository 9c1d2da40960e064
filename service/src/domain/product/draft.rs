//! [`Draft`] list of [`PriceTier`]s edited alongside a [`Product`].
//!
//! [`Product`]: super::Product

use derive_more::{Display, Error, From};

use super::tier::{self, PriceTier, Violation};

/// In-memory list of [`PriceTier`]s not yet persisted.
///
/// Every mutation is validated with [`tier::validate()`], and a rejected
/// mutation leaves the [`Draft`] untouched.
#[derive(Clone, Debug, Default)]
pub struct Draft {
    /// Entries of this [`Draft`] in insertion order.
    entries: Vec<Entry>,

    /// [`Key`] to assign to the next added entry.
    next_key: u32,
}

/// Entry of a [`Draft`].
#[derive(Clone, Debug)]
struct Entry {
    /// Identity of this [`Entry`] inside its [`Draft`].
    key: Key,

    /// Drafted [`PriceTier`].
    tier: PriceTier,
}

/// Identity of a [`PriceTier`] inside a [`Draft`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Key(u32);

impl Draft {
    /// Creates a new empty [`Draft`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Draft`] pre-filled with already persisted
    /// [`PriceTier`]s, as they're accepted by the API.
    #[must_use]
    pub fn from_persisted(tiers: impl IntoIterator<Item = PriceTier>) -> Self {
        let mut draft = Self::new();
        for tier in tiers {
            _ = draft.push(tier);
        }
        draft
    }

    /// Validates the provided [`tier::Candidate`] against all the drafted
    /// [`PriceTier`]s and appends it on success.
    ///
    /// # Errors
    ///
    /// With the [`Violation`] rejecting the [`tier::Candidate`].
    pub fn add(
        &mut self,
        candidate: &tier::Candidate,
    ) -> Result<Key, Violation> {
        let tier = tier::validate(candidate, self.tiers())?;
        Ok(self.push(tier))
    }

    /// Validates the provided [`tier::Candidate`] against all the drafted
    /// [`PriceTier`]s except the one identified by `key`, and replaces that
    /// one on success.
    ///
    /// The persisted ID of the replaced [`PriceTier`] (if any) is kept.
    ///
    /// # Errors
    ///
    /// - If there is no [`PriceTier`] with the provided `key`.
    /// - With the [`Violation`] rejecting the [`tier::Candidate`].
    pub fn edit(
        &mut self,
        key: Key,
        candidate: &tier::Candidate,
    ) -> Result<(), EditError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.key == key)
            .ok_or(EditError::NotFound(key))?;

        let others = self
            .entries
            .iter()
            .filter(|e| e.key != key)
            .map(|e| &e.tier);
        let tier = tier::validate(candidate, others)?;

        let entry = &mut self.entries[pos];
        entry.tier = PriceTier {
            id: entry.tier.id,
            ..tier
        };
        Ok(())
    }

    /// Removes the [`PriceTier`] identified by `key`, returning it.
    pub fn remove(&mut self, key: Key) -> Option<PriceTier> {
        let pos = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(pos).tier)
    }

    /// Returns the [`PriceTier`] identified by `key`, if any.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<&PriceTier> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.tier)
    }

    /// Iterates over the drafted [`PriceTier`]s with their [`Key`]s, in
    /// insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &PriceTier)> {
        self.entries.iter().map(|e| (e.key, &e.tier))
    }

    /// Iterates over the drafted [`PriceTier`]s, in insertion order.
    pub fn tiers(&self) -> impl Iterator<Item = &PriceTier> {
        self.entries.iter().map(|e| &e.tier)
    }

    /// Returns the number of drafted [`PriceTier`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Indicates whether this [`Draft`] has no [`PriceTier`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes this [`Draft`] returning its [`PriceTier`]s ordered by their
    /// minimum quantity.
    #[must_use]
    pub fn into_tiers(self) -> Vec<PriceTier> {
        let mut tiers =
            self.entries.into_iter().map(|e| e.tier).collect::<Vec<_>>();
        tiers.sort_by_key(|t| t.min_quantity);
        tiers
    }

    /// Appends the provided [`PriceTier`] without validation.
    fn push(&mut self, tier: PriceTier) -> Key {
        let key = Key(self.next_key);
        self.next_key += 1;
        self.entries.push(Entry { key, tier });
        key
    }
}

/// Error of editing a [`Draft`] entry.
#[derive(Clone, Copy, Debug, Display, Eq, Error, From, PartialEq)]
pub enum EditError {
    /// There is no [`PriceTier`] with the provided [`Key`].
    #[display("no drafted price tier `{_0}`")]
    #[from(ignore)]
    NotFound(#[error(not(source))] Key),

    /// Edited [`PriceTier`] is invalid.
    #[display("{_0}")]
    Invalid(Violation),
}

#[cfg(test)]
mod spec {
    use super::{Draft, EditError};
    use crate::domain::product::tier::{self, Candidate, Period, Violation};

    fn candidate(min: u32, max: Option<u32>) -> Candidate {
        Candidate {
            min_quantity: Some(min),
            max_quantity: max,
            price_per_unit: Some("9.99".to_owned()),
            period: Period::Month,
        }
    }

    #[test]
    fn adds_non_overlapping_tiers() {
        let mut draft = Draft::new();
        let first = draft.add(&candidate(1, Some(10))).unwrap();
        let second = draft.add(&candidate(11, Some(50))).unwrap();
        _ = draft.add(&candidate(51, None)).unwrap();

        assert_ne!(first, second);
        assert_eq!(draft.len(), 3);
        assert_eq!(draft.get(second).unwrap().min_quantity, 11);
    }

    #[test]
    fn leaves_draft_untouched_on_rejection() {
        let mut draft = Draft::new();
        _ = draft.add(&candidate(1, Some(10))).unwrap();

        assert_eq!(
            draft.add(&candidate(10, Some(20))),
            Err(Violation::Overlap {
                min_quantity: 1,
                max_quantity: Some(10),
            }),
        );
        assert_eq!(
            draft.add(&candidate(30, Some(30))),
            Err(Violation::MaxNotAboveMin),
        );
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn edits_by_identity_excluding_itself() {
        let mut draft = Draft::new();
        let low = draft.add(&candidate(1, Some(10))).unwrap();
        let high = draft.add(&candidate(11, None)).unwrap();

        draft.edit(low, &candidate(1, Some(9))).unwrap();
        assert_eq!(draft.get(low).unwrap().max_quantity, Some(9));

        // Widening a tier must not collide with its own previous range.
        draft.edit(low, &candidate(1, Some(10))).unwrap();
        assert_eq!(draft.get(low).unwrap().max_quantity, Some(10));

        assert_eq!(
            draft.edit(low, &candidate(1, Some(11))),
            Err(EditError::Invalid(Violation::Overlap {
                min_quantity: 11,
                max_quantity: None,
            })),
        );
        assert_eq!(draft.get(low).unwrap().max_quantity, Some(10));

        _ = draft.remove(high).unwrap();
        assert_eq!(
            draft.edit(high, &candidate(20, None)),
            Err(EditError::NotFound(high)),
        );
    }

    #[test]
    fn keeps_persisted_identity_on_edit() {
        let persisted = tier::PriceTier {
            id: Some(uuid::Uuid::new_v4().into()),
            ..tier::validate(&candidate(1, Some(10)), []).unwrap()
        };
        let mut draft = Draft::from_persisted([persisted.clone()]);
        let (key, _) = draft.iter().next().unwrap();

        draft.edit(key, &candidate(1, Some(20))).unwrap();
        let edited = draft.get(key).unwrap();
        assert_eq!(edited.id, persisted.id);
        assert_eq!(edited.max_quantity, Some(20));
    }

    #[test]
    fn orders_tiers_by_minimum_quantity() {
        let mut draft = Draft::new();
        _ = draft.add(&candidate(100, None)).unwrap();
        _ = draft.add(&candidate(1, Some(9))).unwrap();
        _ = draft.add(&candidate(10, Some(99))).unwrap();

        let mins = draft
            .into_tiers()
            .into_iter()
            .map(|t| t.min_quantity)
            .collect::<Vec<_>>();
        assert_eq!(mins, [1, 10, 100]);
    }
}
