use crate::scanner::PhoneNumber;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NumberStatus {
    Working,
    #[default]
    Dead,
}

impl NumberStatus {
    pub fn toggled(self) -> Self {
        match self {
            NumberStatus::Working => NumberStatus::Dead,
            NumberStatus::Dead => NumberStatus::Working,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberStatus::Working => "WORKING",
            NumberStatus::Dead => "DEAD",
        }
    }
}

impl fmt::Display for NumberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-number state. The default is the state of a number on first sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberRecord {
    pub status: NumberStatus,
    pub favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub working: usize,
    pub dead: usize,
    pub favorites: usize,
}

/// Session-scoped store of number state, in insertion order.
///
/// Entries are only ever added. Registering a known number leaves its
/// record untouched, and toggles on unknown numbers are no-ops.
#[derive(Debug, Clone, Default)]
pub struct NumberRegistry {
    order: Vec<PhoneNumber>,
    records: HashMap<PhoneNumber, NumberRecord>,
}

impl NumberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds unseen numbers with default state and returns how many were new.
    pub fn register_all<'a, I>(&mut self, numbers: I) -> usize
    where
        I: IntoIterator<Item = &'a PhoneNumber>,
    {
        let mut inserted = 0;

        for number in numbers {
            if self.records.contains_key(number) {
                continue;
            }
            self.records.insert(number.clone(), NumberRecord::default());
            self.order.push(number.clone());
            inserted += 1;
        }

        if inserted > 0 {
            tracing::debug!(inserted, total = self.order.len(), "registered new numbers");
        }
        inserted
    }

    pub fn toggle_status(&mut self, number: &str) -> Option<NumberStatus> {
        match self.records.get_mut(number) {
            Some(record) => {
                record.status = record.status.toggled();
                tracing::debug!(number, status = %record.status, "status toggled");
                Some(record.status)
            }
            None => {
                tracing::debug!(number, "ignoring status toggle for unregistered number");
                None
            }
        }
    }

    pub fn toggle_favorite(&mut self, number: &str) -> Option<bool> {
        match self.records.get_mut(number) {
            Some(record) => {
                record.favorite = !record.favorite;
                tracing::debug!(number, favorite = record.favorite, "favorite toggled");
                Some(record.favorite)
            }
            None => {
                tracing::debug!(number, "ignoring favorite toggle for unregistered number");
                None
            }
        }
    }

    pub fn get_status(&self, number: &str) -> NumberStatus {
        self.records
            .get(number)
            .map(|record| record.status)
            .unwrap_or_default()
    }

    pub fn is_favorite(&self, number: &str) -> bool {
        self.records
            .get(number)
            .map(|record| record.favorite)
            .unwrap_or(false)
    }

    pub fn record(&self, number: &str) -> Option<NumberRecord> {
        self.records.get(number).copied()
    }

    /// Favorites paired with their current status, in insertion order.
    pub fn list_favorites(&self) -> Vec<(PhoneNumber, NumberStatus)> {
        self.iter()
            .filter(|(_, record)| record.favorite)
            .map(|(number, record)| (number.clone(), record.status))
            .collect()
    }

    /// Numbers currently marked working, in insertion order.
    pub fn list_working(&self) -> Vec<PhoneNumber> {
        self.iter()
            .filter(|(_, record)| record.status == NumberStatus::Working)
            .map(|(number, _)| number.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PhoneNumber, NumberRecord)> + '_ {
        self.order.iter().map(move |number| {
            let record = self.records.get(number).copied().unwrap_or_default();
            (number, record)
        })
    }

    pub fn contains(&self, number: &str) -> bool {
        self.records.contains_key(number)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn summary(&self) -> RegistrySummary {
        let mut summary = RegistrySummary {
            total: self.order.len(),
            ..RegistrySummary::default()
        };

        for (_, record) in self.iter() {
            match record.status {
                NumberStatus::Working => summary.working += 1,
                NumberStatus::Dead => summary.dead += 1,
            }
            if record.favorite {
                summary.favorites += 1;
            }
        }

        summary
    }
}
