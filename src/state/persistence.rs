use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{DailyMealPlan, DayAggregate, UserProfile};

/// Date-keyed storage for day aggregates.
pub trait PlanStorage {
    fn load(&self, date: NaiveDate) -> Result<Option<DayAggregate>>;

    fn save(&mut self, date: NaiveDate, aggregate: &DayAggregate) -> Result<()>;

    /// Every stored date, ascending.
    fn dates(&self) -> Result<Vec<NaiveDate>>;

    fn save_all(&mut self, aggregates: &[&DayAggregate]) -> Result<()> {
        for aggregate in aggregates {
            self.save(aggregate.date, aggregate)?;
        }
        Ok(())
    }
}

/// Volatile storage, mainly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    days: BTreeMap<NaiveDate, DayAggregate>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanStorage for MemoryStorage {
    fn load(&self, date: NaiveDate) -> Result<Option<DayAggregate>> {
        Ok(self.days.get(&date).cloned())
    }

    fn save(&mut self, date: NaiveDate, aggregate: &DayAggregate) -> Result<()> {
        self.days.insert(date, aggregate.clone());
        Ok(())
    }

    fn dates(&self) -> Result<Vec<NaiveDate>> {
        Ok(self.days.keys().copied().collect())
    }
}

/// All aggregates in one JSON document keyed by ISO date.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<NaiveDate, DayAggregate>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_document(&self, document: &BTreeMap<NaiveDate, DayAggregate>) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PlanStorage for JsonFileStorage {
    fn load(&self, date: NaiveDate) -> Result<Option<DayAggregate>> {
        Ok(self.read_document()?.remove(&date))
    }

    fn save(&mut self, date: NaiveDate, aggregate: &DayAggregate) -> Result<()> {
        let mut document = self.read_document()?;
        document.insert(date, aggregate.clone());
        self.write_document(&document)
    }

    fn dates(&self) -> Result<Vec<NaiveDate>> {
        Ok(self.read_document()?.into_keys().collect())
    }

    fn save_all(&mut self, aggregates: &[&DayAggregate]) -> Result<()> {
        let mut document = self.read_document()?;
        for aggregate in aggregates {
            document.insert(aggregate.date, (*aggregate).clone());
        }
        self.write_document(&document)
    }
}

/// Load the user profile from a JSON file.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<UserProfile> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save the user profile, weight log included.
pub fn save_profile<P: AsRef<Path>>(path: P, profile: &UserProfile) -> Result<()> {
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the last generated plan, if one was saved.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<Option<DailyMealPlan>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

pub fn save_plan<P: AsRef<Path>>(path: P, plan: &DailyMealPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}
