use crate::error::{Error, Result};
use crate::{Day, Real};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// One reported row of the epidemic dataset. A country may appear several
/// times per day, once per reporting sub-region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRow {
    #[serde(rename = "Country/Region")]
    pub country: String,
    #[serde(rename = "Province/State", default)]
    pub province: Option<String>,
    #[serde(rename = "day", alias = "Last Update")]
    pub day: Day,
    #[serde(rename = "Confirmed", default)]
    pub confirmed: Real,
    #[serde(rename = "Deaths", default)]
    pub deaths: Real,
    #[serde(rename = "Recovered", default)]
    pub recovered: Real,
    #[serde(rename = "Active", default)]
    pub active: Real,
}

/// The count fields a dashboard can aggregate over. Mirrors the radio items
/// of the explorer UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variable {
    Confirmed,
    Deaths,
    Recovered,
    Active,
}

impl Variable {
    /// Parse a UI label such as `"Active"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Confirmed" => Some(Variable::Confirmed),
            "Deaths" => Some(Variable::Deaths),
            "Recovered" => Some(Variable::Recovered),
            "Active" => Some(Variable::Active),
            _ => None,
        }
    }

    fn of(self, row: &CaseRow) -> Real {
        match self {
            Variable::Confirmed => row.confirmed,
            Variable::Deaths => row.deaths,
            Variable::Recovered => row.recovered,
            Variable::Active => row.active,
        }
    }
}

/// In-memory epidemic dataset. Loaded once at startup and shared read-only
/// across requests; no method mutates it after construction.
#[derive(Debug, Clone, Default)]
pub struct CaseData {
    rows: Vec<CaseRow>,
}

impl CaseData {
    /// Build the dataset from raw rows. Day values are normalized to their
    /// date part and rows duplicated on (country, province, day) are dropped,
    /// keeping the first occurrence.
    pub fn new(rows: Vec<CaseRow>) -> Self {
        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(rows.len());
        for mut row in rows {
            row.day = date_part(&row.day);
            let key = (row.country.clone(), row.province.clone(), row.day.clone());
            if seen.insert(key) {
                out.push(row);
            }
        }
        CaseData { rows: out }
    }

    /// Load the dataset from a processed CSV file. Columns beyond the ones
    /// declared on [`CaseRow`] are ignored.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for res in reader.deserialize() {
            let row: CaseRow = res?;
            rows.push(row);
        }
        Ok(CaseData::new(rows))
    }

    /// Discard every row reported after the given day.
    pub fn with_cutoff(mut self, day: &str) -> Self {
        self.rows.retain(|row| row.day.as_str() <= day);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted list of distinct country names, as offered by the country
    /// dropdowns.
    pub fn countries(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.country.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Daily series for one country: rows are filtered on the country key and
    /// the selected field is summed over sub-regions within each day. The
    /// result is sorted by day, one entry per distinct day.
    pub fn country_daily(&self, country: &str, variable: Variable) -> Vec<(Day, Real)> {
        let rows = self.rows.iter().filter(|r| r.country == country);
        group_by_day(rows, variable)
    }

    /// Daily totals over the whole dataset, used by the counter and the
    /// all-country time graph.
    pub fn daily_totals(&self, variable: Variable) -> Vec<(Day, Real)> {
        group_by_day(self.rows.iter(), variable)
    }
}

fn group_by_day<'a>(
    rows: impl Iterator<Item = &'a CaseRow>,
    variable: Variable,
) -> Vec<(Day, Real)> {
    let mut acc: BTreeMap<Day, Real> = BTreeMap::new();
    for row in rows {
        *acc.entry(row.day.clone()).or_insert(0.0) += variable.of(row);
    }
    acc.into_iter().collect()
}

/// Truncate a timestamp such as `2020-04-02 23:41:50` to its date part.
fn date_part(s: &str) -> Day {
    match s.find(|c| c == ' ' || c == 'T') {
        Some(idx) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Country-name-keyed population reference. The join against the case dataset
/// is an exact string match; reconciliation between differently-spelled names
/// is expressed through explicit aliases, never through fuzzy matching.
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    rows: Vec<(String, u64)>,
    aliases: BTreeMap<String, String>,
}

impl PopulationTable {
    pub fn new(rows: Vec<(String, u64)>) -> Self {
        PopulationTable {
            rows,
            aliases: BTreeMap::new(),
        }
    }

    /// Load the table from a three-column CSV (name, code, population); the
    /// code column is ignored. Rows with an unparsable population are skipped
    /// with a warning.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for res in reader.records() {
            let record = res?;
            let name = match record.get(0) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => continue,
            };
            match record.get(2).and_then(|s| s.trim().parse::<f64>().ok()) {
                Some(pop) if pop >= 0.0 => rows.push((name, pop as u64)),
                _ => log::warn!("skipping population row for {:?}: bad count", name),
            }
        }
        Ok(PopulationTable::new(rows))
    }

    /// Register an explicit name reconciliation: lookups for `from` resolve
    /// against the table row named `to`.
    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    /// Look up the population for a country. Fails when the key is absent and
    /// also when it matches more than one row, so a bad join can never default
    /// silently.
    pub fn population(&self, country: &str) -> Result<u64> {
        let key = self
            .aliases
            .get(country)
            .map(String::as_str)
            .unwrap_or(country);
        let matches: Vec<u64> = self
            .rows
            .iter()
            .filter(|(name, _)| name == key)
            .map(|&(_, pop)| pop)
            .collect();
        match matches.len() {
            0 => Err(Error::PopulationNotFound(country.to_string())),
            1 => Ok(matches[0]),
            n => Err(Error::AmbiguousPopulation(country.to_string(), n)),
        }
    }
}
