use crate::data::{CaseData, PopulationTable, Variable};
use crate::error::{Error, Result};
use crate::{Day, Real};
use getset::{CopyGetters, Getters};

/// Observed active-case curve for one country: day-summed counts sorted
/// ascending, one point per distinct day, plus the country's population.
///
/// Built once per simulation request and immutable afterwards. The number of
/// distinct days doubles as the simulation's day count, so an empty series is
/// rejected here and the solver is never invoked over an empty time span.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct ObservationSeries {
    #[getset(get = "pub")]
    country: String,
    #[getset(get = "pub")]
    points: Vec<(Day, Real)>,
    #[getset(get_copy = "pub")]
    total_population: u64,
}

impl ObservationSeries {
    /// Derive the series for `country` from the shared dataset and the
    /// population reference.
    ///
    /// Fails with [`Error::NoObservationsFound`] when the country has no rows
    /// and with [`Error::PopulationNotFound`] (or
    /// [`Error::AmbiguousPopulation`]) when the population join cannot be
    /// resolved. Both checks run before any integration is attempted.
    pub fn from_data(
        data: &CaseData,
        populations: &PopulationTable,
        country: &str,
    ) -> Result<Self> {
        let points = data.country_daily(country, Variable::Active);
        if points.is_empty() {
            return Err(Error::NoObservationsFound(country.to_string()));
        }
        let total_population = populations.population(country)?;
        if points.iter().any(|&(_, active)| active < 0.0) {
            log::warn!("{}: negative active counts in the observed series", country);
        }
        Ok(ObservationSeries {
            country: country.to_string(),
            points,
            total_population,
        })
    }

    /// Number of distinct observed days; also the simulation's day count.
    pub fn nb_steps(&self) -> usize {
        self.points.len()
    }

    /// The active counts in day order.
    pub fn active(&self) -> Vec<Real> {
        self.points.iter().map(|&(_, active)| active).collect()
    }
}
