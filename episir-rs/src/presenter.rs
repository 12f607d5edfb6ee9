use crate::observations::ObservationSeries;
use crate::solve::Trajectory;
use crate::Real;
use serde::Serialize;

/// A named series of values over the shared day index, ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<Real>,
}

impl Series {
    fn new(name: &str, values: Vec<Real>) -> Self {
        Series {
            name: name.to_string(),
            values,
        }
    }
}

/// Value object handed to the chart renderer: the three simulated
/// compartments plus the observed active series, aligned one-to-one on the
/// index 0..nb_steps-1. No resampling is performed; the observation series
/// has exactly one point per simulated day by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelChart {
    pub country: String,
    pub susceptible: Series,
    pub infected: Series,
    pub recovered: Series,
    pub observed_active: Series,
}

impl ModelChart {
    pub fn new(trajectory: &Trajectory, series: &ObservationSeries) -> Self {
        ModelChart {
            country: series.country().clone(),
            susceptible: Series::new("Susceptible", trajectory.susceptible()),
            infected: Series::new("Infected", trajectory.infected()),
            recovered: Series::new("Recovered", trajectory.recovered()),
            observed_active: Series::new("True Active", series.active()),
        }
    }

    /// Number of samples on the shared index.
    pub fn nb_steps(&self) -> usize {
        self.susceptible.values.len()
    }

    /// Render the chart as CSV, one row per day.
    pub fn render_csv(&self, sep: char) -> String {
        let mut data = format!(
            "t{sep}susceptible{sep}infected{sep}recovered{sep}true_active",
            sep = sep
        );
        for t in 0..self.nb_steps() {
            data.push('\n');
            data.push_str(&format!(
                "{}{}{}{}{}{}{}{}{}",
                t,
                sep,
                self.susceptible.values[t],
                sep,
                self.infected.values[t],
                sep,
                self.recovered.values[t],
                sep,
                self.observed_active.values[t]
            ));
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CaseData, CaseRow, PopulationTable};
    use crate::model::SirParams;
    use crate::solve;

    fn fixture() -> (Trajectory, ObservationSeries) {
        let row = |day: &str, active: Real| CaseRow {
            country: "Freedonia".to_string(),
            province: None,
            day: day.to_string(),
            confirmed: active,
            deaths: 0.0,
            recovered: 0.0,
            active,
        };
        let data = CaseData::new(vec![
            row("2020-03-01", 10.0),
            row("2020-03-02", 15.0),
            row("2020-03-03", 9.0),
            row("2020-03-04", 7.0),
        ]);
        let pops = PopulationTable::new(vec![("Freedonia".to_string(), 1000)]);
        let series = ObservationSeries::from_data(&data, &pops, "Freedonia").unwrap();
        let traj = solve::simulate(&series, &SirParams::default()).unwrap();
        (traj, series)
    }

    #[test]
    fn aligns_simulation_and_observation() {
        let (traj, series) = fixture();
        assert_eq!(traj.len(), 4);
        assert_eq!(traj.states()[0].s, 1000.0);
        assert_eq!(traj.states()[0].i, 1.0);
        assert_eq!(traj.states()[0].r, 0.0);

        let chart = ModelChart::new(&traj, &series);
        assert_eq!(chart.nb_steps(), 4);
        assert_eq!(chart.country, "Freedonia");
        assert_eq!(chart.observed_active.values, vec![10.0, 15.0, 9.0, 7.0]);
        assert_eq!(chart.susceptible.name, "Susceptible");
        assert_eq!(chart.infected.values.len(), 4);
        assert_eq!(chart.recovered.values.len(), 4);
    }

    #[test]
    fn csv_has_one_row_per_day() {
        let (traj, series) = fixture();
        let csv = ModelChart::new(&traj, &series).render_csv(',');
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "t,susceptible,infected,recovered,true_active");
        assert!(lines[1].starts_with("0,1000,1,0,10"));
    }
}
