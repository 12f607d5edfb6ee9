use pyo3::prelude::*;

extern crate pyo3;
use episir::prelude as rs;
use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pythonize::pythonize;

fn to_py_err(err: rs::Error) -> PyErr {
    match err {
        rs::Error::NoObservationsFound(_)
        | rs::Error::PopulationNotFound(_)
        | rs::Error::AmbiguousPopulation(..) => PyKeyError::new_err(err.to_string()),
        rs::Error::IntegrationFailure { .. } => PyValueError::new_err(err.to_string()),
        _ => PyIOError::new_err(err.to_string()),
    }
}

/// SIR coefficients exposed to the dashboard's Beta/Gamma inputs.
#[pyclass]
#[derive(Debug, Clone)]
pub struct SirParams {
    data: rs::SirParams,
}

#[pymethods]
impl SirParams {
    #[new]
    #[pyo3(signature = (beta = 1.1e-8, gamma = 0.05))]
    fn new(beta: f64, gamma: f64) -> Self {
        SirParams {
            data: rs::SirParams::new(beta, gamma),
        }
    }

    #[getter]
    fn get_beta(&self) -> PyResult<f64> {
        Ok(self.data.beta())
    }

    #[setter]
    fn set_beta(&mut self, value: f64) -> PyResult<()> {
        self.data.set_beta(value);
        Ok(())
    }

    #[getter]
    fn get_gamma(&self) -> PyResult<f64> {
        Ok(self.data.gamma())
    }

    #[setter]
    fn set_gamma(&mut self, value: f64) -> PyResult<()> {
        self.data.set_gamma(value);
        Ok(())
    }

    fn __repr__(&self) -> PyResult<String> {
        Ok(format!("{:?}", self.data))
    }
}

/// Read-only handle over the loaded case dataset and population table. The
/// Dash callbacks construct one at startup and query it per UI event.
#[pyclass]
#[derive(Debug)]
pub struct Explorer {
    data: rs::CaseData,
    populations: rs::PopulationTable,
}

#[pymethods]
impl Explorer {
    #[new]
    #[pyo3(signature = (data_file, population_file, cutoff_day = None))]
    fn new(data_file: &str, population_file: &str, cutoff_day: Option<&str>) -> PyResult<Self> {
        let mut data = rs::CaseData::from_csv_path(data_file).map_err(to_py_err)?;
        if let Some(day) = cutoff_day {
            data = data.with_cutoff(day);
        }
        let populations = rs::PopulationTable::from_csv_path(population_file).map_err(to_py_err)?;
        Ok(Explorer { data, populations })
    }

    /// Sorted country names for the dropdowns.
    fn countries(&self) -> PyResult<Vec<String>> {
        Ok(self.data.countries())
    }

    fn population(&self, country: &str) -> PyResult<u64> {
        self.populations.population(country).map_err(to_py_err)
    }

    /// Daily (day, value) pairs for one country, or totals over every
    /// country when `country` is omitted. `variable` is one of the radio
    /// item labels: Confirmed, Deaths, Recovered, Active.
    #[pyo3(signature = (variable, country = None))]
    fn daily(&self, variable: &str, country: Option<&str>) -> PyResult<Vec<(String, f64)>> {
        let variable = rs::Variable::from_name(variable)
            .ok_or_else(|| PyValueError::new_err(format!("unknown variable {:?}", variable)))?;
        Ok(match country {
            Some(country) => self.data.country_daily(country, variable),
            None => self.data.daily_totals(variable),
        })
    }

    /// Run the SIR simulation for one country and return the chart value
    /// object (simulated S/I/R plus observed active) as a Python dict.
    #[pyo3(signature = (country, params = None))]
    fn simulate(&self, py: Python, country: &str, params: Option<SirParams>) -> PyResult<PyObject> {
        let params = params.map(|p| p.data).unwrap_or_default();
        let series = rs::ObservationSeries::from_data(&self.data, &self.populations, country)
            .map_err(to_py_err)?;
        let trajectory = rs::simulate(&series, &params).map_err(to_py_err)?;
        let chart = rs::ModelChart::new(&trajectory, &series);
        pythonize(py, &chart).map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

#[pymodule]
fn episir_py(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<SirParams>()?;
    m.add_class::<Explorer>()?;
    Ok(())
}
