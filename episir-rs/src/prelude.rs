pub use crate::config::Config;
pub use crate::data::{CaseData, CaseRow, PopulationTable, Variable};
pub use crate::error::{Error, Result};
pub use crate::model::{SirParams, SirState};
pub use crate::observations::ObservationSeries;
pub use crate::presenter::{ModelChart, Series};
pub use crate::solve::{integrate, simulate, Trajectory};
pub use crate::{Day, Real, Time};
