use episir::prelude::*;
use simple_logger::SimpleLogger;
use std::env;
use std::process;

pub fn main() {
    SimpleLogger::new().init().unwrap();

    let path = env::args().nth(1).unwrap_or_else(|| "sir.toml".to_string());
    let config = match Config::from_toml_path(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("cannot read {}: {} (using defaults)", path, err);
            Config::default()
        }
    };

    match run(&config) {
        Ok(chart) => println!("{}", chart.render_csv(',')),
        Err(err) => {
            log::error!("{}: {}", config.country, err);
            process::exit(1);
        }
    }
}

fn run(config: &Config) -> Result<ModelChart> {
    let mut data = CaseData::from_csv_path(&config.data_file)?;
    if let Some(day) = &config.cutoff_day {
        data = data.with_cutoff(day);
    }
    let populations = PopulationTable::from_csv_path(&config.population_file)?;

    let series = ObservationSeries::from_data(&data, &populations, &config.country)?;
    log::info!(
        "{}: {} observed days, population {}",
        series.country(),
        series.nb_steps(),
        series.total_population()
    );

    let trajectory = simulate(&series, &config.params())?;
    Ok(ModelChart::new(&trajectory, &series))
}
