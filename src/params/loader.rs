//! Load parameter sets from CSV scenario files and JSON configs

use super::{ParameterInputs, Parameters};
use crate::error::Result;
use csv::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw CSV row: one named scenario per line
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    roi_real_estate: f64,
    roi_stocks: f64,
    mortgage_interest_rate: f64,
    base_house_misc_costs: f64,
    downpayment_ratio: f64,
    base_house_equity: f64,
    price_to_rent_ratio: f64,
    num_years: u32,
    #[serde(default)]
    monthly_income: f64,
}

impl CsvRow {
    fn into_scenario(self) -> Result<NamedParameters> {
        let params = Parameters::new(ParameterInputs {
            roi_real_estate: self.roi_real_estate,
            roi_stocks: self.roi_stocks,
            mortgage_interest_rate: self.mortgage_interest_rate,
            base_house_misc_costs: self.base_house_misc_costs,
            downpayment_ratio: self.downpayment_ratio,
            base_house_equity: self.base_house_equity,
            price_to_rent_ratio: self.price_to_rent_ratio,
            num_years: self.num_years,
            monthly_income: self.monthly_income,
        });
        params.validate()?;
        Ok(NamedParameters { name: self.name, params })
    }
}

/// A parameter set labelled for batch reports
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParameters {
    pub name: String,
    pub params: Parameters,
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<NamedParameters>> {
    let path = path.as_ref();
    log::debug!("Loading scenarios from {}", path.display());
    let reader = Reader::from_path(path)?;
    read_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NamedParameters>> {
    read_scenarios(Reader::from_reader(reader))
}

fn read_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<NamedParameters>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    log::debug!("Loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}

/// Load a single set of inputs from a JSON file
///
/// Missing fields take their [`ParameterInputs::default`] values.
pub fn load_inputs_json<P: AsRef<Path>>(path: P) -> Result<ParameterInputs> {
    let file = File::open(path)?;
    let inputs = serde_json::from_reader(BufReader::new(file))?;
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    const SCENARIOS: &str = "\
name,roi_real_estate,roi_stocks,mortgage_interest_rate,base_house_misc_costs,downpayment_ratio,base_house_equity,price_to_rent_ratio,num_years,monthly_income
baseline,0.05,0.07,0.04,0.02,0.2,500000,25,30,8000
no_growth,0,0,0,0,0.2,500000,25,30,0
";

    #[test]
    fn test_load_scenarios_from_reader() {
        let scenarios = load_scenarios_from_reader(SCENARIOS.as_bytes()).expect("Failed to load scenarios");
        assert_eq!(scenarios.len(), 2);

        let baseline = &scenarios[0];
        assert_eq!(baseline.name, "baseline");
        assert_relative_eq!(baseline.params.base_rent_per_year(), 20_000.0);
        assert_relative_eq!(baseline.params.monthly_income(), 8_000.0);
        assert_eq!(baseline.params.num_years(), 30);

        assert_eq!(scenarios[1].name, "no_growth");
        assert_relative_eq!(scenarios[1].params.roi_stocks(), 0.0);
    }

    #[test]
    fn test_invalid_row_is_rejected() {
        let csv = "\
name,roi_real_estate,roi_stocks,mortgage_interest_rate,base_house_misc_costs,downpayment_ratio,base_house_equity,price_to_rent_ratio,num_years,monthly_income
broken,0.05,0.07,0.04,0.02,0.2,500000,0,30,0
";
        let err = load_scenarios_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { field: "price_to_rent_ratio", .. }));
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let csv = "\
name,roi_real_estate,roi_stocks,mortgage_interest_rate,base_house_misc_costs,downpayment_ratio,base_house_equity,price_to_rent_ratio,num_years,monthly_income
broken,abc,0.07,0.04,0.02,0.2,500000,25,30,0
";
        let err = load_scenarios_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let inputs: ParameterInputs =
            serde_json::from_str(r#"{"base_house_equity": 400000, "num_years": 15}"#).unwrap();
        assert_relative_eq!(inputs.base_house_equity, 400_000.0);
        assert_eq!(inputs.num_years, 15);
        assert_relative_eq!(inputs.price_to_rent_ratio, ParameterInputs::default().price_to_rent_ratio);
    }

    #[test]
    fn test_missing_json_file_is_io_error() {
        let err = load_inputs_json("does/not/exist.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
