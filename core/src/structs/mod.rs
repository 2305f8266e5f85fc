pub mod location;
pub mod sequence;

use core::fmt;

pub use location::{Located, LocationRecord, LocationSymbol};
use serde::{Deserialize, Serialize};
pub use sequence::Sequence;

use crate::options::Measure;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndividualMeasures {
    pub uid: String,
    pub random: Option<f64>,
    pub uncorrelated: Option<f64>,
    pub real: Option<f64>,
}

impl IndividualMeasures {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    pub fn get(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Random => self.random,
            Measure::Uncorrelated => self.uncorrelated,
            Measure::Real => self.real,
        }
    }

    pub fn set(&mut self, measure: Measure, value: f64) {
        match measure {
            Measure::Random => self.random = Some(value),
            Measure::Uncorrelated => self.uncorrelated = Some(value),
            Measure::Real => self.real = Some(value),
        }
    }
}

/// One row per individual, ordered by uid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureTable {
    pub measures: Vec<Measure>,
    pub rows: Vec<IndividualMeasures>,
}

impl fmt::Display for MeasureTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uid")?;
        for measure in &self.measures {
            write!(f, ",{measure}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{}", row.uid)?;
            for &measure in &self.measures {
                match row.get(measure) {
                    Some(value) => write!(f, ",{value}")?,
                    None => write!(f, ",")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
