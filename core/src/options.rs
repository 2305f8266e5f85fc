use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    #[strum(to_string = "random_entropy", serialize = "random")]
    Random,
    #[strum(to_string = "uncorrelated_entropy", serialize = "uncorrelated")]
    Uncorrelated,
    #[strum(to_string = "real_entropy", serialize = "real")]
    Real,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyOptions {
    pub measures: Vec<Measure>,
    /// Divide the uncorrelated entropy by log2 of the number of distinct locations.
    pub normalize: bool,
}

impl Default for EntropyOptions {
    fn default() -> Self {
        Self {
            measures: Measure::iter().collect(),
            normalize: false,
        }
    }
}
