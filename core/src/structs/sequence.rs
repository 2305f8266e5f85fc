use serde::{Deserialize, Serialize};

use crate::{error::EntropyError, translator::Translator};

use super::{Located, LocationSymbol};

/// Time-ordered visits of one individual, as interned location ids.
///
/// Never empty. Repeated visits are kept, consecutive or not. Serialized as
/// the list of visited locations; deserializing goes through [`Sequence::extract`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    try_from = "Vec<LocationSymbol>",
    into = "Vec<LocationSymbol>"
)]
pub struct Sequence {
    symbols: Vec<u32>,
    translator: Translator,
}

impl Sequence {
    /// Extracts the visited locations from `records`, keeping their order.
    pub fn extract<R: Located>(records: &[R]) -> Result<Self, EntropyError> {
        if records.is_empty() {
            return Err(EntropyError::EmptyInput);
        }

        let mut translator = Translator::default();
        let symbols = records
            .iter()
            .map(|r| translator.intern(r.location()))
            .collect::<Vec<_>>();

        Ok(Self {
            symbols,
            translator,
        })
    }

    pub fn symbols(&self) -> &[u32] {
        &self.symbols
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of distinct locations.
    pub fn distinct(&self) -> usize {
        self.translator.len()
    }
}

impl TryFrom<Vec<LocationSymbol>> for Sequence {
    type Error = EntropyError;

    fn try_from(locations: Vec<LocationSymbol>) -> Result<Self, Self::Error> {
        Self::extract(&locations)
    }
}

impl From<Sequence> for Vec<LocationSymbol> {
    fn from(sequence: Sequence) -> Self {
        let locations = sequence.translator.locations();
        sequence
            .symbols
            .iter()
            .map(|&id| locations[id as usize])
            .collect()
    }
}
