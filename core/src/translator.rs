use fxhash::FxHashMap;

use crate::structs::LocationSymbol;

/// Interns locations as dense ids, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translator {
    symbol_to_id: FxHashMap<LocationSymbol, u32>,
    id_to_symbol: Vec<LocationSymbol>,
}

impl Translator {
    pub fn intern(&mut self, symbol: LocationSymbol) -> u32 {
        if let Some(&id) = self.symbol_to_id.get(&symbol) {
            return id;
        }

        let id = self.id_to_symbol.len() as u32;
        self.symbol_to_id.insert(symbol, id);
        self.id_to_symbol.push(symbol);
        id
    }

    #[cfg(test)]
    pub(crate) fn to_id(&self, symbol: &LocationSymbol) -> Option<u32> {
        self.symbol_to_id.get(symbol).copied()
    }

    pub fn to_symbol(&self, id: u32) -> Option<LocationSymbol> {
        self.id_to_symbol.get(id as usize).copied()
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.id_to_symbol.len()
    }

    pub(crate) fn locations(&self) -> &[LocationSymbol] {
        &self.id_to_symbol
    }
}
