use chrono::NaiveDateTime;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::error::EntropyError;

/// A visited location. Two symbols are equal iff both coordinates are equal.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct LocationSymbol {
    lat: f64,
    lng: f64,
}

impl LocationSymbol {
    pub fn new(lat: f64, lng: f64) -> Result<Self, EntropyError> {
        if lat.is_nan() || lng.is_nan() {
            return Err(EntropyError::InvalidCoordinate { lat, lng });
        }

        // -0.0 and 0.0 name the same place
        Ok(Self {
            lat: lat + 0.,
            lng: lng + 0.,
        })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    fn bits(&self) -> (u64, u64) {
        (self.lat.to_bits(), self.lng.to_bits())
    }
}

#[derive(Deserialize)]
struct RawLocation {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawLocation> for LocationSymbol {
    type Error = EntropyError;

    fn try_from(RawLocation { lat, lng }: RawLocation) -> Result<Self, Self::Error> {
        Self::new(lat, lng)
    }
}

impl PartialEq for LocationSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for LocationSymbol {}

impl Hash for LocationSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl fmt::Display for LocationSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

pub trait Located {
    fn location(&self) -> LocationSymbol;
}

impl Located for LocationSymbol {
    fn location(&self) -> LocationSymbol {
        *self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationRecord {
    pub uid: String,
    pub location: LocationSymbol,
    pub datetime: NaiveDateTime,
}

impl LocationRecord {
    pub fn new(
        uid: impl Into<String>,
        lat: f64,
        lng: f64,
        datetime: NaiveDateTime,
    ) -> Result<Self, EntropyError> {
        Ok(Self {
            uid: uid.into(),
            location: LocationSymbol::new(lat, lng)?,
            datetime,
        })
    }
}

impl Located for LocationRecord {
    fn location(&self) -> LocationSymbol {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxhash::FxHashSet;

    #[test]
    fn signed_zero_is_one_location() {
        let a = LocationSymbol::new(0., -0.).unwrap();
        let b = LocationSymbol::new(-0., 0.).unwrap();
        assert_eq!(a, b);

        let set = [a, b].into_iter().collect::<FxHashSet<_>>();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn coordinates_are_not_interchangeable() {
        let a = LocationSymbol::new(1., 2.).unwrap();
        let b = LocationSymbol::new(2., 1.).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn nan_is_rejected() {
        assert!(matches!(
            LocationSymbol::new(f64::NAN, 1.),
            Err(EntropyError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn deserializing_folds_signed_zero() {
        let parsed: LocationSymbol = serde_json::from_str(r#"{"lat":-0.0,"lng":0.0}"#).unwrap();
        assert_eq!(parsed, LocationSymbol::new(0., 0.).unwrap());
        assert!(parsed.lat().is_sign_positive());

        let record: LocationRecord = serde_json::from_str(
            r#"{"uid":"1","location":{"lat":-0.0,"lng":2.5},"datetime":"2008-10-23T13:53:05"}"#,
        )
        .unwrap();
        assert_eq!(record.location, LocationSymbol::new(0., 2.5).unwrap());
    }

    #[test]
    fn deserializing_rejects_nan() {
        let raw = RawLocation {
            lat: f64::NAN,
            lng: 1.,
        };
        assert!(matches!(
            LocationSymbol::try_from(raw),
            Err(EntropyError::InvalidCoordinate { .. })
        ));
        assert!(serde_json::from_str::<LocationSymbol>(r#"{"lat":NaN,"lng":1.0}"#).is_err());
    }
}
