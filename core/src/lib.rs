pub mod algo;
pub mod data;
pub mod entropy;
pub mod error;
pub mod individual;
pub mod options;
pub mod structs;
mod translator;

pub use algo::{match_lengths, match_lengths_of};
pub use entropy::{random_entropy, real_entropy, uncorrelated_entropy};
pub use error::EntropyError;
pub use options::{EntropyOptions, Measure};
pub use structs::{Located, LocationRecord, LocationSymbol, Sequence};
pub use translator::Translator;
