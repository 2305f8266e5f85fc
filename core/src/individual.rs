use itertools::Itertools;
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    entropy::{random_entropy, real_entropy, uncorrelated_entropy},
    error::EntropyError,
    options::{EntropyOptions, Measure},
    structs::{IndividualMeasures, Located, LocationRecord, MeasureTable, Sequence},
};

const PROGRESS_EVERY: usize = 1000;

/// Splits records per individual, each partition sorted by time.
pub fn group_by_individual(
    records: Vec<LocationRecord>,
) -> BTreeMap<String, Vec<LocationRecord>> {
    records
        .into_iter()
        .into_group_map_by(|r| r.uid.clone())
        .into_iter()
        .map(|(uid, mut records)| {
            records.sort_by_key(|r| r.datetime);
            (uid, records)
        })
        .collect()
}

/// Applies `f` to every partition, returning the results ordered by key.
pub fn map_individuals<K, R, O, F>(groups: &BTreeMap<K, Vec<R>>, f: F) -> Vec<(K, O)>
where
    K: Clone + Ord + Send + Sync,
    R: Sync,
    O: Send,
    F: Fn(&K, &[R]) -> O + Send + Sync,
{
    let total = groups.len();
    let done = AtomicUsize::new(0);

    let apply = |(key, records): (&K, &Vec<R>)| {
        let output = f(key, records);

        let done = done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % PROGRESS_EVERY == 0 || done == total {
            log::info!("processed {done}/{total} individuals");
        }

        (key.clone(), output)
    };

    #[cfg(feature = "parallel")]
    let mut results = groups.par_iter().map(apply).collect::<Vec<_>>();

    #[cfg(not(feature = "parallel"))]
    let mut results = groups.iter().map(apply).collect::<Vec<_>>();

    results.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
    results
}

pub fn individual_measures<R: Located>(
    uid: &str,
    records: &[R],
    options: &EntropyOptions,
) -> Result<IndividualMeasures, EntropyError> {
    let sequence = Sequence::extract(records)?;
    if sequence.len() == 1 {
        log::warn!("individual {uid} has a single record, its entropies are 0");
    }

    let mut row = IndividualMeasures::new(uid);
    for &measure in &options.measures {
        let value = match measure {
            Measure::Random => random_entropy(&sequence),
            Measure::Uncorrelated => uncorrelated_entropy(&sequence, options.normalize),
            Measure::Real => real_entropy(&sequence),
        };
        row.set(measure, value);
    }

    Ok(row)
}

pub fn compute_measures(
    groups: &BTreeMap<String, Vec<LocationRecord>>,
    options: &EntropyOptions,
) -> Result<MeasureTable, EntropyError> {
    let rows = map_individuals(groups, |uid, records| {
        individual_measures(uid, records, options)
    })
    .into_iter()
    .map(|(_, row)| row)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(MeasureTable {
        measures: options.measures.clone(),
        rows,
    })
}
