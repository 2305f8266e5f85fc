use fxhash::FxHashMap;
use ndarray::Array1;
use std::hash::Hash;

use crate::{
    algo::{match_lengths, match_lengths_of},
    error::EntropyError,
    structs::Sequence,
};

/// Weight of the first and last positions, which are never scanned.
pub const BOUNDARY_CONTRIBUTION: usize = 1 + 2;

/// Shannon entropy in bits of a probability vector.
pub fn entropy(arr: Array1<f64>) -> f64 {
    let arr = arr
        .into_iter()
        .filter(|&x| x > 0.)
        .collect::<Array1<f64>>();

    let arr_log = arr.mapv(f64::log2);

    0. - (arr * arr_log).sum()
}

/// Entropy rate of a sequence of length `n` from its interior match lengths.
pub fn entropy_rate(n: usize, match_lengths: &[usize]) -> Result<f64, EntropyError> {
    if n == 0 {
        return Err(EntropyError::EmptyInput);
    }

    Ok(rate(n, match_lengths))
}

fn rate(n: usize, match_lengths: &[usize]) -> f64 {
    let sum_lambda = BOUNDARY_CONTRIBUTION + match_lengths.iter().sum::<usize>();
    let n = n as f64;

    n * n.log2() / sum_lambda as f64
}

pub fn real_entropy(sequence: &Sequence) -> f64 {
    rate(sequence.len(), &match_lengths(sequence))
}

pub fn random_entropy(sequence: &Sequence) -> f64 {
    (sequence.distinct() as f64).log2()
}

/// Share of visits spent at each location, in order of first visit.
pub fn visit_frequencies(sequence: &Sequence) -> Vec<f64> {
    let mut counts = vec![0usize; sequence.distinct()];
    for &id in sequence.symbols() {
        counts[id as usize] += 1;
    }

    let n = sequence.len() as f64;
    counts.into_iter().map(|c| c as f64 / n).collect()
}

pub fn uncorrelated_entropy(sequence: &Sequence, normalize: bool) -> f64 {
    let entropy = entropy(Array1::from_vec(visit_frequencies(sequence)));
    normalized(entropy, sequence.distinct(), normalize)
}

fn normalized(entropy: f64, distinct: usize, normalize: bool) -> f64 {
    match (normalize, distinct) {
        (false, _) => entropy,
        // a single location carries no information to normalize against
        (true, 0..=1) => 0.,
        (true, distinct) => entropy / (distinct as f64).log2(),
    }
}

fn counts_of<T: Copy + Eq + Hash>(symbols: &[T]) -> FxHashMap<T, usize> {
    let mut counts = FxHashMap::default();
    for &symbol in symbols {
        *counts.entry(symbol).or_default() += 1;
    }
    counts
}

pub fn real_entropy_of<T: Copy + Eq + Hash>(symbols: &[T]) -> Result<f64, EntropyError> {
    entropy_rate(symbols.len(), &match_lengths_of(symbols))
}

pub fn random_entropy_of<T: Copy + Eq + Hash>(symbols: &[T]) -> Result<f64, EntropyError> {
    if symbols.is_empty() {
        return Err(EntropyError::EmptyInput);
    }

    Ok((counts_of(symbols).len() as f64).log2())
}

pub fn uncorrelated_entropy_of<T: Copy + Eq + Hash>(
    symbols: &[T],
    normalize: bool,
) -> Result<f64, EntropyError> {
    if symbols.is_empty() {
        return Err(EntropyError::EmptyInput);
    }

    let n = symbols.len() as f64;
    let counts = counts_of(symbols);
    let probs = counts
        .values()
        .map(|&c| c as f64 / n)
        .collect::<Array1<f64>>();

    Ok(normalized(entropy(probs), counts.len(), normalize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::LocationSymbol;
    use rstest::rstest;

    const EPS: f64 = 1e-12;

    fn sequence(s: &str) -> Sequence {
        let symbols = s
            .chars()
            .map(|c| LocationSymbol::new(c as u32 as f64, 0.).unwrap())
            .collect::<Vec<_>>();
        Sequence::extract(&symbols).unwrap()
    }

    #[rstest]
    #[case("a", 0.)]
    #[case("ab", 2. / 3.)]
    #[case("ba", 2. / 3.)]
    #[case("aaa", 3f64.log2() / 2.)]
    #[case("ababab", 6. * 6f64.log2() / 14.)]
    #[case("abcdef", 6. * 6f64.log2() / 7.)]
    fn real_entropy_ok(#[case] s: &str, #[case] expected: f64) {
        let seq = sequence(s);
        assert!((real_entropy(&seq) - expected).abs() < EPS);

        let chars = s.chars().collect::<Vec<_>>();
        assert!((real_entropy_of(&chars).unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn repetition_lowers_real_entropy() {
        let repetitive = real_entropy(&sequence("ababab"));
        let distinct = real_entropy(&sequence("abcdef"));
        assert!(repetitive < distinct);
    }

    #[rstest]
    #[case("a", 0.)]
    #[case("aaaa", 0.)]
    #[case("abcd", 2.)]
    #[case("abcdefgh", 3.)]
    #[case("abab", 1.)]
    fn random_entropy_ok(#[case] s: &str, #[case] expected: f64) {
        assert!((random_entropy(&sequence(s)) - expected).abs() < EPS);
        let chars = s.chars().collect::<Vec<_>>();
        assert!((random_entropy_of(&chars).unwrap() - expected).abs() < EPS);
    }

    #[rstest]
    #[case("a", false, 0.)]
    #[case("aaaa", false, 0.)]
    #[case("aaaa", true, 0.)]
    #[case("ab", false, 1.)]
    #[case("aabb", true, 1.)]
    #[case("abcd", false, 2.)]
    #[case("aaab", false, 0.8112781244591328)]
    #[case("aabc", true, 1.5 / 3f64.log2())]
    fn uncorrelated_entropy_ok(#[case] s: &str, #[case] normalize: bool, #[case] expected: f64) {
        assert!((uncorrelated_entropy(&sequence(s), normalize) - expected).abs() < EPS);
        let chars = s.chars().collect::<Vec<_>>();
        assert!((uncorrelated_entropy_of(&chars, normalize).unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn visit_frequencies_sum_to_one() {
        let freqs = visit_frequencies(&sequence("abacabad"));
        assert_eq!(freqs, vec![0.5, 0.25, 0.125, 0.125]);
    }

    #[test]
    fn entropy_rate_aggregates_lengths() {
        assert_eq!(entropy_rate(1, &[]).unwrap(), 0.);
        assert!((entropy_rate(2, &[]).unwrap() - 2. / 3.).abs() < EPS);
        assert!((entropy_rate(4, &[1, 4]).unwrap() - 1.).abs() < EPS);
    }

    #[test]
    fn empty_input_is_rejected() {
        let empty: [u32; 0] = [];
        assert!(matches!(entropy_rate(0, &[]), Err(EntropyError::EmptyInput)));
        assert!(matches!(real_entropy_of(&empty), Err(EntropyError::EmptyInput)));
        assert!(matches!(random_entropy_of(&empty), Err(EntropyError::EmptyInput)));
        assert!(matches!(
            uncorrelated_entropy_of(&empty, true),
            Err(EntropyError::EmptyInput)
        ));
    }

    #[test]
    fn estimates_are_repeatable() {
        let seq = sequence("abcabcaabbcc");
        assert_eq!(real_entropy(&seq), real_entropy(&seq));
        assert_eq!(
            uncorrelated_entropy(&seq, true),
            uncorrelated_entropy(&seq, true)
        );
    }
}
