use fxhash::FxHashMap;
use std::hash::Hash;

use crate::structs::Sequence;

#[derive(Debug, Clone)]
struct State<T> {
    len: usize,
    link: Option<usize>,
    // end index of the first occurrence of the strings in this state
    first_end: usize,
    next: FxHashMap<T, usize>,
}

impl<T> State<T> {
    fn new(len: usize, first_end: usize) -> Self {
        Self {
            len,
            link: None,
            first_end,
            next: FxHashMap::default(),
        }
    }
}

/// Suffix automaton over a sequence of atomic symbols.
///
/// Every substring of the sequence is recognized by walking transitions from
/// the root. Alongside the usual length and suffix link, each state keeps the
/// end index of the first occurrence of its substrings, which answers "does
/// this substring occur inside `symbols[..i]`" in constant time.
#[derive(Debug, Clone)]
pub struct SuffixAutomaton<T> {
    states: Vec<State<T>>,
}

impl<T: Copy + Eq + Hash> SuffixAutomaton<T> {
    pub const ROOT: usize = 0;

    pub fn build(symbols: &[T]) -> Self {
        let mut states = Vec::with_capacity(2 * symbols.len() + 1);
        states.push(State::new(0, 0));
        let mut last = Self::ROOT;

        for (pos, &c) in symbols.iter().enumerate() {
            let cur = states.len();
            states.push(State::new(states[last].len + 1, pos));

            let mut p = Some(last);
            let mut existing = None;
            while let Some(v) = p {
                if let Some(&q) = states[v].next.get(&c) {
                    existing = Some((v, q));
                    break;
                }
                states[v].next.insert(c, cur);
                p = states[v].link;
            }

            match existing {
                None => states[cur].link = Some(Self::ROOT),
                Some((v, q)) if states[v].len + 1 == states[q].len => {
                    states[cur].link = Some(q);
                }
                Some((v, q)) => {
                    let clone = states.len();
                    let cloned = State {
                        len: states[v].len + 1,
                        link: states[q].link,
                        first_end: states[q].first_end,
                        next: states[q].next.clone(),
                    };
                    states.push(cloned);

                    let mut p = Some(v);
                    while let Some(u) = p {
                        match states[u].next.get_mut(&c) {
                            Some(target) if *target == q => *target = clone,
                            _ => break,
                        }
                        p = states[u].link;
                    }

                    states[q].link = Some(clone);
                    states[cur].link = Some(clone);
                }
            }

            last = cur;
        }

        log::debug!(
            "suffix automaton: {} symbols, {} states",
            symbols.len(),
            states.len()
        );

        Self { states }
    }

    #[cfg(test)]
    fn size(&self) -> usize {
        self.states.len()
    }

    pub fn step(&self, state: usize, symbol: T) -> Option<usize> {
        self.states[state].next.get(&symbol).copied()
    }

    pub fn first_end(&self, state: usize) -> usize {
        self.states[state].first_end
    }

    /// Moves to the state holding the suffix of length `len` of the strings in
    /// `state`, given `len` is at most one shorter than what `state` held.
    fn shorten(&self, state: usize, len: usize) -> usize {
        match self.states[state].link {
            Some(link) if len <= self.states[link].len => link,
            _ => state,
        }
    }

    /// Whether `pattern` occurs as a contiguous run of the indexed sequence.
    #[cfg(test)]
    fn contains(&self, pattern: &[T]) -> bool {
        pattern
            .iter()
            .try_fold(Self::ROOT, |state, &c| self.step(state, c))
            .is_some()
    }
}

/// Match lengths of the interior positions `1..n-1` of `symbols`.
///
/// For position `i`, let `l` be the length of the longest run starting at `i`
/// that also occurs entirely inside `symbols[..i]`. The match length is
/// `l + 1`, unless that run reaches `n - 1` or further, in which case the end
/// of the sequence was hit and the length is `n - i + 1`.
pub fn match_lengths_of<T: Copy + Eq + Hash>(symbols: &[T]) -> Vec<usize> {
    let n = symbols.len();
    if n < 3 {
        return vec![];
    }

    let automaton = SuffixAutomaton::build(symbols);
    let mut lengths = Vec::with_capacity(n - 2);

    // symbols[i..i + len] is recognized by `state` and occurs in symbols[..i]
    let mut state = SuffixAutomaton::<T>::ROOT;
    let mut len = 0;

    for i in 1..n - 1 {
        while i + len < n {
            match automaton.step(state, symbols[i + len]) {
                Some(next) if automaton.first_end(next) < i => {
                    state = next;
                    len += 1;
                }
                _ => break,
            }
        }

        lengths.push(if len + 1 < n - i { len + 1 } else { n - i + 1 });

        // whatever occurred before i still occurs before i + 1
        if len > 0 {
            len -= 1;
            state = automaton.shorten(state, len);
        }
    }

    lengths
}

pub fn match_lengths(sequence: &Sequence) -> Vec<usize> {
    match_lengths_of(sequence.symbols())
}
