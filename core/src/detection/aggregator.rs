//! Per-cast consistency tallies

use hashbrown::HashMap;

use super::{CandidateKey, CastWindow, DetectionError};

/// Number of distinct casts during which a candidate was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceTally {
    pub key: CandidateKey,
    pub casts: usize,
}

#[derive(Debug, Clone, Copy)]
struct TallyEntry {
    tally: OccurrenceTally,
    /// Ordinal of the last cast that incremented this tally
    last_cast: usize,
}

/// Accumulates cast windows into occurrence tallies.
///
/// Tallies keep the order in which candidates were first observed.
#[derive(Debug, Default)]
pub struct ConsistencyAggregator {
    total_casts: usize,
    entries: Vec<TallyEntry>,
    index: HashMap<CandidateKey, usize>,
}

impl ConsistencyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one cast. Each candidate counts at most once per cast.
    pub fn record(&mut self, window: &CastWindow) {
        self.total_casts += 1;
        let cast = self.total_casts;

        for key in &window.candidates {
            match self.index.get(key) {
                Some(&idx) => {
                    let entry = &mut self.entries[idx];
                    if entry.last_cast != cast {
                        entry.tally.casts += 1;
                        entry.last_cast = cast;
                    }
                }
                None => {
                    self.index.insert(*key, self.entries.len());
                    self.entries.push(TallyEntry {
                        tally: OccurrenceTally {
                            key: *key,
                            casts: 1,
                        },
                        last_cast: cast,
                    });
                }
            }
        }
    }

    /// Finish aggregation. Zero recorded casts is an input error.
    pub fn finish(self) -> Result<ConsistencyReport, DetectionError> {
        if self.total_casts == 0 {
            return Err(DetectionError::NoCasts);
        }
        Ok(ConsistencyReport {
            total_casts: self.total_casts,
            tallies: self.entries.into_iter().map(|e| e.tally).collect(),
        })
    }
}

/// Final tallies for one ability, `total_casts >= 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyReport {
    total_casts: usize,
    tallies: Vec<OccurrenceTally>,
}

impl ConsistencyReport {
    pub fn total_casts(&self) -> usize {
        self.total_casts
    }

    /// Tallies in first-observed order
    pub fn tallies(&self) -> &[OccurrenceTally] {
        &self.tallies
    }

    pub fn tally(&self, key: &CandidateKey) -> Option<&OccurrenceTally> {
        self.tallies.iter().find(|t| &t.key == key)
    }

    /// Fraction of casts during which the tallied candidate appeared
    pub fn consistency(&self, tally: &OccurrenceTally) -> f64 {
        tally.casts as f64 / self.total_casts as f64
    }
}
