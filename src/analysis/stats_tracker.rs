use crate::battles::Outcome;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Win/loss/draw counters for one key. `games` always equals the sum of the other three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatBucket {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl StatBucket {
    pub fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

/// Finalized counters as handed to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatLine {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f64,
}

impl From<StatBucket> for StatLine {
    fn from(bucket: StatBucket) -> Self {
        StatLine {
            games: bucket.games,
            wins: bucket.wins,
            losses: bucket.losses,
            draws: bucket.draws,
            win_rate: bucket.win_rate(),
        }
    }
}

/// A best-first list and its exact reversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<K> {
    pub best: Vec<(K, StatLine)>,
    pub worst: Vec<(K, StatLine)>,
}

/// Counts outcomes per key, remembering the order keys were first seen.
///
/// First-seen order is what ties fall back to when ranking, which keeps
/// output deterministic for identical input.
#[derive(Debug, Clone)]
pub struct StatsTracker<K> {
    index: HashMap<K, usize>,
    buckets: Vec<(K, StatBucket)>,
}

impl<K> Default for StatsTracker<K> {
    fn default() -> Self {
        StatsTracker {
            index: HashMap::new(),
            buckets: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> StatsTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: K, outcome: Outcome) {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.buckets.len();
                self.index.insert(key.clone(), slot);
                self.buckets.push((key, StatBucket::default()));
                slot
            }
        };
        self.buckets[slot].1.record(outcome);
    }

    pub fn get(&self, key: &K) -> Option<&StatBucket> {
        self.index.get(key).map(|&slot| &self.buckets[slot].1)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Drops keys with fewer than `min_games` games (0 or 1 keeps everything),
    /// sorts by win rate then games, both descending, and reverses that list
    /// for the worst-first view.
    pub fn into_ranking(self, min_games: usize) -> Ranking<K> {
        let mut best: Vec<(K, StatLine)> = self
            .buckets
            .into_iter()
            .filter(|(_, bucket)| bucket.games >= min_games)
            .map(|(key, bucket)| (key, StatLine::from(bucket)))
            .collect();

        best.sort_by(|(_, a), (_, b)| compare_desc(a, b));

        let mut worst = best.clone();
        worst.reverse();

        Ranking { best, worst }
    }

    /// All keys, most games first.
    pub fn into_by_games(self) -> Vec<(K, StatLine)> {
        let mut lines: Vec<(K, StatLine)> = self
            .buckets
            .into_iter()
            .map(|(key, bucket)| (key, StatLine::from(bucket)))
            .collect();

        lines.sort_by(|(_, a), (_, b)| b.games.cmp(&a.games));
        lines
    }
}

impl<K: Eq + Hash + Clone> Extend<(K, Outcome)> for StatsTracker<K> {
    fn extend<I: IntoIterator<Item = (K, Outcome)>>(&mut self, iter: I) {
        for (key, outcome) in iter {
            self.record(key, outcome);
        }
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, Outcome)> for StatsTracker<K> {
    fn from_iter<I: IntoIterator<Item = (K, Outcome)>>(iter: I) -> Self {
        let mut tracker = StatsTracker::new();
        tracker.extend(iter);
        tracker
    }
}

fn compare_desc(a: &StatLine, b: &StatLine) -> Ordering {
    b.win_rate
        .partial_cmp(&a.win_rate)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.games.cmp(&a.games))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::{Draw, Loss, Win};

    #[test]
    fn bucket_counts_add_up() {
        let tracker: StatsTracker<&str> = vec![("a", Win), ("a", Loss), ("a", Draw), ("b", Win)]
            .into_iter()
            .collect();

        let a = tracker.get(&"a").unwrap();
        assert_eq!((a.games, a.wins, a.losses, a.draws), (3, 1, 1, 1));
        assert_eq!(a.games, a.wins + a.losses + a.draws);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn empty_bucket_has_zero_win_rate() {
        assert_eq!(StatBucket::default().win_rate(), 0.0);
    }

    #[test]
    fn ranking_sorts_by_win_rate_then_games() {
        let tracker: StatsTracker<&str> = vec![
            ("half", Win),
            ("half", Loss),
            ("perfect_small", Win),
            ("perfect_big", Win),
            ("perfect_big", Win),
            ("zero", Loss),
        ]
        .into_iter()
        .collect();

        let ranking = tracker.into_ranking(1);
        let order: Vec<&str> = ranking.best.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec!["perfect_big", "perfect_small", "half", "zero"]);
    }

    #[test]
    fn worst_is_the_exact_reversal_of_best() {
        // "x" and "y" tie on both sort keys.
        let tracker: StatsTracker<&str> = vec![("x", Win), ("y", Win), ("z", Loss), ("x", Loss), ("y", Loss)]
            .into_iter()
            .collect();

        let ranking = tracker.into_ranking(0);
        let best: Vec<&str> = ranking.best.iter().map(|(k, _)| *k).collect();
        let worst: Vec<&str> = ranking.worst.iter().map(|(k, _)| *k).collect();

        assert_eq!(best, vec!["x", "y", "z"]);
        assert_eq!(worst, vec!["z", "y", "x"]);
    }

    #[test]
    fn min_games_filters_small_samples() {
        let tracker: StatsTracker<&str> = vec![("rare", Win), ("rare", Win), ("common", Loss), ("common", Loss), ("common", Win)]
            .into_iter()
            .collect();

        let ranking = tracker.clone().into_ranking(3);
        assert_eq!(ranking.best.len(), 1);
        assert_eq!(ranking.best[0].0, "common");

        assert_eq!(tracker.clone().into_ranking(0).best.len(), 2);
        assert_eq!(tracker.into_ranking(1).best.len(), 2);
    }

    #[test]
    fn by_games_is_stable_on_ties() {
        let tracker: StatsTracker<&str> = vec![("first", Win), ("second", Loss), ("third", Win), ("third", Draw)]
            .into_iter()
            .collect();

        let order: Vec<&str> = tracker.into_by_games().iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec!["third", "first", "second"]);
    }
}
