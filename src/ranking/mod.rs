mod store;
pub(crate) use self::store::{JsonFileStore, KeyValueStore, MemoryStore, SaveError};
use std::cmp::Ordering;

/// The outcome of one finished session
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Record {
    pub(crate) score: u32,
    /// Length of the session in seconds
    pub(crate) duration: u32,
}

impl Record {
    pub(crate) const fn new(score: u32, duration: u32) -> Record {
        Record { score, duration }
    }
}

/// A [`Record`] along with its position on the leaderboard
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct RankingItem {
    /// 1-based
    pub(crate) rank: usize,
    pub(crate) score: u32,
    pub(crate) duration: u32,
}

impl RankingItem {
    fn new(rank: usize, record: Record) -> RankingItem {
        RankingItem {
            rank,
            score: record.score,
            duration: record.duration,
        }
    }

    pub(crate) fn record(&self) -> Record {
        Record::new(self.score, self.duration)
    }
}

/// Leaderboard order: higher scores first, and among equal scores, shorter
/// sessions first
pub(crate) fn leaderboard_order(a: &Record, b: &Record) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.duration.cmp(&b.duration))
}

/// Sort `records` into leaderboard order and number them 1, 2, 3, … with
/// every entry getting its own rank
pub(crate) fn sequential_ranks(mut records: Vec<Record>) -> Vec<RankingItem> {
    records.sort_by(leaderboard_order);
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankingItem::new(i + 1, r))
        .collect()
}

/// Sort `records` into leaderboard order and assign "competition" ranks:
/// identical records share a rank, and the next distinct record is ranked by
/// its 1-based position (1, 1, 3, …)
pub(crate) fn competition_ranks(mut records: Vec<Record>) -> Vec<RankingItem> {
    records.sort_by(leaderboard_order);
    let mut items: Vec<RankingItem> = Vec::with_capacity(records.len());
    for (i, r) in records.into_iter().enumerate() {
        let rank = match items.last() {
            Some(prev) if prev.record() == r => prev.rank,
            _ => i + 1,
        };
        items.push(RankingItem::new(rank, r));
    }
    items
}

/// Returns true if `key` names the score or duration of some leaderboard
/// entry, whether or not that entry is reachable by a scan
fn is_ranking_key(key: &str) -> bool {
    let Some((index, field)) = key
        .strip_prefix("rank_")
        .and_then(|rest| rest.split_once('_'))
    else {
        return false;
    };
    !index.is_empty()
        && index.bytes().all(|b| b.is_ascii_digit())
        && matches!(field, "score" | "duration")
}

fn score_key(index: usize) -> String {
    format!("rank_{index}_score")
}

fn duration_key(index: usize) -> String {
    format!("rank_{index}_duration")
}

/// The persisted leaderboard.
///
/// Records are laid out in the store under the keys `rank_{i}_score` and
/// `rank_{i}_duration` for `i` in `0..N`.  Reading stops at the first index
/// for which either key is missing or unreadable.
#[derive(Debug)]
pub(crate) struct Ranking<S> {
    store: S,
}

impl<S: KeyValueStore> Ranking<S> {
    pub(crate) fn new(store: S) -> Ranking<S> {
        Ranking { store }
    }

    /// Read back the stored records in storage order
    pub(crate) fn records(&self) -> Vec<Record> {
        (0..)
            .map_while(|i| {
                let score = self.store.get(&score_key(i))?;
                let duration = self.store.get(&duration_key(i))?;
                Some(Record::new(score, duration))
            })
            .collect()
    }

    /// Replace the stored leaderboard with `records`, sorted into leaderboard
    /// order
    pub(crate) fn save(&mut self, records: &[Record]) -> Result<(), SaveError> {
        let mut records = records.to_vec();
        records.sort_by(leaderboard_order);
        self.store.retain(&|key| !is_ranking_key(key));
        for (i, r) in records.iter().enumerate() {
            self.store.set(&score_key(i), r.score);
            self.store.set(&duration_key(i), r.duration);
        }
        self.store.commit()
    }

    /// Return the stored leaderboard with each entry ranked by its position
    pub(crate) fn load(&self) -> Vec<RankingItem> {
        sequential_ranks(self.records())
    }

    /// Return the stored leaderboard with tied entries sharing a rank, for
    /// display
    pub(crate) fn competition(&self) -> Vec<RankingItem> {
        competition_ranks(self.records())
    }

    /// Add the outcome of a finished session to the leaderboard
    pub(crate) fn record(&mut self, record: Record) -> Result<(), SaveError> {
        let mut records = self
            .load()
            .iter()
            .map(RankingItem::record)
            .collect::<Vec<_>>();
        records.push(record);
        self.save(&records)
    }

    /// Delete every entry from the leaderboard
    pub(crate) fn clear(&mut self) -> Result<(), SaveError> {
        self.save(&[])
    }
}
