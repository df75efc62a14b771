use crate::config::Config;
use crate::consts;
use crate::ranking::{KeyValueStore, MemoryStore, Ranking, Record};
use crate::warning::Warning;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// State shared by every screen
#[derive(Debug)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) ranking: Ranking<Box<dyn KeyValueStore>>,
    /// An error to show the user over the current screen
    pub(crate) warning: Option<Warning>,
}

impl Globals {
    pub(crate) fn new(config: Config, store: Box<dyn KeyValueStore>) -> Globals {
        Globals {
            config,
            ranking: Ranking::new(store),
            warning: None,
        }
    }

    /// Add a finished session to the ranking, warning the user if it could
    /// not be saved
    pub(crate) fn record(&mut self, record: Record) {
        if let Err(e) = self.ranking.record(record) {
            tracing::warn!(
                error = ?e,
                score = record.score,
                duration = record.duration,
                "Failed to record session"
            );
            self.warning = Some(Warning::from(e));
        }
    }

    pub(crate) fn clear_ranking(&mut self) {
        if let Err(e) = self.ranking.clear() {
            tracing::warn!(error = ?e, "Failed to clear ranking");
            self.warning = Some(Warning::from(e));
        } else {
            tracing::info!("Ranking cleared");
        }
    }
}

impl Default for Globals {
    fn default() -> Globals {
        Globals::new(Config::default(), Box::new(MemoryStore::default()))
    }
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit if
/// necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Stepping through the variants of a field-less enum in declaration order
pub(crate) trait EnumExt: Enum + Sized {
    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH - 1)
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}
