use indexmap::IndexMap;
use tracing::debug;

use crate::error::{TimelineError, TimelineResult};
use crate::panel::tracks::{COUNTER_TRACK_KIND, CounterTrack, SLICE_TRACK_KIND, SliceTrack};
use crate::panel::{Track, TrackConfig};

pub type TrackFactory = Box<dyn Fn(&TrackConfig) -> TimelineResult<Box<dyn Track>>>;

/// Maps a track `kind` string to the factory that builds it.
#[derive(Default)]
pub struct TrackRegistry {
    factories: IndexMap<String, TrackFactory>,
}

impl TrackRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the `slices` and `counter` kinds.
    #[must_use]
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        registry.factories.insert(
            SLICE_TRACK_KIND.to_owned(),
            Box::new(|config| Ok(Box::new(SliceTrack::new(config.clone())) as Box<dyn Track>)),
        );
        registry.factories.insert(
            COUNTER_TRACK_KIND.to_owned(),
            Box::new(|config| Ok(Box::new(CounterTrack::new(config.clone())) as Box<dyn Track>)),
        );
        registry
    }

    /// Registers a factory under a unique, non-empty kind.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        factory: impl Fn(&TrackConfig) -> TimelineResult<Box<dyn Track>> + 'static,
    ) -> TimelineResult<()> {
        let kind = kind.into();
        if kind.is_empty() {
            return Err(TimelineError::InvalidData(
                "track kind must not be empty".to_owned(),
            ));
        }
        if self.factories.contains_key(&kind) {
            return Err(TimelineError::DuplicateId(kind));
        }
        debug!(kind = %kind, "track kind registered");
        self.factories.insert(kind, Box::new(factory));
        Ok(())
    }

    #[must_use]
    pub fn has_kind(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn create(&self, config: &TrackConfig) -> TimelineResult<Box<dyn Track>> {
        let factory = self
            .factories
            .get(&config.kind)
            .ok_or_else(|| TimelineError::UnknownTrackKind(config.kind.clone()))?;
        factory(config)
    }
}

impl std::fmt::Debug for TrackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
