use std::sync::Arc;

use crate::texture::composer::VillagerTexture;

/// Result of the last successful generation.
///
/// Produced once by `Session::generate`, then only read: the download flow
/// packages `texture` as-is instead of fetching and compositing again.
#[derive(Clone, Debug)]
pub struct Generation {
    /// Player UUID from the identity lookup.
    pub uuid: String,
    /// Username as entered (after trimming and aliasing).
    pub username: String,
    /// Render URL the skin was fetched from.
    pub skin_url: String,
    /// The composed texture, shared with whoever displays it.
    pub texture: Arc<VillagerTexture>,
}

/// Everything the flows share between invocations.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    generation: Option<Generation>,
}

impl AppState {
    /// The last successful generation, if any.
    pub fn generation(&self) -> Option<&Generation> {
        self.generation.as_ref()
    }

    /// Replace the previous generation wholesale.
    pub fn set_generation(&mut self, generation: Generation) -> &Generation {
        self.generation.insert(generation)
    }
}
