//! Per-view projection cache for vectors with expensive projections.

use crate::geometry::FixedPoint;
use crate::view::View;

/// Views remembered at once; one per viewport rendering the same vector.
const MAX_CACHED_VIEWS: usize = 4;

#[derive(Debug, Clone)]
struct CachedProjection {
    view: View,
    points: Vec<FixedPoint>,
}

/// Projected points keyed by structural [`View`] equality.
///
/// Any change to the owning vector's points must call [`invalidate`].
///
/// [`invalidate`]: ProjectionCache::invalidate
#[derive(Debug, Clone, Default)]
pub struct ProjectionCache {
    entries: Vec<CachedProjection>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached points for `view`, computing them with `project` on a miss.
    pub fn get_or_project(
        &mut self,
        view: &View,
        project: impl FnOnce() -> Vec<FixedPoint>,
    ) -> &[FixedPoint] {
        match self.entries.iter().position(|entry| entry.view == *view) {
            Some(index) => {
                let entry = self.entries.remove(index);
                self.entries.push(entry);
            }
            None => {
                self.entries.push(CachedProjection {
                    view: *view,
                    points: project(),
                });
                if self.entries.len() > MAX_CACHED_VIEWS {
                    self.entries.remove(0);
                }
            }
        }
        &self.entries[self.entries.len() - 1].points
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Number of views currently cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
