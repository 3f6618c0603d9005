//! Mounted table views, keyed by a generated id.
//!
//! Each view sits behind its own lock, so a slow transition on one table never
//! blocks the others. The registry lock is only held to look a view up or to
//! change the set of mounted views.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::ListView;
use crate::errors::AppError;

struct MountedView {
    view: Mutex<ListView>,
    /// Nanoseconds since the registry was created.
    last_used: AtomicU64,
}

/// Registry of live [`ListView`]s.
///
/// Clients that go away without unmounting leave their view behind; those are
/// evicted on the next mount once idle for `idle_ttl`, and the least recently
/// used view makes room when `max_views` is reached.
pub struct ViewRegistry {
    views: RwLock<HashMap<Uuid, Arc<MountedView>>>,
    epoch: Instant,
    idle_ttl: Duration,
    max_views: usize,
}

impl ViewRegistry {
    pub fn new(idle_ttl: Duration, max_views: usize) -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
            epoch: Instant::now(),
            idle_ttl,
            max_views: max_views.max(1),
        }
    }

    /// Register a freshly mounted view and return its id.
    pub async fn mount(&self, view: ListView) -> Uuid {
        let id = Uuid::new_v4();
        let mut views = self.views.write().await;
        let evicted = self.evict(&mut views);

        views.insert(
            id,
            Arc::new(MountedView {
                view: Mutex::new(view),
                last_used: AtomicU64::new(self.now()),
            }),
        );
        tracing::debug!(view_id = %id, mounted = views.len(), evicted, "View mounted");
        id
    }

    /// Drop a view and all of its state.
    pub async fn unmount(&self, id: Uuid) -> Result<(), AppError> {
        let mut views = self.views.write().await;
        if views.remove(&id).is_none() {
            return Err(view_not_found(id));
        }
        tracing::debug!(view_id = %id, mounted = views.len(), "View unmounted");
        Ok(())
    }

    /// Run one state transition against a view.
    pub async fn with_view<T>(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut ListView) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mounted = self
            .views
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| view_not_found(id))?;

        mounted.last_used.store(self.now(), Ordering::Relaxed);
        let mut view = mounted
            .view
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&mut view)
    }

    /// Number of mounted views.
    pub async fn mounted(&self) -> usize {
        self.views.read().await.len()
    }

    /// Drop idle views, then the least recently used ones until a new view fits.
    fn evict(&self, views: &mut HashMap<Uuid, Arc<MountedView>>) -> usize {
        let before = views.len();
        let now = self.now();
        let ttl = u64::try_from(self.idle_ttl.as_nanos()).unwrap_or(u64::MAX);
        views.retain(|_, mounted| {
            now.saturating_sub(mounted.last_used.load(Ordering::Relaxed)) < ttl
        });

        while views.len() >= self.max_views {
            let oldest = views
                .iter()
                .min_by_key(|(_, mounted)| mounted.last_used.load(Ordering::Relaxed))
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    views.remove(&id);
                }
                None => break,
            }
        }

        before - views.len()
    }

    fn now(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

fn view_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("View {} not found", id))
}
