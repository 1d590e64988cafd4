//! Snapshot based fixtures.
//!
//! The first time a fixture is loaded its setup runs and the resulting chain
//! state is captured in a snapshot. Every later load restores that snapshot
//! instead of running the setup again, so each test starts from the same
//! state no matter what previous tests did.

use {
    chain::{Chain, SnapshotId},
    std::{
        any::{Any, TypeId},
        future::Future,
    },
    tokio::sync::Mutex,
};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("fixture setup failed")]
    Setup(#[source] anyhow::Error),
    #[error("failed to snapshot the chain after fixture setup")]
    Snapshot(#[source] chain::Error),
    #[error("failed to restore the fixture snapshot")]
    SnapshotRestore(#[source] chain::Error),
}

struct Snapshot {
    /// Type of the setup function the snapshot was taken for.
    setup: TypeId,
    id: SnapshotId,
    value: Box<dyn Any + Send + Sync>,
}

/// Per-chain cache of fixture snapshots, ordered by creation.
pub struct FixtureLoader {
    chain: Chain,
    snapshots: Mutex<Vec<Snapshot>>,
}

impl FixtureLoader {
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            snapshots: Mutex::default(),
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Returns the fixture produced by `setup` with the chain in exactly the
    /// state `setup` left it in.
    ///
    /// Fixtures are identified by the type of `setup`. Every function item
    /// and every closure expression has its own type, so the same function
    /// always maps to the same cached fixture.
    pub async fn load_fixture<F, Fut, T>(&self, setup: F) -> Result<T, FixtureError>
    where
        F: FnOnce(Chain) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<T>>,
        T: Clone + Send + Sync + 'static,
    {
        let key = TypeId::of::<F>();

        {
            let mut snapshots = self.snapshots.lock().await;
            if let Some(position) = snapshots.iter().position(|s| s.setup == key) {
                self.chain
                    .restore(snapshots[position].id)
                    .await
                    .map_err(FixtureError::SnapshotRestore)?;
                // Reverting consumes the snapshot and every snapshot taken
                // after it.
                snapshots.truncate(position + 1);
                let id = match self.chain.snapshot().await {
                    Ok(id) => id,
                    Err(err) => {
                        // Without a fresh id the entry can never be restored
                        // again, so the next load runs the setup.
                        snapshots.truncate(position);
                        return Err(FixtureError::Snapshot(err));
                    }
                };
                let snapshot = &mut snapshots[position];
                snapshot.id = id;
                tracing::debug!(snapshot = %snapshot.id, "restored fixture");
                let value = snapshot
                    .value
                    .downcast_ref::<T>()
                    .expect("fixture value type is determined by the setup type");
                return Ok(value.clone());
            }
        }

        let value = setup(self.chain.clone())
            .await
            .map_err(FixtureError::Setup)?;
        let id = self.chain.snapshot().await.map_err(FixtureError::Snapshot)?;
        tracing::debug!(snapshot = %id, "captured fixture");
        self.snapshots.lock().await.push(Snapshot {
            setup: key,
            id,
            value: Box::new(value.clone()),
        });
        Ok(value)
    }
}

impl std::fmt::Debug for FixtureLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureLoader").finish_non_exhaustive()
    }
}
