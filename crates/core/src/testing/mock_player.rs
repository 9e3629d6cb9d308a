//! Mock player for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::encoder::{EncodeError, Player};

/// Records every played path; can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct MockPlayer {
    played: Arc<RwLock<Vec<PathBuf>>>,
    fail: Arc<RwLock<bool>>,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths passed to `play`, in order.
    pub async fn played(&self) -> Vec<PathBuf> {
        self.played.read().await.clone()
    }

    /// Make every subsequent `play` fail.
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }
}

#[async_trait]
impl Player for MockPlayer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn play(&self, path: &Path) -> Result<(), EncodeError> {
        self.played.write().await.push(path.to_path_buf());
        if *self.fail.read().await {
            return Err(EncodeError::tool_unavailable("mock-ffplay", "simulated failure"));
        }
        Ok(())
    }
}
