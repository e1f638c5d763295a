// Rendering collaborator contract
use crate::domain::dashboard::DashboardState;
use async_trait::async_trait;
use thiserror::Error;
use tokio_stream::{Stream, StreamExt};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Consumes dashboard snapshots. Implementations only read state.
#[async_trait]
pub trait DashboardRenderer: Send {
    async fn render(&mut self, state: &DashboardState) -> Result<(), RenderError>;
}

/// Render every snapshot the stream yields until it ends or a frame fails.
pub async fn run_render_loop<S>(
    renderer: &mut dyn DashboardRenderer,
    updates: S,
) -> Result<(), RenderError>
where
    S: Stream<Item = DashboardState>,
{
    tokio::pin!(updates);
    while let Some(state) = updates.next().await {
        renderer.render(&state).await?;
    }
    tracing::debug!("snapshot stream closed");
    Ok(())
}
