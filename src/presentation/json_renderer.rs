// Line-delimited JSON snapshots
use crate::domain::dashboard::{DashboardState, Statistics};
use crate::domain::reading::Reading;
use crate::presentation::renderer::{DashboardRenderer, RenderError};
use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Serialize)]
struct SnapshotView<'a> {
    paused: bool,
    #[serde(flatten)]
    statistics: Statistics,
    history: &'a [Reading],
}

impl<'a> From<&'a DashboardState> for SnapshotView<'a> {
    fn from(state: &'a DashboardState) -> Self {
        Self {
            paused: state.is_paused(),
            statistics: state.statistics(),
            history: state.history(),
        }
    }
}

pub struct JsonRenderer<W> {
    out: W,
}

impl<W> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

#[async_trait]
impl<W> DashboardRenderer for JsonRenderer<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn render(&mut self, state: &DashboardState) -> Result<(), RenderError> {
        let mut line = serde_json::to_vec(&SnapshotView::from(state))?;
        line.push(b'\n');

        self.out.write_all(&line).await?;
        self.out.flush().await?;
        Ok(())
    }
}
