// Main entry point - Dependency injection and dashboard lifecycle
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::{load_dashboard_config, RenderMode};
use crate::infrastructure::random_source::RandomReadingSource;
use crate::presentation::controls::{commands, run_controls, spawn_stdin_reader};
use crate::presentation::json_renderer::JsonRenderer;
use crate::presentation::renderer::{run_render_loop, DashboardRenderer};
use crate::presentation::terminal_renderer::{FrameSettings, TerminalRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the renderer
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_dashboard_config()?;
    tracing::debug!(?config, "configuration loaded");

    // Reading source (infrastructure layer)
    let source = Arc::new(RandomReadingSource::new(
        config.generator.value_range(),
        config.generator.seed,
    ));

    // State holder (application layer)
    let service = DashboardService::new(
        source,
        config.generator.period(),
        config.generator.capacity,
    );

    // Rendering collaborator (presentation layer)
    let mut renderer: Box<dyn DashboardRenderer> = match config.display.mode {
        RenderMode::Terminal => Box::new(TerminalRenderer::new(
            tokio::io::stdout(),
            FrameSettings::from_config(&config),
            config.display.clear_screen,
        )),
        RenderMode::Json => Box::new(JsonRenderer::new(tokio::io::stdout())),
    };
    let controls = commands(spawn_stdin_reader()?);

    service.start().await;

    tokio::select! {
        result = run_render_loop(renderer.as_mut(), service.updates()) => {
            if let Err(e) = result {
                tracing::error!("rendering failed: {}", e);
            }
        }
        _ = run_controls(controls, &service) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
        }
    }

    if service.is_running().await {
        service.stop().await?;
    }
    Ok(())
}
