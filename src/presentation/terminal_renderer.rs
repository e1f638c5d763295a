// Text dashboard for a terminal
use crate::domain::dashboard::DashboardState;
use crate::infrastructure::config::DashboardConfig;
use crate::presentation::format::{
    bar_fraction, format_history_value, format_readout, format_stat, format_timestamp,
};
use crate::presentation::renderer::{DashboardRenderer, RenderError};
use async_trait::async_trait;
use std::fmt::Write as _;
use tokio::io::{AsyncWrite, AsyncWriteExt};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const WIDTH: usize = 44;
const BAR: char = '█';

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSettings {
    pub unit: String,
    pub chart_height: usize,
    pub chart_floor: f64,
    pub chart_ceiling: f64,
}

impl FrameSettings {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            unit: config.display.unit.clone(),
            chart_height: config.display.chart_height,
            chart_floor: config.generator.min_value,
            chart_ceiling: config.generator.max_value,
        }
    }
}

pub struct TerminalRenderer<W> {
    out: W,
    settings: FrameSettings,
    clear_screen: bool,
}

impl<W> TerminalRenderer<W> {
    pub fn new(out: W, settings: FrameSettings, clear_screen: bool) -> Self {
        Self {
            out,
            settings,
            clear_screen,
        }
    }
}

#[async_trait]
impl<W> DashboardRenderer for TerminalRenderer<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn render(&mut self, state: &DashboardState) -> Result<(), RenderError> {
        let mut frame = String::new();
        if self.clear_screen {
            frame.push_str(CLEAR_SCREEN);
        }
        frame.push_str(&render_frame(state, &self.settings));

        self.out.write_all(frame.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}

/// Lay out one full dashboard frame.
pub fn render_frame(state: &DashboardState, settings: &FrameSettings) -> String {
    let mut frame = String::new();
    let stats = state.statistics();
    let unit = settings.unit.as_str();

    // Writing into a String cannot fail
    let action = if state.is_paused() { "[p] Resume" } else { "[p] Pause" };
    let _ = writeln!(frame, "{:<w$}{}", "Temp Dashboard", action, w = WIDTH - action.len());
    let _ = writeln!(frame);

    let _ = writeln!(frame, "{:^WIDTH$}", format_readout(stats.current, unit));
    let _ = writeln!(frame, "{:^WIDTH$}", "Current Temperature");
    let _ = writeln!(frame);

    let cards = [
        ("Avg", Some(stats.average)),
        ("Min", stats.min),
        ("Max", stats.max),
    ]
    .map(|(label, value)| format!("{} {}{}", label, format_stat(value), unit))
    .join("   ");
    let _ = writeln!(frame, "{:^WIDTH$}", cards);
    let _ = writeln!(frame);

    let _ = writeln!(frame, "Chart (Last {})", state.history().len());
    frame.push_str(&render_chart(state, settings));
    let _ = writeln!(frame);

    let _ = writeln!(frame, "History");
    if state.history().is_empty() {
        let _ = writeln!(frame, "  waiting for readings");
    }
    for reading in state.history().iter().rev() {
        let _ = writeln!(
            frame,
            "  {}{:>w$}",
            format_timestamp(&reading.timestamp),
            format_history_value(reading.value, unit),
            w = WIDTH - 12
        );
    }

    frame
}

/// Vertical bars, oldest on the left, one column per reading.
fn render_chart(state: &DashboardState, settings: &FrameSettings) -> String {
    let height = settings.chart_height;
    let bars: Vec<usize> = state
        .history()
        .iter()
        .map(|r| {
            let fraction = bar_fraction(r.value, settings.chart_floor, settings.chart_ceiling);
            (fraction * height as f64).round() as usize
        })
        .collect();

    let mut chart = String::new();
    for level in (1..=height).rev() {
        let row: String = bars
            .iter()
            .map(|&bar| if bar >= level { BAR } else { ' ' })
            .flat_map(|cell| [' ', cell])
            .collect();
        let _ = writeln!(chart, "{}", row.trim_end());
    }
    let _ = writeln!(chart, " {}", "─".repeat((bars.len() * 2).max(1)));
    chart
}
