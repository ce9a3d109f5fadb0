use std::io::stdout;

use anyhow::Result;
use crossterm::execute;
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Style},
    widgets::{Bar, BarChart, BarGroup, Block},
    Terminal, TerminalOptions, Viewport,
};

use crate::types::{ModelAggregate, TimeBucketSeries};

/// Grouped input/output bars, one group per model in first-seen order.
pub fn render_model_chart(aggregates: &[ModelAggregate]) -> Result<()> {
    if aggregates.is_empty() {
        eprintln!("No models to chart.");
        return Ok(());
    }

    let mut chart = BarChart::default()
        .block(Block::bordered().title("Token usage by model (input / output)"))
        .bar_width(7)
        .bar_gap(1)
        .group_gap(3)
        .value_style(Style::default().fg(Color::White))
        .label_style(Style::default().fg(Color::DarkGray));

    for agg in aggregates {
        let bars = [
            Bar::default()
                .value(agg.input_tokens)
                .label("in".into())
                .style(Style::default().fg(Color::Blue)),
            Bar::default()
                .value(agg.output_tokens)
                .label("out".into())
                .style(Style::default().fg(Color::Cyan)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(agg.model.clone().into())
                .bars(&bars),
        );
    }

    draw(chart)
}

/// The time-bucketed series as one bar per bucket, oldest first.
pub fn render_series_chart(series: &TimeBucketSeries, range_label: &str) -> Result<()> {
    if series.labels.is_empty() {
        eprintln!("No time buckets to display.");
        return Ok(());
    }

    let bars: Vec<Bar> = series
        .labels
        .iter()
        .zip(series.values.iter())
        .map(|(label, &val)| {
            Bar::default()
                .value(val)
                .label(label.clone().into())
                .style(Style::default().fg(Color::Magenta))
        })
        .collect();

    let bar_width = series
        .labels
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(3)
        .max(3) as u16;

    let chart = BarChart::default()
        .block(Block::bordered().title(format!("Total tokens — {range_label}")))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::White))
        .label_style(Style::default().fg(Color::DarkGray));

    draw(chart)
}

/// Render a chart into an inline viewport below the current prompt. The
/// terminal handle lives and dies inside this call; nothing about the
/// chart survives the render.
fn draw(chart: BarChart) -> Result<()> {
    let chart_height: u16 = 17; // 15 for bars + 2 for border

    let mut terminal = Terminal::with_options(
        CrosstermBackend::new(stdout()),
        TerminalOptions {
            viewport: Viewport::Inline(chart_height),
        },
    )?;

    terminal.draw(|frame| {
        frame.render_widget(chart, frame.area());
    })?;

    // Move cursor below the chart
    execute!(stdout(), crossterm::cursor::MoveDown(1))?;

    Ok(())
}
