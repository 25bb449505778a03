//! Presentation seam between the orchestrator and whatever draws the results.

use std::io::{self, Write};

use ontime_client::HealthStatus;

use crate::i18n::Localizer;
use crate::render::{MetricView, ResultView};
use crate::report::ErrorReport;

const BAR_CELLS: usize = 20;

pub trait Presenter {
    /// Enter or leave the busy state (submission disabled, indicator shown).
    fn set_loading(&mut self, loading: bool);
    fn show_health(&mut self, status: HealthStatus);
    fn show_result(&mut self, view: &ResultView);
    fn show_error(&mut self, report: &ErrorReport);
    /// Re-label static text after a locale change.
    fn apply_translations(&mut self, localizer: &Localizer);
}

/// Plain-text presenter writing to any [`Write`] sink.
pub struct TerminalPresenter<W: Write> {
    out: W,
    labels: Localizer,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            labels: Localizer::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, write: impl FnOnce(&mut W, &Localizer) -> io::Result<()>) {
        let result = write(&mut self.out, &self.labels).and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.emit(|out, labels| writeln!(out, "⏳ {}", labels.t("loading.text")));
        }
    }

    fn show_health(&mut self, status: HealthStatus) {
        self.emit(|out, labels| {
            let (dot, key) = match status {
                HealthStatus::Operational => ("●", "header.status.operational"),
                HealthStatus::Limited => ("○", "header.status.limited"),
            };
            writeln!(out, "{} {}", dot, labels.t(key))
        });
    }

    fn show_result(&mut self, view: &ResultView) {
        self.emit(|out, _| write_result(out, view));
    }

    fn show_error(&mut self, report: &ErrorReport) {
        self.emit(|out, _| writeln!(out, "{}", report.text()));
    }

    fn apply_translations(&mut self, localizer: &Localizer) {
        self.labels = localizer.clone();
        self.emit(|out, labels| {
            writeln!(
                out,
                "{} · {}",
                labels.t("header.title"),
                labels.t("form.title")
            )
        });
    }
}

fn write_result(out: &mut impl Write, view: &ResultView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {} ==", view.title)?;
    writeln!(out, "{} {}", view.status.icon, view.status.label)?;
    writeln!(out, "   {}", view.status.subtitle)?;
    writeln!(out)?;

    for metric in [&view.probability, &view.confidence, &view.distance] {
        write_metric(out, metric)?;
    }

    if let Some(weather) = &view.weather {
        writeln!(out)?;
        writeln!(out, "-- {} --", weather.title)?;
        for field in weather.fields() {
            writeln!(out, "  {:<14} {}", field.label, field.value)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "-- {} --", view.metadata_title)?;
    for row in &view.metadata {
        writeln!(out, "  {:<20} {}", row.field.label, row.display_value())?;
    }
    Ok(())
}

fn write_metric(out: &mut impl Write, metric: &MetricView) -> io::Result<()> {
    match metric.bar_width {
        Some(width) => writeln!(
            out,
            "  {:<24} {:>7}  {}",
            metric.field.label,
            metric.field.value,
            bar(width)
        ),
        None => writeln!(out, "  {:<24} {:>7}", metric.field.label, metric.field.value),
    }
}

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_CELLS as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}
