//! `elide`: shrink text to a line budget with an ellipsis and an expand
//! affordance, the way an expandable text widget would draw it.
//!
//! Widths are terminal columns. Without `--width` the widget is laid out
//! against the current terminal width, exactly like a host delivering its
//! first layout pass.

use anyhow::{Context, Result};
use clap::Parser;
use core_model::{ExpandState, ExpandableText};
use core_text::{CellMeasure, GreedyBreaker, WrapMode};
use core_truncate::DisplayText;
use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use std::sync::Once;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const FALLBACK_WIDTH: u32 = 80;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "elide", version, about = "Ellipsis truncation with an expand hint")]
struct Args {
    /// Text file to read. Reads stdin when omitted.
    pub path: Option<PathBuf>,
    /// Width in columns (skips waiting for the terminal layout pass).
    #[arg(long)]
    pub width: Option<u32>,
    /// Overrides `max_lines_on_shrink` from the config file.
    #[arg(long = "max-lines")]
    pub max_lines: Option<usize>,
    /// Configuration file path (overrides discovery of `elide.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Show the full text with the shrink affordance.
    #[arg(long)]
    pub expanded: bool,
    /// Draw the affordance in its pressed colors.
    #[arg(long)]
    pub pressed: bool,
    /// Plain output without ANSI styling.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) {
        let (nb_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Text files end with a line terminator; it closes the last line rather
/// than opening an empty one.
fn strip_final_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

fn read_source(path: Option<&PathBuf>) -> Result<String> {
    let text = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            debug!(target: "io", file = %path.display(), size_bytes = text.len(), "file_read_ok");
            text
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            text
        }
    };
    Ok(strip_final_newline(text))
}

/// Where the width comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WidthSource {
    /// Known up front (`--width` or the config's future width).
    Hint(u32),
    /// Delivered by a layout pass after the text is set.
    Layout(u32),
}

fn terminal_width() -> u32 {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => u32::from(cols),
        Ok(_) | Err(_) => {
            warn!(target: "runtime", fallback = FALLBACK_WIDTH, "terminal_width_unavailable");
            FALLBACK_WIDTH
        }
    }
}

fn build_display(
    source: &str,
    config: &core_config::Config,
    width: WidthSource,
    max_lines: Option<usize>,
    expanded: bool,
) -> DisplayText {
    let mut truncation = config.truncation();
    if let Some(n) = max_lines {
        truncation = truncation.with_max_lines(n);
    }
    let measure = CellMeasure::cells();
    let mut widget = ExpandableText::new(
        truncation,
        measure,
        GreedyBreaker::new(measure, WrapMode::Word),
    );
    widget.set_on_click(|event| {
        info!(target: "runtime", state = ?event.state, toggled = event.toggled, "click");
    });

    match width {
        WidthSource::Hint(w) => widget.update_for_recycler(source, w),
        WidthSource::Layout(w) => {
            widget.set_text(source);
            widget.on_layout(w);
        }
    }
    if expanded && widget.state() == ExpandState::Shrunk {
        widget.click();
    }
    debug!(
        target: "runtime",
        truncated = widget.display().is_truncated(),
        expanded = widget.is_expanded(),
        kept_bytes = widget.display().source_len(),
        "display_ready"
    );
    widget.display().clone()
}

fn run(args: Args) -> Result<()> {
    let config = core_config::load_from(args.config.clone())?;
    let source = read_source(args.path.as_ref())?;
    let width = match args.width.or_else(|| config.future_width()) {
        Some(w) => WidthSource::Hint(w),
        None => WidthSource::Layout(terminal_width()),
    };
    info!(
        target: "runtime",
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        config_override = args.config.is_some(),
        ?width,
        "startup"
    );

    let display = build_display(&source, &config, width, args.max_lines, args.expanded);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.no_color || !stdout.is_terminal() {
        core_render::render_plain(&display, &mut out)?;
    } else {
        let palette = config.palette();
        core_render::render(&display, &palette, args.pressed, &mut out)?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let mut app = AppStartup::new();
    app.configure_logging();
    AppStartup::install_panic_hook();
    let result = run(Args::parse());
    if let Err(e) = &result {
        tracing::error!(target: "runtime", error = %e, "run_failed");
    }
    drop(app.log_guard.take());
    result
}
