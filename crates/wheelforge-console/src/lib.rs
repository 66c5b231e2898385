//! Colorful console output for wheel searches.
//!
//! Provides a custom `tracing` layer that formats search events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (search start/end, derivation, validation)
//! - **DEBUG**: Per-track summaries
//! - **TRACE**: Individual candidate rejections

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "wheelforge_solver=info,wheelforge=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the WheelForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(WheelConsoleLayer)
            .try_init();
    });
}

// Marks the start of a search for elapsed time tracking.
fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since search start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
__        ___               _ _____
\ \      / / |__   ___  ___| |  ___|__  _ __ __ _  ___
 \ \ /\ / /| '_ \ / _ \/ _ \ | |_ / _ \| '__/ _` |/ _ \
  \ V  V / | | | |  __/  __/ |  _| (_) | | | (_| |  __/
   \_/\_/  |_| |_|\___|\___|_|_|  \___/|_|  \__, |\___|
                                            |___/
"#;

    let version_line = format!(
        "                 v{} - Anchor-Constrained Wheel Solver\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct WheelConsoleLayer;

impl<S: Subscriber> Layer<S> for WheelConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Accept events from wheelforge crates
        if !metadata.target().starts_with("wheelforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    configuration: Option<String>,
    best: Option<String>,
    reason: Option<String>,
    indices: Option<String>,
    digest: Option<String>,
    error: Option<String>,
    track: Option<u64>,
    candidates: Option<u64>,
    accepted: Option<u64>,
    rejected: Option<u64>,
    unfilled: Option<u64>,
    ciphertext_len: Option<u64>,
    constraints: Option<u64>,
    period_min: Option<u64>,
    period_max: Option<u64>,
    candidates_evaluated: Option<u64>,
    candidates_accepted: Option<u64>,
    slot_conflicts: Option<u64>,
    option_a_violations: Option<u64>,
    duration_ms: Option<u64>,
    length: Option<u64>,
    known: Option<u64>,
    unknown: Option<u64>,
    spans: Option<u64>,
    mismatches: Option<u64>,
    parallel: Option<bool>,
    passed: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "configuration" => self.configuration = Some(s),
            "best" => self.best = Some(s),
            "reason" => self.reason = Some(s),
            "indices" => self.indices = Some(s),
            "digest" => self.digest = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "track" => self.track = Some(value),
            "candidates" => self.candidates = Some(value),
            "accepted" => self.accepted = Some(value),
            "rejected" => self.rejected = Some(value),
            "unfilled" => self.unfilled = Some(value),
            "ciphertext_len" => self.ciphertext_len = Some(value),
            "constraints" => self.constraints = Some(value),
            "period_min" => self.period_min = Some(value),
            "period_max" => self.period_max = Some(value),
            "candidates_evaluated" => self.candidates_evaluated = Some(value),
            "candidates_accepted" => self.candidates_accepted = Some(value),
            "slot_conflicts" => self.slot_conflicts = Some(value),
            "option_a_violations" => self.option_a_violations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "length" => self.length = Some(value),
            "known" => self.known = Some(value),
            "unknown" => self.unknown = Some(value),
            "spans" => self.spans = Some(value),
            "mismatches" => self.mismatches = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "parallel" => self.parallel = Some(value),
            "passed" => self.passed = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            "digest" => self.digest = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "search_start" => format_search_start(v),
        "search_end" => format_search_end(v),
        "track_start" => format_track_start(v),
        "track_end" => format_track_end(v),
        "candidate_rejected" => format_rejection(v, level),
        "derive_end" => format_derive_end(v),
        "validation_end" => format_validation_end(v),
        "thread_pool_unavailable" => format_warning(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn number(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    let mode = if v.parallel.unwrap_or(false) {
        "parallel"
    } else {
        "sequential"
    };

    format!(
        "{} {} Searching │ {} symbols │ {} constraints │ periods {}..={} │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        number(v.ciphertext_len.unwrap_or(0)).bright_yellow(),
        number(v.constraints.unwrap_or(0)).bright_yellow(),
        v.period_min.unwrap_or(0),
        v.period_max.unwrap_or(0),
        mode.bright_magenta()
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let evaluated = v.candidates_evaluated.unwrap_or(0);
    let accepted = v.candidates_accepted.unwrap_or(0);

    let mut output = format!(
        "{} {} Search complete │ {} │ {} evaluated │ {} accepted",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        number(evaluated).white(),
        number(accepted).bright_green().bold(),
    );

    let conflicts = v.slot_conflicts.unwrap_or(0);
    let violations = v.option_a_violations.unwrap_or(0);
    if conflicts + violations > 0 {
        output.push_str(&format!(
            " │ {} conflicts │ {} option-a",
            number(conflicts).bright_red(),
            number(violations).bright_red()
        ));
    }

    output
}

fn format_track_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Track {} │ {} candidates",
        format_elapsed(),
        "▶".bright_blue(),
        v.track.unwrap_or(0).white().bold(),
        number(v.candidates.unwrap_or(0)).bright_black()
    )
}

fn format_track_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Track {} │ {} accepted │ {} rejected",
        format_elapsed(),
        "◀".bright_blue(),
        v.track.unwrap_or(0).white().bold(),
        number(v.accepted.unwrap_or(0)).bright_green(),
        number(v.rejected.unwrap_or(0)).bright_red(),
    );

    match v.best.as_deref() {
        Some(best) => {
            output.push_str(&format!(" │ best {}", best.bright_magenta().bold()));
            if let Some(unfilled) = v.unfilled.filter(|&u| u > 0) {
                output.push_str(&format!(" │ {} unfilled", unfilled.yellow()));
            }
        }
        None => output.push_str(&format!(" │ {}", "no valid configuration".bright_red())),
    }

    output
}

fn format_rejection(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{} {} Track {} │ {} │ {} {}",
        format_elapsed(),
        "✗".bright_red(),
        v.track.unwrap_or(0),
        v.configuration.as_deref().unwrap_or("?").bright_black(),
        v.reason.as_deref().unwrap_or("rejected").bright_black(),
        v.indices.as_deref().unwrap_or("").bright_black()
    )
}

fn format_derive_end(v: &EventVisitor) -> String {
    let known = v.known.unwrap_or(0);
    let length = v.length.unwrap_or(0);
    let unknown = v.unknown.unwrap_or(0);

    let unknown_str = if unknown == 0 {
        number(unknown).bright_green().to_string()
    } else {
        number(unknown).yellow().to_string()
    };

    format!(
        "{} {} Derived │ {}/{} determined │ {} unknown",
        format_elapsed(),
        "✎".bright_cyan(),
        number(known).white(),
        number(length).white(),
        unknown_str
    )
}

fn format_validation_end(v: &EventVisitor) -> String {
    let status = if v.passed.unwrap_or(false) {
        "PASSED".bright_green().bold().to_string()
    } else {
        "FAILED".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Validation {} │ {} spans",
        format_elapsed(),
        "✓".bright_cyan(),
        status,
        number(v.spans.unwrap_or(0)).white(),
    );

    if let Some(mismatches) = v.mismatches.filter(|&m| m > 0) {
        output.push_str(&format!(" │ {} mismatches", number(mismatches).bright_red()));
    }
    if let Some(digest) = v.digest.as_deref() {
        output.push_str(&format!(" │ sha256 {}", short_digest(digest).bright_black()));
    }

    output
}

fn format_warning(v: &EventVisitor) -> String {
    format!(
        "{} {} Thread pool unavailable, evaluating sequentially │ {}",
        format_elapsed(),
        "!".yellow().bold(),
        v.error.as_deref().unwrap_or("unknown error")
    )
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
