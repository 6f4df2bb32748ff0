use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ssim_core::engine::progress::{Progress, ProgressCallback};
use std::time::Duration;

const SPINNER_TICK: Duration = Duration::from_millis(80);
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const FILES_TEMPLATE: &str = "{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} files";

/// Renders analysis progress on stderr: a spinner per phase and a file
/// counter while interaction files load.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        bar.set_style(spinner_style());
        bar.finish_and_clear();
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |event| apply(&bar, event))
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(bar: &ProgressBar, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_message(name);
            bar.enable_steady_tick(SPINNER_TICK);
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message("✓ Done");
        }
        Progress::FilesFound { total } => {
            bar.disable_steady_tick();
            bar.reset();
            bar.set_style(files_style());
            bar.set_length(total);
            bar.set_message("Loading files");
        }
        Progress::FileLoaded { .. } => bar.inc(1),
        Progress::FileSkipped { file, reason } => {
            bar.println(format!("  ⚠ Skipped {}: {}", file, reason));
        }
        Progress::FilesFinish => {
            if let Some(length) = bar.length() {
                bar.set_position(length);
            }
            bar.finish();
        }
        Progress::Message(message) => bar.println(format!("  {}", message)),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn files_style() -> ProgressStyle {
    ProgressStyle::with_template(FILES_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}
