//! Progress reporting for generation stages

use agenda_application::{GenerationStage, ProgressNotifier};
use agenda_domain::PanelId;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Reports progress with one indicatif bar per stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
    }

    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.stage_bar.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: GenerationStage, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message("Starting...");

        *self.bar() = Some(pb);
    }

    fn on_panel_complete(&self, _stage: GenerationStage, panel: &PanelId, success: bool) {
        if let Some(pb) = self.bar().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), panel)
            } else {
                format!("{} {}", "x".red(), panel)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: GenerationStage) {
        if let Some(pb) = self.bar().take() {
            pb.finish_with_message(format!("{} done", stage.as_str().green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: GenerationStage, total_tasks: usize) {
        println!(
            "{} {} ({} requests)",
            "->".cyan(),
            stage.display_name().bold(),
            total_tasks
        );
    }

    fn on_panel_complete(&self, _stage: GenerationStage, panel: &PanelId, success: bool) {
        if success {
            println!("  {} {}", "v".green(), panel);
        } else {
            println!("  {} {} (failed)", "x".red(), panel);
        }
    }

    fn on_stage_complete(&self, _stage: GenerationStage) {
        println!();
    }
}
