//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::runner::RunSummary;

/// Create a progress bar for a batch of games
pub fn create_run_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:24} {}", format!("{}:", key), value);
}

/// Print the aggregate statistics of a finished batch
pub fn print_summary(summary: &RunSummary) {
    print_section("Batch Results");
    print_kv("Policy", &summary.policy);
    print_kv("Board", &format!("{}x{}", summary.rows, summary.cols));
    print_kv("Runs", &summary.runs.to_string());
    print_kv("Mean score", &format!("{:.2}", summary.mean_score));
    print_kv("Std dev score", &format!("{:.2}", summary.std_dev_score));
    print_kv("Median score", &format!("{:.2}", summary.median_score));
    print_kv("Mean moves", &format!("{:.2}", summary.mean_moves));
    print_kv(
        "Mean time",
        &format!("{:.3}s", summary.mean_elapsed_secs),
    );
    if summary.total_children_generated > 0 {
        print_kv(
            "Children per move",
            &format!("{:.2}", summary.mean_children_per_move()),
        );
    }
}
