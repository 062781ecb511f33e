use indicatif::{ProgressBar, ProgressStyle};

pub fn get_progress_bar(message: String, remaining: usize, verbose: bool) -> ProgressBar {
    if !verbose {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(remaining as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{msg} {bar:60} {pos}/{len} Elapsed: {elapsed} | ETA: {eta} | {per_sec}",
    ) {
        bar.set_style(style.progress_chars(">>-"));
    }
    bar.set_message(message);
    bar
}
