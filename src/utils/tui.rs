//! Spinner shown while waiting on the portal API.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(80);

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Await `fut` behind a spinner labelled `message`; the spinner is cleared
/// before the result is returned, whatever it is.
pub async fn with_spinner<F: Future>(message: impl Into<String>, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner().with_style(spinner_style());
    spinner.set_message(message.into());
    spinner.enable_steady_tick(TICK);

    let output = fut.await;
    spinner.finish_and_clear();
    output
}
