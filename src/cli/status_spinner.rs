use console::style;
use indicatif::{MultiProgress, ProgressBar};

use std::time::Duration;

/// spinner shown on stderr while a request is in flight
pub struct StatusSpinner<'a> {
    multi: &'a MultiProgress,
    bar: ProgressBar,
}

impl<'a> StatusSpinner<'a> {
    pub fn new(loading: &str, multi: &'a MultiProgress) -> Self {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(style(loading).yellow().bright().to_string());
        Self { bar, multi }
    }

    /// remove the spinner so the report can be printed below it
    pub fn clear(self) {
        self.bar.finish_and_clear();
        self.multi.remove(&self.bar);
    }
}
