//! Terminal implementation of the core console seam: plain stdout
//! lines, a stdin yes/no prompt, and an indicatif spinner.

use indicatif::{ProgressBar, ProgressStyle};
use relay_core::console::{Console, Spinner};
use relay_core::error::Result;
use std::io::{BufRead, Write};
use std::time::Duration;

pub struct TermConsole;

impl TermConsole {
    pub fn new() -> TermConsole {
        TermConsole
    }
}

impl Console for TermConsole {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }

    fn confirm(&mut self, question: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
        print!("{question} {hint} ");
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        Ok(match answer.trim().to_lowercase().as_str() {
            "" => default_yes,
            "y" | "yes" => true,
            _ => false,
        })
    }

    fn spinner(&mut self, text: &str) -> Box<dyn Spinner> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner} {msg}").unwrap_or_else(|_| {
                ProgressStyle::default_spinner()
            }),
        );
        pb.set_message(text.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Box::new(TermSpinner { pb })
    }
}

struct TermSpinner {
    pb: ProgressBar,
}

impl Spinner for TermSpinner {
    fn done(self: Box<Self>) {
        let msg = self.pb.message();
        self.pb.finish_with_message(format!("{msg} - done!"));
    }
}

impl Drop for TermSpinner {
    fn drop(&mut self) {
        // Stopped on every exit path; a finished spinner is left as-is.
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
