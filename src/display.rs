use spinoff::{Color, Spinner, spinners};
use std::io::IsTerminal;

/// Decides how progress reaches the user.
pub struct Display {
    animate: bool,
}

impl Display {
    /// Auto-detects terminals, so the spinner never floods a pipe or a log file
    /// even when `--no-animate` is forgotten.
    pub fn new(no_animate: bool) -> Self {
        Display {
            animate: !no_animate && std::io::stdout().is_terminal(),
        }
    }

    /// Announces a step. With animations it spins until stopped, otherwise the
    /// message is printed as a plain line right away.
    pub fn begin(&self, message: String) -> SpinnerContainer {
        if !self.animate {
            println!("{}", message);

            return SpinnerContainer { instance: None };
        }

        SpinnerContainer {
            instance: Some(Spinner::new(spinners::Dots, message, Color::Blue)),
        }
    }
}

pub struct SpinnerContainer {
    instance: Option<Spinner>,
}

impl SpinnerContainer {
    pub fn stop_with_message(&mut self, message: &str) {
        // Note that it has to take ownership to prevent double stopping.
        match self.instance.take() {
            Some(mut s) => s.stop_with_message(message),
            None => println!("{}", message),
        }
    }
}

impl Drop for SpinnerContainer {
    fn drop(&mut self) {
        // Only reached with a live spinner when the step failed half way.
        if let Some(s) = self.instance.as_mut() {
            s.stop_with_message("");
        }
    }
}
