use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Shows a message to the operator. Fire and forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Prints notifications to the terminal; errors go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => println!("{}", message),
            Severity::Success => println!("✓ {}", message),
            Severity::Error => eprintln!("Error: {}", message),
        }
    }
}
