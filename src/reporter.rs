use colored::Colorize;

/// Where user-facing status lines go.
///
/// Implementations are shared by every task of a bulk run, so lines from
/// different projects can arrive in any order.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

/// Colorized console output: info in cyan, errors in red on stderr,
/// successes in green.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        println!("{}", format!("info: {}", message).bright_cyan());
    }

    fn error(&self, message: &str) {
        eprintln!("{}", format!("error: {}", message).bright_red());
    }

    fn success(&self, message: &str) {
        println!("{}", format!("success: {}", message).green());
    }
}

#[cfg(test)]
pub use self::testing::{Line, MemoryReporter};

#[cfg(test)]
mod testing {
    use super::Reporter;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Line {
        Info(String),
        Error(String),
        Success(String),
    }

    /// Collects lines instead of printing them.
    #[derive(Debug, Default)]
    pub struct MemoryReporter {
        lines: Mutex<Vec<Line>>,
    }

    impl MemoryReporter {
        pub fn lines(&self) -> Vec<Line> {
            self.lines.lock().unwrap().clone()
        }

        pub fn errors(&self) -> Vec<String> {
            self.lines()
                .into_iter()
                .filter_map(|l| match l {
                    Line::Error(m) => Some(m),
                    _ => None,
                })
                .collect()
        }

        pub fn infos(&self) -> Vec<String> {
            self.lines()
                .into_iter()
                .filter_map(|l| match l {
                    Line::Info(m) => Some(m),
                    _ => None,
                })
                .collect()
        }

        pub fn successes(&self) -> Vec<String> {
            self.lines()
                .into_iter()
                .filter_map(|l| match l {
                    Line::Success(m) => Some(m),
                    _ => None,
                })
                .collect()
        }
    }

    impl Reporter for MemoryReporter {
        fn info(&self, message: &str) {
            self.lines.lock().unwrap().push(Line::Info(message.to_string()));
        }

        fn error(&self, message: &str) {
            self.lines.lock().unwrap().push(Line::Error(message.to_string()));
        }

        fn success(&self, message: &str) {
            self.lines.lock().unwrap().push(Line::Success(message.to_string()));
        }
    }
}
