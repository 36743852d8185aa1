use std::sync::Mutex;

/// Output sink for check diagnostics and the summary table.
/// Injected so the reporting logic can be asserted on without capturing stdout.
pub trait Reporter: Send + Sync {
    fn line(&self, text: &str);
}

/// Default sink: plain stdout
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn line(&self, text: &str) {
        println!("{text}");
    }
}

/// Capturing sink used by tests
#[derive(Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("reporter lock poisoned").clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn line(&self, text: &str) {
        self.lines
            .lock()
            .expect("reporter lock poisoned")
            .push(text.to_string());
    }
}
