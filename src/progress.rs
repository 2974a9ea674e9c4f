// src/progress.rs
/// Human-facing output of a run (status lines, tables).
/// The CLI prints it; tests record it.
pub trait Progress {
    /// Free-form status line.
    fn log(&mut self, _msg: &str) {}

    /// A titled block of preformatted text (rendered table).
    fn report(&mut self, _title: &str, _body: &str) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints to stdout in the console layout.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn report(&mut self, title: &str, body: &str) {
        println!("\n========= {title} =========");
        print!("{body}");
    }
}

/// Collects everything; handy for assertions.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub lines: Vec<String>,
    pub reports: Vec<(String, String)>,
}

impl Progress for RecordingProgress {
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }

    fn report(&mut self, title: &str, body: &str) {
        self.reports.push((s!(title), s!(body)));
    }
}
