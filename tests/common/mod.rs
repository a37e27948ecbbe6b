use loxer::{Loxer, Reporter};

/// One reported diagnostic, already rendered the way stderr would show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	Compile(String),
	Runtime(String),
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
	pub diagnostics: Vec<Diagnostic>,
}

impl Reporter for RecordingReporter {
	fn report_error(&mut self, line: usize, message: &str) {
		self.diagnostics.push(Diagnostic::Compile(format!("[line {line}] {message}")));
	}

	fn report_runtime_error(&mut self, line: usize, message: &str) {
		self.diagnostics.push(Diagnostic::Runtime(format!("{message}\n[line {line}]")));
	}
}

pub type TestLoxer = Loxer<RecordingReporter, Vec<u8>>;

pub fn recording_loxer() -> TestLoxer { Loxer::with_sinks(RecordingReporter::default(), Vec::new()) }

pub fn printed(loxer: &TestLoxer) -> String { String::from_utf8_lossy(loxer.output()).into_owned() }
