//! Where user-facing diagnostics go.

/// Receives every lexical, syntax and runtime fault, one call per fault.
pub trait Reporter {
	/// A compile-time fault; `message` already names the location, e.g.
	/// `Error at ')': Expect expression.`
	fn report_error(&mut self, line: usize, message: &str);

	/// A runtime fault raised by the token on `line`.
	fn report_runtime_error(&mut self, line: usize, message: &str);
}

/// Writes diagnostics to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
	fn report_error(&mut self, line: usize, message: &str) { eprintln!("[line {line}] {message}") }

	fn report_runtime_error(&mut self, line: usize, message: &str) { eprintln!("{message}\n[line {line}]") }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
	fn report_error(&mut self, line: usize, message: &str) { (**self).report_error(line, message) }

	fn report_runtime_error(&mut self, line: usize, message: &str) { (**self).report_runtime_error(line, message) }
}
