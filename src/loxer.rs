use std::{
	fs::read_to_string,
	io::{BufRead, Stdout, Write, stdin, stdout},
	path::Path,
};

use anyhow::Context;

use crate::{
	LoxError,
	Reporter,
	StderrReporter,
	error::interpreter::InterpreterError,
	interpreter::Interpreter,
	parser::Parser,
	scanner::{Scanner, Token},
	statement::Statement,
};

/// Loxer is the main struct for the Lox interpreter.
///
/// It owns the interpreter, so global variables survive between [`Loxer::run`]
/// calls, and the two sinks every stage reports to.
pub struct Loxer<R = StderrReporter, W = Stdout> {
	interpreter:  Interpreter<W>,
	reporter:     R,
	/// Lexical faults in the current unit.
	scan_errors:  usize,
	/// Syntax faults in the current unit.
	parse_errors: usize,
}

impl Loxer {
	/// A Loxer printing to stdout and reporting to stderr.
	pub fn new() -> Self { Self::with_sinks(StderrReporter, stdout()) }
}

impl Default for Loxer {
	fn default() -> Self { Self::new() }
}

impl<R: Reporter, W: Write> Loxer<R, W> {
	pub fn with_sinks(reporter: R, output: W) -> Self {
		Self { interpreter: Interpreter::new(output), reporter, scan_errors: 0, parse_errors: 0 }
	}

	pub fn reporter(&self) -> &R { &self.reporter }

	pub fn output(&self) -> &W { self.interpreter.output() }

	/// Whether the current unit had a lexical or syntax fault.
	pub fn had_error(&self) -> bool { self.scan_errors + self.parse_errors > 0 }

	pub fn into_parts(self) -> (R, W) { (self.reporter, self.interpreter.into_output()) }

	/// Run a whole source unit: scan, parse, then execute only if both passes
	/// were clean.
	pub fn run(&mut self, source: &str) -> Result<(), LoxError> {
		self.scan_errors = 0;
		self.parse_errors = 0;
		let tokens = self.scan(source)?;
		// Parse even after lexical faults so every syntax fault gets reported too.
		let statements = self.parse(tokens)?;
		if self.scan_errors > 0 {
			return Err(LoxError::ScannerErrors(self.scan_errors));
		}
		if self.parse_errors > 0 {
			return Err(LoxError::ParserErrors(self.parse_errors));
		}
		self.interpret(&statements)
	}

	/// Read and run a script file.
	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoxError> {
		let path = path.as_ref();
		let source = read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?;
		tracing::debug!(path = %path.display(), bytes = source.len(), "running file");
		self.run(&source)
	}

	/// Scan `source`, reporting every lexical fault. Tokens are always returned.
	pub fn scan<'a>(&mut self, source: &'a str) -> Result<Vec<Token<'a>>, LoxError> {
		let scanned = Scanner::new(source).scan_tokens()?;
		for error in &scanned.errors {
			self.reporter.report_error(error.line(), &error.to_string());
		}
		self.scan_errors += scanned.errors.len();
		Ok(scanned.tokens)
	}

	/// Parse `tokens`, reporting every syntax fault. Statements that parsed
	/// cleanly are returned even when others didn't.
	pub fn parse<'a>(&mut self, tokens: Vec<Token<'a>>) -> Result<Vec<Statement<'a>>, LoxError> {
		let parsed = Parser::new(tokens).parse()?;
		for error in &parsed.errors {
			self.reporter.report_error(error.line(), &error.to_string());
		}
		self.parse_errors += parsed.errors.len();
		Ok(parsed.statements)
	}

	/// Execute `statements`. A runtime fault is reported, then returned.
	pub fn interpret(&mut self, statements: &[Statement]) -> Result<(), LoxError> {
		match self.interpreter.interpret(statements) {
			Ok(()) => Ok(()),
			Err(InterpreterError::RuntimeError(e)) => {
				self.reporter.report_runtime_error(e.line(), &e.to_string());
				Err(e.into())
			}
			Err(InterpreterError::InternalError(e)) => Err(e.into()),
		}
	}

	/// Run the REPL prompt on stdin until end of input.
	pub fn run_prompt(&mut self) { self.run_lines(stdin().lock()) }

	/// Run every line of `input` as its own unit. Lexical, syntax and runtime
	/// faults have already been reported, internal faults are printed here, and
	/// either way the next line runs.
	pub fn run_lines<B: BufRead>(&mut self, mut input: B) {
		let mut line = String::new();
		loop {
			line.clear();
			print!("> ");
			if let Err(e) = stdout().flush() {
				tracing::warn!("Failed flush: {e}");
			}
			match input.read_line(&mut line) {
				Ok(0) => {
					println!("\nExited loxer repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					break;
				}
			}
			match self.run(line.trim()) {
				Ok(()) => {}
				Err(LoxError::InternalError(e)) => eprintln!("Failed run prompt: {e:#}"),
				Err(e) => tracing::debug!("Failed run prompt: {e}"),
			}
		}
	}
}
