mod common;

use std::io::{self, Write};

use common::{Diagnostic, RecordingReporter, printed, recording_loxer};
use loxer::{LoxError, Loxer};
use pretty_assertions::assert_eq;

fn compile_errors(loxer: &common::TestLoxer) -> Vec<&str> {
	loxer
		.reporter()
		.diagnostics
		.iter()
		.filter_map(|d| match d {
			Diagnostic::Compile(message) => Some(message.as_str()),
			Diagnostic::Runtime(_) => None,
		})
		.collect()
}

#[test]
fn runs_a_clean_unit() {
	let mut loxer = recording_loxer();
	loxer.run("var a = 1; { var a = 2; print a; } print a;").unwrap();
	assert_eq!(printed(&loxer), "2\n1\n");
	assert!(!loxer.had_error());
}

#[test]
fn globals_persist_between_runs() {
	let mut loxer = recording_loxer();
	loxer.run("var counter = 1;").unwrap();
	loxer.run("counter = counter + 1;").unwrap();
	loxer.run("print counter;").unwrap();
	assert_eq!(printed(&loxer), "2\n");
}

#[test]
fn lexical_faults_block_execution() {
	let mut loxer = recording_loxer();
	let error = loxer.run("print 1;\nprint 2 @ 3;\n\"abc").unwrap_err();
	assert!(matches!(error, LoxError::ScannerErrors(2)));
	assert_eq!(error.exit_code(), 65);
	assert_eq!(printed(&loxer), "");
	assert_eq!(compile_errors(&loxer), vec![
		"[line 2] Error: Unexpected character '@'.",
		"[line 3] Error: Unterminated string.",
		"[line 2] Error at '3': Expect ';' after value.",
	]);
}

#[test]
fn syntax_faults_are_all_reported_and_block_execution() {
	let mut loxer = recording_loxer();
	let error = loxer.run("print 1;\nvar = 2;\nprint (3;\nprint 4;").unwrap_err();
	assert!(matches!(error, LoxError::ParserErrors(2)));
	assert_eq!(printed(&loxer), "");
	assert_eq!(compile_errors(&loxer), vec![
		"[line 2] Error at '=': Expect variable name.",
		"[line 3] Error at ';': Expect ')' after expression.",
	]);
}

#[test]
fn syntax_fault_inside_a_block_is_reported_once() {
	let mut loxer = recording_loxer();
	let error = loxer.run("{ print ; print 2; } print 3;").unwrap_err();
	assert!(matches!(error, LoxError::ParserErrors(1)));
	assert_eq!(printed(&loxer), "");
	assert_eq!(compile_errors(&loxer), vec!["[line 1] Error at ';': Expect expression."]);
}

#[test]
fn invalid_assignment_target_blocks_execution() {
	let mut loxer = recording_loxer();
	let error = loxer.run("var a = 1; print a; 1 = a;").unwrap_err();
	assert!(matches!(error, LoxError::ParserErrors(1)));
	assert_eq!(printed(&loxer), "");
	assert_eq!(compile_errors(&loxer), vec!["[line 1] Error at '=': Invalid assignment target."]);
}

#[test]
fn runtime_fault_is_reported_once_and_stops_the_run() {
	let mut loxer = recording_loxer();
	let error = loxer.run("print \"before\";\n{\n  print \"a\" + 1;\n}\nprint \"after\";").unwrap_err();
	assert!(matches!(error, LoxError::RuntimeError(_)));
	assert_eq!(error.exit_code(), 70);
	assert_eq!(printed(&loxer), "before\n");
	assert_eq!(loxer.reporter().diagnostics, vec![Diagnostic::Runtime(
		"Operands must be two numbers or two strings.\n[line 3]".to_string()
	)]);
}

#[test]
fn undefined_variable_after_block() {
	let mut loxer = recording_loxer();
	let error = loxer.run("{ var hidden = 1; }\nprint hidden;").unwrap_err();
	match error {
		LoxError::RuntimeError(e) => {
			assert_eq!(e.kind(), &loxer::RuntimeErrorKind::UndefinedVariable("hidden".to_string()));
			assert_eq!(e.line(), 2);
		}
		other => panic!("expected a runtime error, got {other}"),
	}
}

#[test]
fn assignment_never_creates_a_global() {
	let mut loxer = recording_loxer();
	assert!(loxer.run("fresh = 1;").is_err());
	assert!(loxer.run("print fresh;").is_err());
	assert_eq!(loxer.reporter().diagnostics.len(), 2);
}

#[test]
fn a_bad_unit_does_not_poison_the_next_one() {
	let mut loxer = recording_loxer();
	assert!(loxer.run("print ;").is_err());
	assert!(loxer.had_error());
	loxer.run("print \"ok\";").unwrap();
	assert!(!loxer.had_error());
	assert_eq!(printed(&loxer), "ok\n");
}

#[test]
fn stages_can_be_driven_separately() {
	let mut loxer = recording_loxer();
	let source = "var x = 7 / 2; print x;";
	let tokens = loxer.scan(source).unwrap();
	assert_eq!(tokens.last().map(|t| t.lexeme), Some(""));
	let statements = loxer.parse(tokens).unwrap();
	assert_eq!(statements.len(), 2);
	assert!(!loxer.had_error());
	loxer.interpret(&statements).unwrap();
	let (reporter, output) = loxer.into_parts();
	assert!(reporter.diagnostics.is_empty());
	assert_eq!(String::from_utf8(output).unwrap(), "3.5\n");
}

/// Output sink whose first write fails, like a pipe that was briefly unavailable.
#[derive(Default)]
struct FlakyOutput {
	failed:  bool,
	written: Vec<u8>,
}

impl Write for FlakyOutput {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		if !self.failed {
			self.failed = true;
			return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink unavailable"));
		}
		self.written.write(buf)
	}

	fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

#[test]
fn failing_output_is_an_internal_fault() {
	let mut loxer = Loxer::with_sinks(RecordingReporter::default(), FlakyOutput::default());
	let error = loxer.run("print 1;").unwrap_err();
	assert!(matches!(error, LoxError::InternalError(_)));
	assert_eq!(error.exit_code(), 70);
	assert!(loxer.reporter().diagnostics.is_empty());
}

#[test]
fn prompt_keeps_going_after_every_kind_of_fault() {
	let mut loxer = Loxer::with_sinks(RecordingReporter::default(), FlakyOutput::default());
	loxer.run_lines("print 1;\nprint ;\nprint -nil;\nvar a = 2;\nprint a;\n".as_bytes());
	let (reporter, output) = loxer.into_parts();
	assert_eq!(reporter.diagnostics, vec![
		Diagnostic::Compile("[line 1] Error at ';': Expect expression.".to_string()),
		Diagnostic::Runtime("Operand must be a number.\n[line 1]".to_string()),
	]);
	assert_eq!(String::from_utf8(output.written).unwrap(), "2\n");
}
