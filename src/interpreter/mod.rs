//! Lox tree-walking interpreter.
//!
//! The interpreter walks the statements produced by the parser in order,
//! recursively evaluating each expression (left operand before right, operands
//! before the operator) and computing its runtime value.
//!
//! # Expression Types
//!
//! - **Literals**: `nil`, booleans, numbers, strings
//! - **Unary**: `-` (negation), `!` (logical NOT)
//! - **Binary**: `+`, `-`, `*`, `/`, comparisons, equality
//! - **Grouping**: Parenthesized expressions
//! - **Variable** and **Assign**: reads and writes through the scope chain
//!
//! The first runtime fault stops the whole run; output already written stays.

pub mod value;

use std::io::Write;

use Expression::*;
use anyhow::{Context, anyhow};
use value::Value;

use crate::{
	environment::Environment,
	error::interpreter::{InterpreterError, RuntimeError, RuntimeErrorKind},
	parser::expression::{Expression, LiteralValue},
	scanner::{Token, TokenType::*},
	statement::Statement,
};

/// Interpreter that executes Lox statements, writing `print` output to `W`.
pub struct Interpreter<W> {
	environment: Environment,
	output:      W,
}

impl<W: Write> Interpreter<W> {
	pub fn new(output: W) -> Self { Self { environment: Environment::new(), output } }

	pub fn output(&self) -> &W { &self.output }

	pub fn into_output(self) -> W { self.output }

	#[cfg(test)]
	pub(crate) fn environment(&self) -> &Environment { &self.environment }

	/// Execute the statements in order, stopping at the first runtime fault.
	#[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
	pub fn interpret(&mut self, statements: &[Statement]) -> Result<(), InterpreterError> {
		statements.iter().try_for_each(|statement| self.execute(statement))?;
		self.output.flush().context("Failed flush output")?;
		Ok(())
	}

	fn execute(&mut self, statement: &Statement) -> Result<(), InterpreterError> {
		tracing::trace!(%statement, "execute");
		match statement {
			Statement::Expression(expression) => {
				self.evaluate(expression)?;
			}
			Statement::Print(expression) => {
				let value = self.evaluate(expression)?;
				writeln!(self.output, "{value}").context("Failed write print output")?;
			}
			Statement::VarDeclaration { name_token, initializer } => {
				let value = match initializer {
					Some(initializer) => self.evaluate(initializer)?,
					None => Value::Nil,
				};
				self.environment.define(name_token.lexeme, value);
			}
			Statement::Block(statements) => self.execute_block(statements)?,
		}
		Ok(())
	}

	/// Run `statements` in a fresh child scope. The previous scope is restored
	/// whether the block completes or faults.
	fn execute_block(&mut self, statements: &[Statement]) -> Result<(), InterpreterError> {
		let previous = self.environment.push_scope();
		let result = statements.iter().try_for_each(|statement| self.execute(statement));
		self.environment.pop_scope(previous);
		result
	}

	/// Evaluate the given expression and return its value.
	fn evaluate(&mut self, expr: &Expression) -> Result<Value, InterpreterError> {
		Ok(match expr {
			Literal(lit) => match lit {
				LiteralValue::Nil => Value::Nil,
				LiteralValue::Boolean(b) => Value::Bool(*b),
				LiteralValue::Number(n) => Value::Num(*n),
				LiteralValue::StringLiteral(s) => Value::Str(s.to_string()),
			},
			Grouping(inner) => self.evaluate(inner)?,
			Variable(token) => self.environment.get(token)?,
			Assign { target, value } => {
				let value = self.evaluate(value)?;
				self.environment.assign(target, value.clone())?;
				value
			}
			Unary { operator, right } => {
				let right_value = self.evaluate(right)?;
				match operator.r#type {
					Minus => Value::Num(-number_operand(operator, &right_value)?),
					Bang => Value::Bool(!right_value.is_truthy()),
					_ => return Err(anyhow!("Invalid unary operator {operator}").into()),
				}
			}
			Binary { left, operator, right } => {
				let left_value = self.evaluate(left)?;
				let right_value = self.evaluate(right)?;
				binary(operator, &left_value, &right_value)?
			}
		})
	}
}

fn binary(operator: &Token, left: &Value, right: &Value) -> Result<Value, InterpreterError> {
	let value = match operator.r#type {
		Plus => left
			.plus(right)
			.ok_or_else(|| RuntimeError::new(operator, RuntimeErrorKind::OperandsMustBeNumbersOrStrings))?,
		EqualEqual => Value::Bool(left.is_equal(right)),
		BangEqual => Value::Bool(!left.is_equal(right)),
		_ => {
			let (l, r) = number_operands(operator, left, right)?;
			match operator.r#type {
				Minus => Value::Num(l - r),
				Star => Value::Num(l * r),
				Slash => Value::Num(l / r),
				Greater => Value::Bool(l > r),
				GreaterEqual => Value::Bool(l >= r),
				Less => Value::Bool(l < r),
				LessEqual => Value::Bool(l <= r),
				_ => return Err(anyhow!("Invalid binary operator {operator}").into()),
			}
		}
	};
	Ok(value)
}

fn number_operand(operator: &Token, operand: &Value) -> Result<f64, RuntimeError> {
	operand.as_number().ok_or_else(|| RuntimeError::new(operator, RuntimeErrorKind::OperandMustBeNumber))
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
	match (left.as_number(), right.as_number()) {
		(Some(l), Some(r)) => Ok((l, r)),
		_ => Err(RuntimeError::new(operator, RuntimeErrorKind::OperandsMustBeNumbers)),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::{parser::Parser, scanner::Scanner};

	fn run_with(interpreter: &mut Interpreter<Vec<u8>>, input: &str) -> Result<(), InterpreterError> {
		let scanned = Scanner::new(input).scan_tokens().unwrap();
		let parsed = Parser::new(scanned.tokens).parse().unwrap();
		assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
		interpreter.interpret(&parsed.statements)
	}

	/// Run `input`, returning what it printed and the runtime fault, if any.
	fn run(input: &str) -> (String, Option<RuntimeError>) {
		let mut interpreter = Interpreter::new(Vec::new());
		let fault = match run_with(&mut interpreter, input) {
			Ok(()) => None,
			Err(InterpreterError::RuntimeError(e)) => Some(e),
			Err(e) => panic!("internal error: {e}"),
		};
		(String::from_utf8(interpreter.into_output()).unwrap(), fault)
	}

	fn output(input: &str) -> String {
		let (output, fault) = run(input);
		assert_eq!(fault, None);
		output
	}

	fn fault(input: &str) -> RuntimeError {
		let (_, fault) = run(input);
		fault.expect("expected a runtime fault")
	}

	#[test]
	fn arithmetic() {
		assert_eq!(output("print 1 - 2 - 3;"), "-4\n");
		assert_eq!(output("print 2 + 3 * 4;"), "14\n");
		assert_eq!(output("print (2 + 3) * 4;"), "20\n");
		assert_eq!(output("print 6 / 2;"), "3\n");
		assert_eq!(output("print 7 / 2;"), "3.5\n");
		assert_eq!(output("print -(1 + 2);"), "-3\n");
	}

	#[test]
	fn division_by_zero_is_floating_point() {
		assert_eq!(output("print 1 / 0;"), "inf\n");
		assert_eq!(output("print -1 / 0;"), "-inf\n");
		assert_eq!(output("print 0 / 0 == 0 / 0;"), "false\n");
	}

	#[test]
	fn strings() {
		assert_eq!(output("print \"a\" + \"b\";"), "ab\n");
		assert_eq!(output("print \"\";"), "\n");
		let error = fault("print \"a\" + 1;");
		assert_eq!(error.kind(), &RuntimeErrorKind::OperandsMustBeNumbersOrStrings);
		assert_eq!(error.lexeme(), "+");
	}

	#[test]
	fn truthiness() {
		assert_eq!(output("print !nil;"), "true\n");
		assert_eq!(output("print !0;"), "false\n");
		assert_eq!(output("print !\"\";"), "false\n");
		assert_eq!(output("print !!true;"), "true\n");
	}

	#[test]
	fn comparison_and_equality() {
		assert_eq!(output("print 1 < 2; print 2 <= 2; print 1 > 2; print 3 >= 4;"), "true\ntrue\nfalse\nfalse\n");
		assert_eq!(output("print nil == nil; print nil == false; print 1 == \"1\";"), "true\nfalse\nfalse\n");
		assert_eq!(output("print \"a\" != \"b\"; print 1 == 1;"), "true\ntrue\n");
		assert_eq!(fault("print \"a\" < \"b\";").kind(), &RuntimeErrorKind::OperandsMustBeNumbers);
	}

	#[test]
	fn operand_type_faults() {
		assert_eq!(fault("print -\"x\";").kind(), &RuntimeErrorKind::OperandMustBeNumber);
		assert_eq!(fault("print nil * 2;").kind(), &RuntimeErrorKind::OperandsMustBeNumbers);
		assert_eq!(fault("print true - 1;").to_string(), "Operands must be numbers.");
	}

	#[test]
	fn variables() {
		assert_eq!(output("var a; print a;"), "nil\n");
		assert_eq!(output("var a = 1; var a = \"re\"; print a;"), "re\n");
		assert_eq!(output("var a = 1; print a = 2; print a;"), "2\n2\n");
		assert_eq!(output("var a; var b; a = b = 3; print a + b;"), "6\n");
	}

	#[test]
	fn undefined_variable() {
		let error = fault("print nope;");
		assert_eq!(error.kind(), &RuntimeErrorKind::UndefinedVariable("nope".into()));
		let error = fault("\n\nnope = 1;");
		assert_eq!(error.line(), 3);
		assert_eq!(error.to_string(), "Undefined variable 'nope'.");
	}

	#[test]
	fn shadowing_and_scopes() {
		assert_eq!(output("var a = 1; { var a = 2; print a; } print a;"), "2\n1\n");
		assert_eq!(output("var a = 1; { a = 2; } print a;"), "2\n");
		assert_eq!(output("var a = 1; { var b = a + 1; { print a + b; } }"), "3\n");
		let (out, error) = run("{ var inner = 1; print inner; } print inner;");
		assert_eq!(out, "1\n");
		assert_eq!(error.map(|e| e.kind().clone()), Some(RuntimeErrorKind::UndefinedVariable("inner".into())));
	}

	#[test]
	fn fault_aborts_the_run_and_keeps_output() {
		let (out, error) = run("print 1; { print 2; { print -nil; } print 3; } print 4;");
		assert_eq!(out, "1\n2\n");
		assert_eq!(error.map(|e| e.kind().clone()), Some(RuntimeErrorKind::OperandMustBeNumber));
	}

	#[test]
	fn fault_inside_block_restores_the_global_scope() {
		let mut interpreter = Interpreter::new(Vec::new());
		run_with(&mut interpreter, "var a = \"global\";").unwrap();
		assert!(run_with(&mut interpreter, "{ var a = \"local\"; { a = -a; } }").is_err());
		assert_eq!(interpreter.environment().depth(), 1);
		run_with(&mut interpreter, "print a;").unwrap();
		assert_eq!(String::from_utf8(interpreter.into_output()).unwrap(), "global\n");
	}

	#[test]
	fn operands_evaluate_left_to_right() {
		let (out, error) = run("var a = 1; print (a = 2) + a; print b + (b = 1);");
		assert_eq!(out, "4\n");
		assert_eq!(error.map(|e| e.kind().clone()), Some(RuntimeErrorKind::UndefinedVariable("b".into())));
	}
}
