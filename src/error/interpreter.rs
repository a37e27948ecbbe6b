use crate::scanner::Token;

/// Errors that can occur during interpretation
#[derive(thiserror::Error, Debug)]
pub enum InterpreterError {
	/// Output sink failures and other faults the program itself didn't cause
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	#[error(transparent)]
	RuntimeError(#[from] RuntimeError),
}

/// A runtime fault, carrying the offending token's line and lexeme.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
	line:   usize,
	lexeme: String,
	kind:   RuntimeErrorKind,
}

impl RuntimeError {
	pub fn new(token: &Token, kind: RuntimeErrorKind) -> Self {
		Self { line: token.line, lexeme: token.lexeme.to_string(), kind }
	}

	pub fn undefined_variable(token: &Token) -> Self {
		Self::new(token, RuntimeErrorKind::UndefinedVariable(token.lexeme.to_string()))
	}

	pub fn line(&self) -> usize { self.line }

	pub fn lexeme(&self) -> &str { &self.lexeme }

	pub fn kind(&self) -> &RuntimeErrorKind { &self.kind }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorKind {
	/// Unary `-` on a non-number
	OperandMustBeNumber,
	/// `-`, `*`, `/` or a comparison with a non-number side
	OperandsMustBeNumbers,
	/// `+` on anything but two numbers or two strings
	OperandsMustBeNumbersOrStrings,
	/// Read or assignment of a name bound nowhere in the scope chain
	UndefinedVariable(String),
}

impl std::fmt::Display for RuntimeErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use RuntimeErrorKind::*;
		match self {
			OperandMustBeNumber => write!(f, "Operand must be a number."),
			OperandsMustBeNumbers => write!(f, "Operands must be numbers."),
			OperandsMustBeNumbersOrStrings => write!(f, "Operands must be two numbers or two strings."),
			UndefinedVariable(name) => write!(f, "Undefined variable '{name}'."),
		}
	}
}
