pub mod interpreter;
pub mod parser;
pub mod scanner;

/// LoxError is the top-level error type for the Lox interpreter.
///
/// By the time one of the counted variants is returned, every fault behind it
/// has already gone through the [`Reporter`](crate::Reporter).
#[derive(thiserror::Error, Debug)]
pub enum LoxError {
	/// Internal compiler error, should never happen
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Scanner errors encountered during scanning
	#[error("Generated {0} scanner errors")]
	ScannerErrors(usize),
	/// Parser errors encountered during parsing
	#[error("Generated {0} parser errors")]
	ParserErrors(usize),
	/// Runtime error that aborted execution
	#[error("Runtime error: {0}")]
	RuntimeError(#[from] interpreter::RuntimeError),
}

impl LoxError {
	/// Process exit status for a driver: 65 for bad input, 70 for failures while running.
	pub fn exit_code(&self) -> u8 {
		match self {
			LoxError::ScannerErrors(_) | LoxError::ParserErrors(_) => 65,
			LoxError::RuntimeError(_) | LoxError::InternalError(_) => 70,
		}
	}
}

impl From<parser::ParserError> for LoxError {
	fn from(error: parser::ParserError) -> Self {
		match error {
			parser::ParserError::InternalError(e) => LoxError::InternalError(e),
			parser::ParserError::ParseError(_) => LoxError::ParserErrors(1),
		}
	}
}
