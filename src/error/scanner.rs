/// Scanner related errors
#[derive(thiserror::Error, Debug)]
pub enum ScannerError {
	/// Internal compiler error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered during scanning
	#[error(transparent)]
	ScanError(#[from] ScanError),
}

/// A lexical fault with the line it was found on.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Error: {kind}")]
pub struct ScanError {
	/// The line number where the error occurred.
	line: usize,
	kind: ScanErrorKind,
}

impl ScanError {
	pub fn new(line: usize, kind: ScanErrorKind) -> Self { Self { line, kind } }

	pub fn line(&self) -> usize { self.line }

	pub fn kind(&self) -> &ScanErrorKind { &self.kind }
}

/// Types of scanning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanErrorKind {
	/// Error for unexpected characters.
	UnexpectedCharacter(char),
	/// Reached end of input before the closing `"`.
	UnterminatedString,
}

impl std::fmt::Display for ScanErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorKind::*;
		match self {
			UnexpectedCharacter(c) => {
				write!(f, "Unexpected character '{c}'.")
			}
			UnterminatedString => {
				write!(f, "Unterminated string.")
			}
		}
	}
}
