use crate::scanner::Token;

#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

/// A syntax fault, located at the token where it was detected.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Error{location}: {kind}")]
pub struct ParseError {
	line:     usize,
	/// ` at end` or ` at '<lexeme>'`.
	location: String,
	kind:     ParseErrorKind,
}

impl ParseError {
	pub fn new(token: &Token, kind: ParseErrorKind) -> Self {
		let location = if token.is_eof() { " at end".to_string() } else { format!(" at '{}'", token.lexeme) };
		Self { line: token.line, location, kind }
	}

	pub fn line(&self) -> usize { self.line }

	pub fn kind(&self) -> &ParseErrorKind { &self.kind }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
	ExpectExpression,
	ExpectRightParen,
	ExpectSemicolonAfterValue,
	ExpectSemicolonAfterExpression,
	ExpectVariableName,
	ExpectSemicolonAfterVarDeclaration,
	ExpectRightBrace,
	InvalidAssignmentTarget,
	TooMuchNesting,
}

impl std::fmt::Display for ParseErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorKind::*;
		let message = match self {
			ExpectExpression => "Expect expression.",
			ExpectRightParen => "Expect ')' after expression.",
			ExpectSemicolonAfterValue => "Expect ';' after value.",
			ExpectSemicolonAfterExpression => "Expect ';' after expression.",
			ExpectVariableName => "Expect variable name.",
			ExpectSemicolonAfterVarDeclaration => "Expect ';' after variable declaration.",
			ExpectRightBrace => "Expect '}' after block.",
			InvalidAssignmentTarget => "Invalid assignment target.",
			TooMuchNesting => "Too much nesting.",
		};
		write!(f, "{message}")
	}
}
