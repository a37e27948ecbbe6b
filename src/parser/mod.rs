//! The `Scanner` uses the `Lexical grammar`: its alphabet is characters and its
//! strings are lexemes. The `Parser` uses the `Syntactic grammar`: its alphabet
//! is tokens and its strings are statements.
//!
//! |Name|Operators|Associates
//! --|--|--
//! Assignment|=|Right
//! Equality|== !=|Left
//! Comparison|< > <= >=|Left
//! Term|+ -|Left
//! Factor|* /|Left
//! Unary|! -|Right
//!
//! Grammar:
//!
//! ``` BNF
//! program        → declaration* EOF ;
//! declaration    → varDecl | statement ;
//! varDecl        → "var" IDENTIFIER ( "=" expression )? ";" ;
//! statement      → printStmt | block | exprStmt ;
//! printStmt      → "print" expression ";" ;
//! block          → "{" declaration* "}" ;
//! exprStmt       → expression ";" ;
//! expression     → assignment ;
//! assignment     → IDENTIFIER "=" assignment | equality ;
//! equality       → comparison ( ( "!=" | "==" ) comparison )* ;
//! comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
//! term           → factor ( ( "-" | "+" ) factor )* ;
//! factor         → unary ( ( "/" | "*" ) unary )* ;
//! unary          → ( "!" | "-" ) unary | primary ;
//! primary        → NUMBER | STRING | "true" | "false" | "nil"
//!                | IDENTIFIER | "(" expression ")" ;
//! ```
//!
//! A syntax fault abandons the current declaration. The enclosing declaration
//! list (the top level, or the block being parsed) records it and skips ahead to
//! the next statement boundary (panic mode), so a single pass reports every
//! malformed declaration in the unit once. Inside a block the skip never passes
//! the block's closing `}`.
//!
//! Nesting of groupings, unary operators, assignments, blocks and binary
//! operator chains is capped at [`MAX_NESTING`] so that deep input is reported
//! as a syntax fault instead of exhausting the stack.

pub mod expression;

use std::{iter::Peekable, vec::IntoIter};

use TokenType::*;
use anyhow::anyhow;

use crate::{
	LoxError,
	error::parser::{ParseError, ParseErrorKind, ParserError},
	parser::expression::Expression,
	scanner::{Token, TokenType},
	statement::Statement,
};

/// How deep expressions and blocks may nest.
pub const MAX_NESTING: usize = 128;

type ExpressionResult<'a> = Result<Box<Expression<'a>>, ParserError>;

/// Statements of a whole source unit plus every syntax fault found on the way.
#[derive(Debug)]
pub struct Parsed<'a> {
	pub statements: Vec<Statement<'a>>,
	pub errors:     Vec<ParseError>,
}

/// Recursive-descent parser over a scanned token sequence.
pub struct Parser<'a> {
	/// The tokens to parse, ending with `Eof`.
	tokens: Peekable<IntoIter<Token<'a>>>,
	errors: Vec<ParseError>,
	/// Current nesting depth, bounded by [`MAX_NESTING`].
	depth:  usize,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self {
		Self { tokens: tokens.into_iter().peekable(), errors: Vec::new(), depth: 0 }
	}

	/// Parse every declaration up to `Eof`.
	#[tracing::instrument(level = "debug", skip_all)]
	pub fn parse(mut self) -> Result<Parsed<'a>, LoxError> {
		let mut statements = Vec::new();
		while !self.peek()?.is_eof() {
			statements.extend(self.recovering_declaration(false)?);
		}
		tracing::debug!(statements = statements.len(), errors = self.errors.len(), "parsed tokens");
		Ok(Parsed { statements, errors: self.errors })
	}

	/// Parse one declaration. A syntax fault is recorded and skipped over, and
	/// the declaration is discarded (`None`).
	fn recovering_declaration(&mut self, in_block: bool) -> Result<Option<Statement<'a>>, ParserError> {
		let depth = self.depth;
		match self.declaration() {
			Ok(statement) => Ok(Some(statement)),
			Err(ParserError::ParseError(e)) => {
				tracing::trace!(line = e.line(), "syntax fault: {e}");
				self.errors.push(e);
				self.depth = depth;
				self.synchronize(in_block)?;
				Ok(None)
			}
			Err(e) => Err(e),
		}
	}

	fn declaration(&mut self) -> Result<Statement<'a>, ParserError> {
		if self.next_if(|t| matches!(t, Var)).is_some() {
			return self.var_declaration();
		}
		self.statement()
	}

	fn var_declaration(&mut self) -> Result<Statement<'a>, ParserError> {
		let name_token = self.consume(|t| matches!(t, Identifier(_)), ParseErrorKind::ExpectVariableName)?;
		let initializer =
			if self.next_if(|t| matches!(t, Equal)).is_some() { Some(*self.expression()?) } else { None };
		self.consume(|t| matches!(t, Semicolon), ParseErrorKind::ExpectSemicolonAfterVarDeclaration)?;
		Ok(Statement::VarDeclaration { name_token, initializer })
	}

	fn statement(&mut self) -> Result<Statement<'a>, ParserError> {
		if self.next_if(|t| matches!(t, Print)).is_some() {
			let value = self.expression()?;
			self.consume(|t| matches!(t, Semicolon), ParseErrorKind::ExpectSemicolonAfterValue)?;
			return Ok(Statement::Print(*value));
		}
		if matches!(self.peek()?.r#type, LeftBrace) {
			return Ok(Statement::Block(self.nested(Self::block)?));
		}
		let expression = self.expression()?;
		self.consume(|t| matches!(t, Semicolon), ParseErrorKind::ExpectSemicolonAfterExpression)?;
		Ok(Statement::Expression(*expression))
	}

	/// A `{` ... `}` block. Faults inside it are recovered from without
	/// leaving the block.
	fn block(&mut self) -> Result<Vec<Statement<'a>>, ParserError> {
		self.advance()?; // consume '{'
		let mut statements = Vec::new();
		while !matches!(self.peek()?.r#type, RightBrace | Eof) {
			statements.extend(self.recovering_declaration(true)?);
		}
		self.consume(|t| matches!(t, RightBrace), ParseErrorKind::ExpectRightBrace)?;
		Ok(statements)
	}

	fn expression(&mut self) -> ExpressionResult<'a> { self.assignment() }

	/// Assignment is right-associative: the value side recurses into itself.
	fn assignment(&mut self) -> ExpressionResult<'a> {
		let expression = self.equality()?;
		let Some(equals) = self.next_if(|t| matches!(t, Equal)) else {
			return Ok(expression);
		};
		let value = self.nested(Self::assignment)?;
		match *expression {
			Expression::Variable(target) => Ok(Expression::assign(target, value)),
			other => {
				// Reported, but the parser is still in a sane state, no need to synchronize.
				self.errors.push(ParseError::new(&equals, ParseErrorKind::InvalidAssignmentTarget));
				Ok(Box::new(other))
			}
		}
	}

	/// Parse equality expressions.
	fn equality(&mut self) -> ExpressionResult<'a> {
		self.left_associative(Self::comparison, |t| matches!(t, BangEqual | EqualEqual))
	}

	/// Parse comparison expressions.
	fn comparison(&mut self) -> ExpressionResult<'a> {
		self.left_associative(Self::term, |t| matches!(t, Greater | GreaterEqual | Less | LessEqual))
	}

	/// Parse term expressions.
	fn term(&mut self) -> ExpressionResult<'a> { self.left_associative(Self::factor, |t| matches!(t, Minus | Plus)) }

	/// Parse factor expressions.
	fn factor(&mut self) -> ExpressionResult<'a> { self.left_associative(Self::unary, |t| matches!(t, Slash | Star)) }

	/// One binary precedence level: an operand, then fold every following
	/// `operator operand` pair into a left-growing tree.
	fn left_associative(
		&mut self,
		operand: fn(&mut Self) -> ExpressionResult<'a>,
		is_operator: fn(&TokenType<'a>) -> bool,
	) -> ExpressionResult<'a> {
		let base = self.depth;
		let mut expression = operand(self)?;
		while let Some(operator) = self.next_if(is_operator) {
			// Every fold makes the tree one level deeper.
			self.enter()?;
			expression = Expression::binary(expression, operator, operand(self)?);
		}
		self.depth = base;
		Ok(expression)
	}

	/// Parse unary expressions.
	fn unary(&mut self) -> ExpressionResult<'a> {
		if let Some(operator) = self.next_if(|t| matches!(t, Bang | Minus)) {
			return Ok(Expression::unary(operator, self.nested(Self::unary)?));
		}
		self.primary()
	}

	/// Parse primary expressions.
	fn primary(&mut self) -> ExpressionResult<'a> {
		let r#type = self.peek()?.r#type.clone();
		match r#type {
			False | True | Nil | NumberLiteral(_) | StringLiteral(_) | Identifier(_) => {
				let token = self.advance()?;
				Ok(Box::new(Expression::try_from(token)?))
			}
			LeftParen => {
				self.advance()?; // consume '('
				let expression = self.nested(Self::expression)?;
				self.consume(|t| matches!(t, RightParen), ParseErrorKind::ExpectRightParen)?;
				Ok(Expression::grouping(expression))
			}
			_ => Err(self.error_at_current(ParseErrorKind::ExpectExpression)),
		}
	}

	/// Consume the current token if it satisfies `predicate`. `Eof` never does.
	fn next_if(&mut self, predicate: impl Fn(&TokenType<'a>) -> bool) -> Option<Token<'a>> {
		self.tokens.next_if(|token| !token.is_eof() && predicate(&token.r#type))
	}

	/// Consume the expected token or fail with `kind` at the current token.
	fn consume(
		&mut self,
		predicate: impl Fn(&TokenType<'a>) -> bool,
		kind: ParseErrorKind,
	) -> Result<Token<'a>, ParserError> {
		self.next_if(predicate).ok_or_else(|| self.error_at_current(kind))
	}

	/// Advance to the next token. The `Eof` sentinel is never consumed.
	fn advance(&mut self) -> Result<Token<'a>, ParserError> {
		let token = self.peek()?;
		if token.is_eof() {
			return Ok(token.clone());
		}
		self.tokens.next().ok_or_else(|| anyhow!("Unexpected EOF").into())
	}

	/// Peek at the current token.
	fn peek(&mut self) -> Result<&Token<'a>, ParserError> {
		self.tokens.peek().ok_or_else(|| anyhow!("Token stream has no end-of-input token").into())
	}

	fn error_at_current(&mut self, kind: ParseErrorKind) -> ParserError {
		match self.peek() {
			Ok(token) => ParseError::new(token, kind).into(),
			Err(e) => e,
		}
	}

	/// Run `parse` one nesting level deeper.
	fn nested<T>(&mut self, parse: fn(&mut Self) -> Result<T, ParserError>) -> Result<T, ParserError> {
		self.enter()?;
		let result = parse(self);
		self.depth -= 1;
		result
	}

	fn enter(&mut self) -> Result<(), ParserError> {
		if self.depth >= MAX_NESTING {
			return Err(self.error_at_current(ParseErrorKind::TooMuchNesting));
		}
		self.depth += 1;
		Ok(())
	}

	/// Discard tokens until a statement boundary: just past a `;`, or right
	/// before a keyword that starts a declaration or statement. Braces skipped
	/// on the way are balanced, and inside a block the skip stops right before
	/// the block's own `}`.
	fn synchronize(&mut self, in_block: bool) -> Result<(), ParserError> {
		let mut open = 0usize;
		while !self.peek()?.is_eof() {
			if in_block && open == 0 && matches!(self.peek()?.r#type, RightBrace) {
				return Ok(());
			}
			let token = self.advance()?;
			match token.r#type {
				LeftBrace => open += 1,
				RightBrace => open = open.saturating_sub(1),
				Semicolon if open == 0 => return Ok(()),
				_ => {}
			}
			if open == 0 && self.peek()?.r#type.starts_statement() {
				return Ok(());
			}
		}
		Ok(())
	}
}
