//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. Statements only produce effects.

use crate::{parser::expression::Expression, scanner::Token};

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
	/// A block of statements with its own scope.
	Block(Vec<Statement<'a>>),
	/// An expression used as a statement.
	Expression(Expression<'a>),
	/// A print statement.
	Print(Expression<'a>),
	/// A variable declaration statement.
	VarDeclaration {
		/// The token of the variable being declared.
		name_token:  Token<'a>,
		/// An optional initializer expression.
		initializer: Option<Expression<'a>>,
	},
}

impl std::fmt::Display for Statement<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Statement::Block(statements) => {
				write!(f, "(block")?;
				for statement in statements {
					write!(f, " {statement}")?;
				}
				write!(f, ")")
			}
			Statement::Expression(expression) => write!(f, "(; {expression})"),
			Statement::Print(expression) => write!(f, "(print {expression})"),
			Statement::VarDeclaration { name_token, initializer: Some(initializer) } => {
				write!(f, "(var {} {initializer})", name_token.lexeme)
			}
			Statement::VarDeclaration { name_token, initializer: None } => write!(f, "(var {})", name_token.lexeme),
		}
	}
}
