//! # How bare text turns into running code
//!
//! User's source code: `var average = (min + max) / 2;`

//! ## Scanning
//!
//! Also known as `lexing` or `lexical analysis`, takes in the characters and
//! converts them into tokens. Single characters `(`, `,`, `.`, numbers `123`,
//! string literals `"hi!"`, identifiers `min` are all tokens.
//!
//! Whitespaces and comments are ignored. So the tokens are
//! `["var", "average", "=", "(", "min", "+", "max", ")", "/", "2", ";"]`.

//! ## Parsing
//!
//! A `parser` builds a tree structure of tokens, the `abstract syntax tree` or
//! `AST`. The `parser` also reports `syntax errors`.
//!
//! ``` markdown
//! average (Statement::VarDeclaration)
//! └── / (Expression::Binary)
//!     ├── (group) (Expression::Grouping)
//!     │   └── + (Expression::Binary)
//!     │       ├── min (Expression::Variable)
//!     │       └── max (Expression::Variable)
//!     └── 2 (Expression::Literal)
//! ```

//! ## Tree-walk interpreting
//!
//! Execute the code right after parsing it, recursing over the AST. Variables
//! live in a chain of scopes: each block opens a new one on top of the scope
//! it appears in, and a name is looked up from the innermost scope outward.

//! ## Faults
//!
//! Lexical and syntax faults are collected over a whole pass and then keep the
//! unit from running at all. Runtime faults stop execution immediately. Both
//! go through a [`Reporter`].

pub mod cli;
mod environment;
mod error;
mod interpreter;
mod loxer;
mod parser;
mod reporter;
mod scanner;
mod statement;

pub use error::{
	LoxError,
	interpreter::{InterpreterError, RuntimeError, RuntimeErrorKind},
	parser::{ParseError, ParseErrorKind, ParserError},
	scanner::{ScanError, ScanErrorKind, ScannerError},
};
pub use interpreter::{Interpreter, value::Value};
pub use loxer::Loxer;
pub use parser::{Parsed, Parser, expression::{Expression, LiteralValue}};
pub use reporter::{Reporter, StderrReporter};
pub use scanner::{Scanned, Scanner, Token, TokenType};
pub use statement::Statement;
