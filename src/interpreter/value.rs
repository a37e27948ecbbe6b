use std::fmt::Display;

use Value::*;

/// Value represents a runtime value in Lox.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Nil,
	Bool(bool),
	Num(f64),
	Str(String),
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Nil => write!(f, "nil"),
			Bool(b) => write!(f, "{b}"),
			// `Display` for f64 is already the shortest form: `3`, `3.5`.
			Num(n) => write!(f, "{n}"),
			Str(s) => write!(f, "{s}"),
		}
	}
}

impl Value {
	/// `nil` and `false` are falsy, everything else is truthy, `0` and `""` included.
	pub fn is_truthy(&self) -> bool { !matches!(self, Nil | Bool(false)) }

	/// Equality is defined for every pair: values of different types are never equal.
	pub fn is_equal(&self, other: &Self) -> bool {
		match (self, other) {
			(Nil, Nil) => true,
			(Bool(l), Bool(r)) => l == r,
			(Num(l), Num(r)) => l == r,
			(Str(l), Str(r)) => l == r,
			_ => false,
		}
	}

	pub fn as_number(&self) -> Option<f64> {
		match self {
			Num(n) => Some(*n),
			_ => None,
		}
	}

	/// `+` on two numbers or two strings.
	pub fn plus(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Num(l), Num(r)) => Some(Num(l + r)),
			(Str(l), Str(r)) => Some(Str(format!("{l}{r}"))),
			_ => None,
		}
	}
}
