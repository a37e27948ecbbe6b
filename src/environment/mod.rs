//! Lexical scope chain.
//!
//! Frames live in an arena and point at their enclosing frame by index. Frame
//! `0` is the global frame and lives as long as the environment. A block
//! pushes a frame whose parent is the current one and, when it exits by any
//! path, hands the previous index back to [`Environment::pop_scope`], which
//! drops the child frame. Blocks nest strictly, so the arena is also a stack.

use std::collections::HashMap;

use crate::{error::interpreter::RuntimeError, interpreter::value::Value, scanner::Token};

/// Index of a frame in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId(usize);

impl FrameId {
	pub const GLOBAL: FrameId = FrameId(0);
}

#[derive(Debug, Default)]
struct Frame {
	variables: HashMap<String, Value>,
	enclosing: Option<FrameId>,
}

#[derive(Debug)]
pub struct Environment {
	frames:  Vec<Frame>,
	current: FrameId,
}

impl Default for Environment {
	fn default() -> Self { Self::new() }
}

impl Environment {
	pub fn new() -> Self { Self { frames: vec![Frame::default()], current: FrameId::GLOBAL } }

	/// Number of live frames, the global one included.
	pub fn depth(&self) -> usize { self.frames.len() }

	/// Install a fresh child of the current frame as current, returning the
	/// frame to restore on exit.
	pub fn push_scope(&mut self) -> FrameId {
		let previous = self.current;
		self.frames.push(Frame { variables: HashMap::new(), enclosing: Some(previous) });
		self.current = FrameId(self.frames.len() - 1);
		tracing::trace!(depth = self.depth(), "entered scope");
		previous
	}

	/// Drop every frame above `previous` and make it current again.
	pub fn pop_scope(&mut self, previous: FrameId) {
		self.frames.truncate(previous.0 + 1);
		self.current = previous;
		tracing::trace!(depth = self.depth(), "left scope");
	}

	/// A variable statement doesn't just define a new variable, it can also be
	/// used to redefine an existing variable in the same frame.
	pub fn define(&mut self, name: &str, value: Value) {
		self.frames[self.current.0].variables.insert(name.to_string(), value);
	}

	/// Look the name up from the innermost frame outward.
	pub fn get(&self, token: &Token) -> Result<Value, RuntimeError> {
		self.chain()
			.find_map(|frame| frame.variables.get(token.lexeme))
			.cloned()
			.ok_or_else(|| RuntimeError::undefined_variable(token))
	}

	/// Assign a value to an existing variable, never creating one.
	pub fn assign(&mut self, token: &Token, value: Value) -> Result<(), RuntimeError> {
		let mut id = Some(self.current);
		while let Some(FrameId(index)) = id {
			let frame = &mut self.frames[index];
			if let Some(slot) = frame.variables.get_mut(token.lexeme) {
				*slot = value;
				return Ok(());
			}
			id = frame.enclosing;
		}
		Err(RuntimeError::undefined_variable(token))
	}

	/// Frames from the current one out to the global frame.
	fn chain(&self) -> impl Iterator<Item = &Frame> {
		std::iter::successors(Some(&self.frames[self.current.0]), |frame| {
			frame.enclosing.map(|FrameId(index)| &self.frames[index])
		})
	}
}
