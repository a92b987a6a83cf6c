//! Tree-sitter based syntax layer for script regions.
//!
//! This module provides:
//! - [`ScriptParser`]: grammar selection per [`ScriptFlavor`] and parse
//!   diagnostics for malformed input
//! - [`SyntaxNode`]: a tagged view over the node kinds the excision
//!   engine inspects (calls and member accesses), everything else opaque
//! - [`walk`]: an iterative pre-order walk driving a [`Visitor`]
//!
//! # Design Principles
//!
//! - **Byte-range anchored**: every node carries byte offsets into the
//!   exact buffer that was parsed, so spans never need re-mapping
//! - **No recursion**: deep expression nesting is walked with an explicit stack

mod node;
mod parser;

pub use node::{walk, CallExpr, MemberAccess, SyntaxNode, Visitor, Walk};
pub use parser::{ParseDiagnostic, ScriptFlavor, ScriptParser, SyntaxTree};
