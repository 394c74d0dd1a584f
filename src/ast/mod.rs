/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The source file root, top-level items and identifiers
/// - expressions: Expression nodes and binary operators
/// - statements: Statement nodes and blocks
/// - types: Type annotations
/// - printer: Canonical source printing (`Display`) for every node
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
