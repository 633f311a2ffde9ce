//! Construction API for syntax trees.
//!
//! Front ends (the textual parser, the design-file importers) and tests build
//! trees through `AstBuilder`. Methods take `&self` so calls nest naturally:
//!
//! ```text
//! let b = AstBuilder::new();
//! let x = b.variable("x", Some(b.type_named("Number")), Some(b.number(4.0)));
//! let root = b.program([x]);
//! let arena = b.finish();
//! ```

use std::cell::RefCell;

use crate::ast::{Literal, NodeKind};
use crate::{NodeId, NodeRange, SyntaxArena};

/// Builds nodes into a [`SyntaxArena`].
#[derive(Debug, Default)]
pub struct AstBuilder {
    arena: RefCell<SyntaxArena>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue building into an existing arena.
    pub fn from_arena(arena: SyntaxArena) -> Self {
        AstBuilder {
            arena: RefCell::new(arena),
        }
    }

    pub fn finish(self) -> SyntaxArena {
        self.arena.into_inner()
    }

    /// Run `f` against the arena built so far.
    pub fn with_arena<R>(&self, f: impl FnOnce(&SyntaxArena) -> R) -> R {
        f(&self.arena.borrow())
    }

    fn alloc(&self, kind: NodeKind) -> NodeId {
        self.arena.borrow_mut().alloc(kind)
    }

    fn list(&self, ids: impl IntoIterator<Item = NodeId>) -> NodeRange {
        // Collect first: the iterator may itself call back into the builder.
        let ids: Vec<NodeId> = ids.into_iter().collect();
        self.arena.borrow_mut().alloc_list(ids)
    }

    fn generic_parameters(&self, names: &[&str]) -> NodeRange {
        let params: Vec<NodeId> = names
            .iter()
            .map(|name| {
                let pattern = self.pattern(name);
                self.alloc(NodeKind::GenericParameter { name: pattern })
            })
            .collect();
        self.list(params)
    }

    // Program structure

    pub fn program(&self, statements: impl IntoIterator<Item = NodeId>) -> NodeId {
        let statements = self.list(statements);
        self.alloc(NodeKind::Program { statements })
    }

    pub fn pattern(&self, name: &str) -> NodeId {
        self.alloc(NodeKind::Pattern {
            name: name.to_owned(),
        })
    }

    // Declarations

    pub fn import(&self, name: &str) -> NodeId {
        let name = self.pattern(name);
        self.alloc(NodeKind::Import { name })
    }

    pub fn namespace(&self, name: &str, declarations: impl IntoIterator<Item = NodeId>) -> NodeId {
        let name = self.pattern(name);
        let declarations = self.list(declarations);
        self.alloc(NodeKind::Namespace { name, declarations })
    }

    pub fn variable(
        &self,
        name: &str,
        annotation: Option<NodeId>,
        initializer: Option<NodeId>,
    ) -> NodeId {
        let name = self.pattern(name);
        self.alloc(NodeKind::Variable {
            name,
            annotation,
            initializer,
        })
    }

    pub fn function(
        &self,
        name: &str,
        generics: &[&str],
        parameters: impl IntoIterator<Item = NodeId>,
        return_type: NodeId,
        block: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let name = self.pattern(name);
        let generic_parameters = self.generic_parameters(generics);
        let parameters = self.list(parameters);
        let block = self.list(block);
        self.alloc(NodeKind::Function {
            name,
            generic_parameters,
            parameters,
            return_type,
            block,
        })
    }

    pub fn parameter(&self, name: &str, annotation: NodeId, default_value: Option<NodeId>) -> NodeId {
        let name = self.pattern(name);
        self.alloc(NodeKind::Parameter {
            name,
            annotation,
            default_value,
        })
    }

    pub fn record(
        &self,
        name: &str,
        generics: &[&str],
        declarations: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let name = self.pattern(name);
        let generic_parameters = self.generic_parameters(generics);
        let declarations = self.list(declarations);
        self.alloc(NodeKind::Record {
            name,
            generic_parameters,
            declarations,
        })
    }

    pub fn enumeration(
        &self,
        name: &str,
        generics: &[&str],
        cases: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let name = self.pattern(name);
        let generic_parameters = self.generic_parameters(generics);
        let cases = self.list(cases);
        self.alloc(NodeKind::Enumeration {
            name,
            generic_parameters,
            cases,
        })
    }

    pub fn case(&self, name: &str, associated_values: impl IntoIterator<Item = NodeId>) -> NodeId {
        let name = self.pattern(name);
        let associated_values = self.list(associated_values);
        self.alloc(NodeKind::EnumerationCase {
            name,
            associated_values,
        })
    }

    // Statements

    pub fn branch(&self, condition: NodeId, block: impl IntoIterator<Item = NodeId>) -> NodeId {
        let block = self.list(block);
        self.alloc(NodeKind::Branch { condition, block })
    }

    pub fn while_loop(&self, condition: NodeId, block: impl IntoIterator<Item = NodeId>) -> NodeId {
        let block = self.list(block);
        self.alloc(NodeKind::Loop { condition, block })
    }

    pub fn ret(&self, expression: NodeId) -> NodeId {
        self.alloc(NodeKind::Return { expression })
    }

    pub fn expression_statement(&self, expression: NodeId) -> NodeId {
        self.alloc(NodeKind::ExpressionStatement { expression })
    }

    // Expressions

    pub fn ident(&self, name: &str) -> NodeId {
        self.alloc(NodeKind::Identifier {
            name: name.to_owned(),
        })
    }

    pub fn member(&self, object: NodeId, member: &str) -> NodeId {
        self.alloc(NodeKind::Member {
            object,
            member: member.to_owned(),
        })
    }

    /// `A.B.C` as an identifier followed by a chain of member expressions.
    pub fn path(&self, dotted: &str) -> NodeId {
        let mut segments = dotted.split('.');
        let head = self.ident(segments.next().unwrap_or_default());
        segments.fold(head, |object, member| self.member(object, member))
    }

    pub fn call(&self, callee: NodeId, arguments: impl IntoIterator<Item = NodeId>) -> NodeId {
        let arguments = self.list(arguments);
        self.alloc(NodeKind::Call { callee, arguments })
    }

    pub fn labeled(&self, label: &str, expression: NodeId) -> NodeId {
        self.alloc(NodeKind::Argument {
            label: Some(label.to_owned()),
            expression,
        })
    }

    pub fn positional(&self, expression: NodeId) -> NodeId {
        self.alloc(NodeKind::Argument {
            label: None,
            expression,
        })
    }

    pub fn none(&self) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::None))
    }

    pub fn boolean(&self, value: bool) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::Boolean(value)))
    }

    pub fn number(&self, value: f64) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::Number(value)))
    }

    pub fn string(&self, value: &str) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::String(value.to_owned())))
    }

    pub fn color(&self, value: &str) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::Color(value.to_owned())))
    }

    pub fn array(&self, elements: impl IntoIterator<Item = NodeId>) -> NodeId {
        let elements = self.list(elements);
        self.alloc(NodeKind::Literal(Literal::Array(elements)))
    }

    pub fn placeholder(&self) -> NodeId {
        self.alloc(NodeKind::Placeholder)
    }

    // Type annotations

    pub fn type_named(&self, name: &str) -> NodeId {
        self.type_applied(name, [])
    }

    pub fn type_applied(&self, name: &str, generic_arguments: impl IntoIterator<Item = NodeId>) -> NodeId {
        let generic_arguments = self.list(generic_arguments);
        self.alloc(NodeKind::TypeIdentifier {
            name: name.to_owned(),
            generic_arguments,
        })
    }

    pub fn function_type(
        &self,
        arguments: impl IntoIterator<Item = NodeId>,
        return_type: NodeId,
    ) -> NodeId {
        let arguments = self.list(arguments);
        self.alloc(NodeKind::FunctionType {
            arguments,
            return_type,
        })
    }

    // Queries used while building

    /// The binding pattern of a declaration built by this builder.
    pub fn pattern_of(&self, declaration: NodeId) -> Option<NodeId> {
        self.arena.borrow().get(declaration)?.declared_pattern()
    }
}
