//! Named GraphQL operations
//!
//! An operation is identified by its server-assigned result name, which is
//! also the key its payload is returned under. Documents are rendered from the
//! operation definition and the selection set of the entity it returns.

use serde::Serialize;

use crate::codec::SEALED_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

/// How an operation's variables travel on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// One opaque `pl` token
    Sealed,
    /// Declared params spread as ordinary variables
    Plain,
}

/// Shape of the value returned under the result key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Entity,
    Connection,
    /// Scalar acknowledgement, no selection set
    Ack,
}

/// A declared GraphQL variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub ty: &'static str,
}

impl Param {
    pub const fn new(name: &'static str, ty: &'static str) -> Self {
        Self { name, ty }
    }
}

const PAGINATION_PARAMS: [Param; 4] = [
    Param::new("first", "Int"),
    Param::new("last", "Int"),
    Param::new("after", "String"),
    Param::new("before", "String"),
];

const PAGE_INFO: &str = "pageInfo { startCursor endCursor hasNextPage hasPreviousPage }";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: &'static str,
    pub transport: Transport,
    pub params: &'static [Param],
    pub shape: Shape,
}

impl Operation {
    pub const fn sealed_query(name: &'static str, shape: Shape) -> Self {
        Self {
            kind: OperationKind::Query,
            name,
            transport: Transport::Sealed,
            params: &[],
            shape,
        }
    }

    pub const fn plain_query(name: &'static str, params: &'static [Param], shape: Shape) -> Self {
        Self {
            kind: OperationKind::Query,
            name,
            transport: Transport::Plain,
            params,
            shape,
        }
    }

    pub const fn sealed_mutation(name: &'static str, shape: Shape) -> Self {
        Self {
            kind: OperationKind::Mutation,
            name,
            transport: Transport::Sealed,
            params: &[],
            shape,
        }
    }

    pub const fn plain_mutation(
        name: &'static str,
        params: &'static [Param],
        shape: Shape,
    ) -> Self {
        Self {
            kind: OperationKind::Mutation,
            name,
            transport: Transport::Plain,
            params,
            shape,
        }
    }

    fn declared_params(&self) -> Vec<Param> {
        let mut params = Vec::new();
        if self.transport == Transport::Sealed {
            params.push(Param::new(SEALED_KEY, "String!"));
        }
        params.extend_from_slice(self.params);
        if self.shape == Shape::Connection {
            params.extend_from_slice(&PAGINATION_PARAMS);
        }
        params
    }

    /// Render the GraphQL document for this operation
    pub fn document(&self, selection: &str) -> String {
        let params = self.declared_params();
        let (declarations, arguments) = if params.is_empty() {
            (String::new(), String::new())
        } else {
            let declarations = params
                .iter()
                .map(|p| format!("${}: {}", p.name, p.ty))
                .collect::<Vec<_>>()
                .join(", ");
            let arguments = params
                .iter()
                .map(|p| format!("{}: ${}", p.name, p.name))
                .collect::<Vec<_>>()
                .join(", ");
            (format!("({})", declarations), format!("({})", arguments))
        };

        let body = match self.shape {
            Shape::Entity => format!(" {{ {} }}", selection),
            Shape::Connection => format!(
                " {{ edges {{ cursor node {{ {} }} }} {} totalCount }}",
                selection, PAGE_INFO
            ),
            Shape::Ack => String::new(),
        };

        format!(
            "{} {}{} {{ {}{}{} }}",
            self.kind.as_str(),
            self.name,
            declarations,
            self.name,
            arguments,
            body
        )
    }
}
