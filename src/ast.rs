// src/ast.rs
use crate::symbols::BuiltinType;
use crate::token::{Token, TokenKind};

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub name: String,
    pub block: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Block {
    pub declarations: Vec<Declaration>, // Na ordem do fonte
    pub compound: Compound,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Declaration {
    Var(VarDecl),
    Procedure(ProcedureDecl),
}

/// Uma por identificador declarado: `inteiro a, b;` vira duas.
#[derive(Debug, PartialEq, Clone)]
pub struct VarDecl {
    pub variable: Variable,
    pub ty: TypeNode,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ProcedureDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub block: Block,
    pub line: usize,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Param {
    pub variable: Variable,
    pub ty: TypeNode,
}

#[derive(Debug, PartialEq, Clone)]
pub struct TypeNode {
    pub token: Token, // INTEIRO ou LÓGICO
}

impl TypeNode {
    /// Nome com que o tipo é procurado na tabela de símbolos.
    pub fn name(&self) -> &str {
        self.token.text()
    }

    pub fn builtin(&self) -> Option<BuiltinType> {
        match self.token.kind {
            TokenKind::IntegerType => Some(BuiltinType::Integer),
            TokenKind::Boolean => Some(BuiltinType::Boolean),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Compound {
    pub children: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Compound(Compound),
    Assign(Assign),
    If(IfNode),
    While(WhileNode),
    ProcedureCall(ProcedureCall),
    NoOperation,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Assign {
    pub target: Variable,
    pub op: Token,
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub struct IfNode {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct WhileNode {
    pub condition: Expression,
    pub body: Box<Statement>,
}

/// Os argumentos são apenas nomes: a gramática não aceita literais nem
/// expressões numa chamada.
#[derive(Debug, PartialEq, Clone)]
pub struct ProcedureCall {
    pub name: String,
    pub args: Vec<String>,
    pub line: usize,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    BinaryOperator {
        left: Box<Expression>,
        op: Token,
        right: Box<Expression>,
    },
    UnaryOperator {
        op: Token,
        operand: Box<Expression>,
    },
    Number(i64),
    Boolean(bool),
    Variable(Variable),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Variable {
    pub name: String,
    pub token: Token,
    pub line: usize,
}
