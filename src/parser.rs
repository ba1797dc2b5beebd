// src/parser.rs
use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{LexicalError, Lexeme, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    // O parser puxa os tokens sob demanda, então erros léxicos chegam por aqui
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error("Era esperado um token do tipo \"{expected}\" mas o encontrado foi {found} na linha {line}")]
    UnexpectedToken { expected: TokenKind, found: Token, line: usize },
    #[error("Era esperado um tipo (inteiro ou logico) mas o encontrado foi {found} na linha {line}")]
    ExpectedType { found: Token, line: usize },
    #[error("Identificador inesperado na produção \"Lista de comandos\": {found} na linha {line}")]
    UnexpectedIdentifier { found: Token, line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lexical(err) => err.line(),
            ParseError::UnexpectedToken { line, .. }
            | ParseError::ExpectedType { line, .. }
            | ParseError::UnexpectedIdentifier { line, .. } => *line,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Recebe (linha, token) a cada token consumido com sucesso.
pub type TraceHook<'a> = Box<dyn FnMut(usize, &Token) + 'a>;

/// Parser descendente recursivo com um token de lookahead. É dono do Lexer.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    current: Token,
    line: usize, // Linha do token corrente
    trace: Option<TraceHook<'source>>,
}

impl<'source> Parser<'source> {
    pub fn new(mut lexer: Lexer<'source>) -> ParseResult<Self> {
        let current = lexer.next_token()?;
        let line = lexer.line();
        Ok(Parser { lexer, current, line, trace: None })
    }

    /// Instala um gancho chamado com `(linha, token)` a cada `eat` bem-sucedido.
    pub fn with_trace(mut self, hook: impl FnMut(usize, &Token) + 'source) -> Self {
        self.trace = Some(Box::new(hook));
        self
    }

    pub fn parse(&mut self) -> ParseResult<Program> {
        self.program()
    }

    fn eat(&mut self, expected: TokenKind) -> ParseResult<Token> {
        if !self.current.is(expected) {
            return Err(ParseError::UnexpectedToken {
                expected,
                found: self.current.clone(),
                line: self.line,
            });
        }
        log::trace!("Linha {} - {}", self.line, self.current);
        if let Some(hook) = self.trace.as_mut() {
            hook(self.line, &self.current);
        }
        let next = self.lexer.next_token()?;
        self.line = self.lexer.line();
        Ok(std::mem::replace(&mut self.current, next))
    }

    // Consome o token corrente, seja ele qual for
    fn advance(&mut self) -> ParseResult<Token> {
        let kind = self.current.kind;
        self.eat(kind)
    }

    // program: program <identificador> ; <bloco> .
    fn program(&mut self) -> ParseResult<Program> {
        self.eat(TokenKind::Program)?;
        let name = self.variable()?.name;
        self.eat(TokenKind::Semicolon)?;
        let block = self.block()?;
        // O que vier depois do ponto final não é analisado
        self.eat(TokenKind::Dot)?;
        Ok(Program { name, block })
    }

    fn block(&mut self) -> ParseResult<Block> {
        let declarations = self.declarations()?;
        let compound = self.compound_statement()?;
        Ok(Block { declarations, compound })
    }

    // Primeiro as variáveis, depois os procedimentos.
    fn declarations(&mut self) -> ParseResult<Vec<Declaration>> {
        let mut declarations = Vec::new();

        loop {
            if self.current.is(TokenKind::Var) {
                self.eat(TokenKind::Var)?;
            } else if !self.at_type_spec() {
                break;
            }
            declarations.extend(self.variable_declaration()?.into_iter().map(Declaration::Var));
            self.eat(TokenKind::Semicolon)?;
        }

        while self.current.is(TokenKind::Procedure) {
            declarations.push(Declaration::Procedure(self.procedure_declaration()?));
        }

        Ok(declarations)
    }

    fn at_type_spec(&self) -> bool {
        matches!(self.current.kind, TokenKind::IntegerType | TokenKind::Boolean)
    }

    // <tipo> <identificador> [:= <expressao>] {, <identificador> [:= <expressao>]}
    fn variable_declaration(&mut self) -> ParseResult<Vec<VarDecl>> {
        let ty = self.type_spec()?;
        let mut decls = Vec::new();

        loop {
            let variable = self.variable()?;
            if self.current.is(TokenKind::Assign) {
                self.eat(TokenKind::Assign)?;
                // O inicializador é aceito pela gramática mas não entra na árvore
                self.expr()?;
            }
            decls.push(VarDecl { variable, ty: ty.clone() });

            if !self.current.is(TokenKind::Comma) {
                break;
            }
            self.eat(TokenKind::Comma)?;
        }

        Ok(decls)
    }

    fn type_spec(&mut self) -> ParseResult<TypeNode> {
        if !self.at_type_spec() {
            return Err(ParseError::ExpectedType { found: self.current.clone(), line: self.line });
        }
        Ok(TypeNode { token: self.advance()? })
    }

    // procedimento <identificador> [( <parametros formais> )] ; <bloco> ;
    fn procedure_declaration(&mut self) -> ParseResult<ProcedureDecl> {
        let line = self.line;
        self.eat(TokenKind::Procedure)?;
        let name = self.eat(TokenKind::Identifier)?.text().to_string();

        let mut params = Vec::new();
        if self.current.is(TokenKind::LeftParenthesis) {
            self.eat(TokenKind::LeftParenthesis)?;
            params = self.formal_parameter_list()?;
            self.eat(TokenKind::RightParenthesis)?;
        }

        self.eat(TokenKind::Semicolon)?;
        let block = self.block()?;
        self.eat(TokenKind::Semicolon)?;

        Ok(ProcedureDecl { name, params, block, line })
    }

    fn formal_parameter_list(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = self.formal_parameters()?;
        while self.current.is(TokenKind::Semicolon) {
            self.eat(TokenKind::Semicolon)?;
            params.extend(self.formal_parameters()?);
        }
        Ok(params)
    }

    // [var] <identificador> {, <identificador>} : <tipo>
    fn formal_parameters(&mut self) -> ParseResult<Vec<Param>> {
        if self.current.is(TokenKind::Var) {
            self.eat(TokenKind::Var)?;
        }

        let mut variables = vec![self.variable()?];
        while self.current.is(TokenKind::Comma) {
            self.eat(TokenKind::Comma)?;
            variables.push(self.variable()?);
        }

        self.eat(TokenKind::Colon)?;
        let ty = self.type_spec()?;

        Ok(variables
            .into_iter()
            .map(|variable| Param { variable, ty: ty.clone() })
            .collect())
    }

    fn compound_statement(&mut self) -> ParseResult<Compound> {
        self.eat(TokenKind::Begin)?;
        let children = self.statement_list()?;
        self.eat(TokenKind::End)?;
        Ok(Compound { children })
    }

    fn statement_list(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = vec![self.statement()?];

        while self.current.is(TokenKind::Semicolon) {
            self.eat(TokenKind::Semicolon)?;
            statements.push(self.statement()?);
        }

        if self.current.is(TokenKind::Identifier) {
            return Err(ParseError::UnexpectedIdentifier { found: self.current.clone(), line: self.line });
        }

        Ok(statements)
    }

    fn statement(&mut self) -> ParseResult<Statement> {
        match self.current.kind {
            TokenKind::Begin => Ok(Statement::Compound(self.compound_statement()?)),
            // `x := ...` e `p(...)` começam ambos por um identificador. A decisão
            // olha um caractere bruto à frente no Lexer, não o próximo token.
            TokenKind::Identifier => {
                if matches!(self.lexer.peek(), Some(':') | Some('=')) {
                    Ok(Statement::Assign(self.assignment_statement()?))
                } else {
                    Ok(Statement::ProcedureCall(self.procedure_call()?))
                }
            }
            TokenKind::If => Ok(Statement::If(self.conditional_statement()?)),
            TokenKind::While => Ok(Statement::While(self.repeat_statement()?)),
            _ => Ok(Statement::NoOperation),
        }
    }

    // <variavel> := (<logico literal> | <expressao>)
    fn assignment_statement(&mut self) -> ParseResult<Assign> {
        let target = self.variable()?;
        let op = self.eat(TokenKind::Assign)?;

        let value = if self.current.is(TokenKind::BooleanLiteral) {
            let token = self.eat(TokenKind::BooleanLiteral)?;
            Expression::Boolean(token.lexeme == Lexeme::Boolean(true))
        } else {
            self.expr()?
        };

        Ok(Assign { target, op, value })
    }

    // <identificador> [( [<identificador> {, <identificador>}] )]
    fn procedure_call(&mut self) -> ParseResult<ProcedureCall> {
        let line = self.line;
        let name = self.eat(TokenKind::Identifier)?.text().to_string();

        let mut args = Vec::new();
        if self.current.is(TokenKind::LeftParenthesis) {
            self.eat(TokenKind::LeftParenthesis)?;
            if self.current.is(TokenKind::Identifier) {
                args.push(self.eat(TokenKind::Identifier)?.text().to_string());
                while self.current.is(TokenKind::Comma) {
                    self.eat(TokenKind::Comma)?;
                    args.push(self.eat(TokenKind::Identifier)?.text().to_string());
                }
            }
            self.eat(TokenKind::RightParenthesis)?;
        }

        Ok(ProcedureCall { name, args, line })
    }

    // se <expressao> entao <comando> [senao <comando>]
    fn conditional_statement(&mut self) -> ParseResult<IfNode> {
        self.eat(TokenKind::If)?;
        let condition = self.expr()?;
        self.eat(TokenKind::Then)?;
        let then_branch = Box::new(self.statement()?);

        let else_branch = if self.current.is(TokenKind::Else) {
            self.eat(TokenKind::Else)?;
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(IfNode { condition, then_branch, else_branch })
    }

    // enquanto <expressao> faca <comando>
    fn repeat_statement(&mut self) -> ParseResult<WhileNode> {
        self.eat(TokenKind::While)?;
        let condition = self.expr()?;
        self.eat(TokenKind::Do)?;
        let body = Box::new(self.statement()?);
        Ok(WhileNode { condition, body })
    }

    // <expressao simples> [<relacao> <expressao simples>], sem encadeamento
    fn expr(&mut self) -> ParseResult<Expression> {
        let left = self.simple_expr()?;

        if self.current.kind.is_relational() {
            let op = self.advance()?;
            let right = self.simple_expr()?;
            return Ok(Expression::BinaryOperator { left: Box::new(left), op, right: Box::new(right) });
        }

        Ok(left)
    }

    // [+ | -] <termo> {(+ | - | ou) <termo>}
    fn simple_expr(&mut self) -> ParseResult<Expression> {
        let sign = if matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            Some(self.advance()?)
        } else {
            None
        };

        let mut node = self.term()?;
        if let Some(op) = sign {
            node = Expression::UnaryOperator { op, operand: Box::new(node) };
        }

        while matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus | TokenKind::Or) {
            let op = self.advance()?;
            let right = self.term()?;
            node = Expression::BinaryOperator { left: Box::new(node), op, right: Box::new(right) };
        }

        Ok(node)
    }

    // <fator> {(* | div | e) <fator>}
    fn term(&mut self) -> ParseResult<Expression> {
        let mut node = self.factor()?;

        while matches!(self.current.kind, TokenKind::Asterisk | TokenKind::IntegerDiv | TokenKind::And) {
            let op = self.advance()?;
            let right = self.factor()?;
            node = Expression::BinaryOperator { left: Box::new(node), op, right: Box::new(right) };
        }

        Ok(node)
    }

    // <numero> | ( <expressao> ) | nao <fator> | <variavel>
    fn factor(&mut self) -> ParseResult<Expression> {
        // Só INTEIRO_LITERAL carrega um lexema inteiro
        if let Lexeme::Integer(value) = self.current.lexeme {
            self.eat(TokenKind::IntegerLiteral)?;
            return Ok(Expression::Number(value));
        }

        match self.current.kind {
            TokenKind::LeftParenthesis => {
                self.eat(TokenKind::LeftParenthesis)?;
                let node = self.expr()?;
                self.eat(TokenKind::RightParenthesis)?;
                Ok(node)
            }
            TokenKind::Not => {
                let op = self.eat(TokenKind::Not)?;
                let operand = self.factor()?;
                Ok(Expression::UnaryOperator { op, operand: Box::new(operand) })
            }
            _ => Ok(Expression::Variable(self.variable()?)),
        }
    }

    fn variable(&mut self) -> ParseResult<Variable> {
        let line = self.line;
        let token = self.eat(TokenKind::Identifier)?;
        Ok(Variable { name: token.text().to_string(), token, line })
    }
}
