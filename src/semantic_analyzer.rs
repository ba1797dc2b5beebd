// src/semantic_analyzer.rs
use crate::ast::*;
use crate::symbols::{BuiltinType, ProcedureSymbol, ScopedSymbolTable, Symbol, VariableSymbol};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SemanticError {
    #[error("Declaração duplicada de procedimento \"{name}\" na linha {line}")]
    DuplicateProcedure { name: String, line: usize },
    #[error("Declaração duplicada da variável \"{name}\" na linha {line}")]
    DuplicateVariable { name: String, line: usize },
    #[error("Variável \"{name}\" não existe nas declarações (linha {line})")]
    UndeclaredVariable { name: String, line: usize },
    #[error("Procedimento \"{name}\" não existe nas declarações (linha {line})")]
    UndeclaredProcedure { name: String, line: usize },
    #[error("Tipo \"{name}\" não existe nas declarações (linha {line})")]
    UndeclaredType { name: String, line: usize },
    #[error("\"{name}\" não é um procedimento (linha {line})")]
    NotAProcedure { name: String, line: usize },
    #[error("Procedimento \"{name}\" espera {expected} argumento(s) mas recebeu {found} (linha {line})")]
    ArgumentCountMismatch { name: String, expected: usize, found: usize, line: usize },
    #[error("Argumento \"{argument}\" de \"{procedure}\" deveria ser {expected} mas é {found} (linha {line})")]
    ArgumentTypeMismatch {
        procedure: String,
        argument: String,
        expected: BuiltinType,
        found: BuiltinType,
        line: usize,
    },
    #[error("Argumento \"{argument}\" de \"{procedure}\" não é uma variável (linha {line})")]
    ArgumentNotAVariable { procedure: String, argument: String, line: usize },
}

impl SemanticError {
    pub fn line(&self) -> usize {
        match self {
            SemanticError::DuplicateProcedure { line, .. }
            | SemanticError::DuplicateVariable { line, .. }
            | SemanticError::UndeclaredVariable { line, .. }
            | SemanticError::UndeclaredProcedure { line, .. }
            | SemanticError::UndeclaredType { line, .. }
            | SemanticError::NotAProcedure { line, .. }
            | SemanticError::ArgumentCountMismatch { line, .. }
            | SemanticError::ArgumentTypeMismatch { line, .. }
            | SemanticError::ArgumentNotAVariable { line, .. } => *line,
        }
    }
}

pub type SemanticResult<T> = Result<T, SemanticError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Confere aridade e tipos dos argumentos contra os parâmetros registrados
    /// no `ProcedureSymbol`. Desligado, só o nome do procedimento é verificado.
    pub strict_calls: bool,
}

/// Um escopo aberto durante a análise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRecord {
    pub name: String,
    pub level: usize,
    pub enclosing: Option<String>,
}

/// Onde uma referência foi resolvida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    pub line: usize,
    pub scope: String,
    pub level: usize,
}

pub struct SemanticAnalyzer {
    symbols: ScopedSymbolTable,
    options: AnalyzerOptions,
    scope_records: Vec<ScopeRecord>,
    resolutions: Vec<Resolution>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::with_options(AnalyzerOptions::default())
    }

    pub fn with_options(options: AnalyzerOptions) -> Self {
        SemanticAnalyzer {
            symbols: ScopedSymbolTable::new(),
            options,
            scope_records: Vec::new(),
            resolutions: Vec::new(),
        }
    }

    /// Escopos abertos na última análise, na ordem em que foram criados.
    pub fn scope_records(&self) -> &[ScopeRecord] {
        &self.scope_records
    }

    /// Referências resolvidas na última análise, na ordem de visita.
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn analyze_program(&mut self, program: &Program) -> SemanticResult<()> {
        self.symbols = ScopedSymbolTable::new();
        self.scope_records.clear();
        self.resolutions.clear();

        self.enter_scope("global");
        self.analyze_block(&program.block)?;
        self.leave_scope();
        Ok(())
    }

    fn enter_scope(&mut self, name: &str) {
        let enclosing = self.symbols.current().map(|scope| scope.name().to_string());
        let level = self.symbols.push_scope(name).level();
        self.scope_records.push(ScopeRecord { name: name.to_string(), level, enclosing });
    }

    fn leave_scope(&mut self) {
        self.symbols.pop_scope();
    }

    fn analyze_block(&mut self, block: &Block) -> SemanticResult<()> {
        for declaration in &block.declarations {
            match declaration {
                Declaration::Var(var_decl) => self.analyze_var_decl(var_decl)?,
                Declaration::Procedure(proc_decl) => self.analyze_procedure_decl(proc_decl)?,
            }
        }
        self.analyze_compound(&block.compound)
    }

    fn analyze_var_decl(&mut self, decl: &VarDecl) -> SemanticResult<()> {
        let var = &decl.variable;
        let ty = self.resolve_type(&decl.ty, var.line)?;

        if self.symbols.lookup(&var.name, true).is_some() {
            return Err(SemanticError::DuplicateVariable { name: var.name.clone(), line: var.line });
        }

        self.symbols.define(Symbol::Variable(VariableSymbol { name: var.name.clone(), ty }));
        Ok(())
    }

    fn analyze_procedure_decl(&mut self, decl: &ProcedureDecl) -> SemanticResult<()> {
        if self.symbols.lookup(&decl.name, true).is_some() {
            return Err(SemanticError::DuplicateProcedure { name: decl.name.clone(), line: decl.line });
        }
        // Definido antes do corpo, então o procedimento pode chamar a si mesmo
        self.symbols.define(Symbol::Procedure(ProcedureSymbol { name: decl.name.clone(), params: Vec::new() }));

        self.enter_scope(&decl.name);

        let mut params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let var = &param.variable;
            let ty = self.resolve_type(&param.ty, var.line)?;
            if self.symbols.lookup(&var.name, true).is_some() {
                return Err(SemanticError::DuplicateVariable { name: var.name.clone(), line: var.line });
            }
            let symbol = VariableSymbol { name: var.name.clone(), ty };
            self.symbols.define(Symbol::Variable(symbol.clone()));
            params.push(symbol);
        }

        if let Some(Symbol::Procedure(procedure)) =
            self.symbols.enclosing_mut().and_then(|scope| scope.get_mut(&decl.name))
        {
            procedure.params = params;
        }

        self.analyze_block(&decl.block)?;
        self.leave_scope();
        Ok(())
    }

    // Os nomes de tipo são globais: a busca sobe pela cadeia até o escopo externo.
    fn resolve_type(&self, ty: &TypeNode, line: usize) -> SemanticResult<BuiltinType> {
        match self.symbols.lookup(ty.name(), false) {
            Some(Symbol::Type(builtin)) => Ok(*builtin),
            _ => Err(SemanticError::UndeclaredType { name: ty.name().to_string(), line }),
        }
    }

    fn analyze_compound(&mut self, compound: &Compound) -> SemanticResult<()> {
        for statement in &compound.children {
            self.analyze_statement(statement)?;
        }
        Ok(())
    }

    fn analyze_statement(&mut self, statement: &Statement) -> SemanticResult<()> {
        match statement {
            Statement::Compound(compound) => self.analyze_compound(compound),
            Statement::Assign(assign) => {
                self.analyze_variable(&assign.target)?;
                self.analyze_expression(&assign.value)
            }
            // Condicionais e laços não abrem escopo novo
            Statement::If(if_node) => {
                self.analyze_expression(&if_node.condition)?;
                self.analyze_statement(&if_node.then_branch)?;
                if let Some(else_branch) = &if_node.else_branch {
                    self.analyze_statement(else_branch)?;
                }
                Ok(())
            }
            Statement::While(while_node) => {
                self.analyze_expression(&while_node.condition)?;
                self.analyze_statement(&while_node.body)
            }
            Statement::ProcedureCall(call) => self.analyze_procedure_call(call),
            Statement::NoOperation => Ok(()),
        }
    }

    // Sem checagem de tipos entre operadores e operandos: `1 e verdadeiro` passa.
    fn analyze_expression(&mut self, expression: &Expression) -> SemanticResult<()> {
        match expression {
            Expression::BinaryOperator { left, right, .. } => {
                self.analyze_expression(left)?;
                self.analyze_expression(right)
            }
            Expression::UnaryOperator { operand, .. } => self.analyze_expression(operand),
            Expression::Number(_) | Expression::Boolean(_) => Ok(()),
            Expression::Variable(var) => self.analyze_variable(var),
        }
    }

    fn analyze_variable(&mut self, var: &Variable) -> SemanticResult<()> {
        let resolution = match self.symbols.resolve(&var.name) {
            Some((_, scope)) => Resolution {
                name: var.name.clone(),
                line: var.line,
                scope: scope.name().to_string(),
                level: scope.level(),
            },
            None => return Err(SemanticError::UndeclaredVariable { name: var.name.clone(), line: var.line }),
        };
        self.resolutions.push(resolution);
        Ok(())
    }

    fn analyze_procedure_call(&mut self, call: &ProcedureCall) -> SemanticResult<()> {
        let (symbol, scope) = self
            .symbols
            .resolve(&call.name)
            .ok_or_else(|| SemanticError::UndeclaredProcedure { name: call.name.clone(), line: call.line })?;

        let resolution = Resolution {
            name: call.name.clone(),
            line: call.line,
            scope: scope.name().to_string(),
            level: scope.level(),
        };
        let signature = match (self.options.strict_calls, symbol) {
            (false, _) => None,
            (true, Symbol::Procedure(procedure)) => Some(procedure.params.clone()),
            (true, _) => return Err(SemanticError::NotAProcedure { name: call.name.clone(), line: call.line }),
        };
        self.resolutions.push(resolution);

        match signature {
            Some(params) => self.check_arguments(call, &params),
            None => Ok(()),
        }
    }

    fn check_arguments(&self, call: &ProcedureCall, params: &[VariableSymbol]) -> SemanticResult<()> {
        if call.args.len() != params.len() {
            return Err(SemanticError::ArgumentCountMismatch {
                name: call.name.clone(),
                expected: params.len(),
                found: call.args.len(),
                line: call.line,
            });
        }

        for (argument, param) in call.args.iter().zip(params) {
            match self.symbols.lookup(argument, false) {
                Some(Symbol::Variable(var)) if var.ty == param.ty => {}
                Some(Symbol::Variable(var)) => {
                    return Err(SemanticError::ArgumentTypeMismatch {
                        procedure: call.name.clone(),
                        argument: argument.clone(),
                        expected: param.ty,
                        found: var.ty,
                        line: call.line,
                    })
                }
                Some(_) => {
                    return Err(SemanticError::ArgumentNotAVariable {
                        procedure: call.name.clone(),
                        argument: argument.clone(),
                        line: call.line,
                    })
                }
                None => {
                    return Err(SemanticError::UndeclaredVariable { name: argument.clone(), line: call.line })
                }
            }
        }
        Ok(())
    }
}
