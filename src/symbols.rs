// src/symbols.rs
use std::collections::HashMap;
use std::fmt;

/// Os dois tipos da linguagem, registrados no escopo mais externo.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BuiltinType {
    Integer,
    Boolean,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 2] = [BuiltinType::Integer, BuiltinType::Boolean];

    /// Grafia no código fonte, que é também a chave na tabela.
    pub fn keyword(self) -> &'static str {
        match self {
            BuiltinType::Integer => "inteiro",
            BuiltinType::Boolean => "logico",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinType::Integer => f.write_str("INTEIRO"),
            BuiltinType::Boolean => f.write_str("LÓGICO"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct VariableSymbol {
    pub name: String,
    pub ty: BuiltinType,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ProcedureSymbol {
    pub name: String,
    pub params: Vec<VariableSymbol>, // Na ordem da declaração
}

/// Reservado para uma futura declaração `const`; nada o produz hoje.
#[derive(Debug, PartialEq, Clone)]
pub struct ConstantSymbol {
    pub name: String,
    pub ty: BuiltinType,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Symbol {
    Variable(VariableSymbol),
    Procedure(ProcedureSymbol),
    Constant(ConstantSymbol),
    Type(BuiltinType),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Variable(var) => &var.name,
            Symbol::Procedure(proc) => &proc.name,
            Symbol::Constant(constant) => &constant.name,
            Symbol::Type(ty) => ty.keyword(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Variable(var) => write!(f, "VariableSymbol({}, {})", var.name, var.ty),
            Symbol::Procedure(proc) => {
                let params: Vec<&str> = proc.params.iter().map(|p| p.name.as_str()).collect();
                write!(f, "ProcedureSymbol({}, [{}])", proc.name, params.join(", "))
            }
            Symbol::Constant(constant) => write!(f, "ConstantSymbol({}, {})", constant.name, constant.ty),
            Symbol::Type(ty) => write!(f, "TypeSymbol({})", ty),
        }
    }
}

/// Um ambiente de nomes. O escopo que o envolve é simplesmente a entrada
/// anterior na pilha de [`ScopedSymbolTable`].
#[derive(Debug, Clone)]
pub struct Scope {
    name: String,
    level: usize,
    symbols: HashMap<String, Symbol>,
}

impl Scope {
    fn new(name: &str, level: usize) -> Self {
        Scope { name: name.to_string(), level, symbols: HashMap::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.symbols.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Pilha de escopos aninhados. O primeiro escopo empilhado (nível 1) já nasce
/// com os tipos embutidos.
#[derive(Debug, Default)]
pub struct ScopedSymbolTable {
    scopes: Vec<Scope>,
}

impl ScopedSymbolTable {
    pub fn new() -> Self {
        ScopedSymbolTable { scopes: Vec::new() }
    }

    pub fn push_scope(&mut self, name: &str) -> &Scope {
        let level = self.scopes.last().map_or(1, |enclosing| enclosing.level + 1);
        let mut scope = Scope::new(name, level);
        if self.scopes.is_empty() {
            for ty in BuiltinType::ALL {
                scope.symbols.insert(ty.keyword().to_string(), Symbol::Type(ty));
            }
        }
        log::debug!("entrando no escopo {} (nível {})", name, level);
        self.scopes.push(scope);
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn pop_scope(&mut self) -> Option<Scope> {
        let scope = self.scopes.pop()?;
        log::debug!("saindo do escopo {} (nível {}, {} símbolos)", scope.name, scope.level, scope.len());
        Some(scope)
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    pub fn enclosing(&self) -> Option<&Scope> {
        let len = self.scopes.len();
        if len < 2 {
            return None;
        }
        self.scopes.get(len - 2)
    }

    pub fn enclosing_mut(&mut self) -> Option<&mut Scope> {
        let len = self.scopes.len();
        if len < 2 {
            return None;
        }
        self.scopes.get_mut(len - 2)
    }

    /// Insere no escopo corrente sem verificar duplicatas: quem chama é que
    /// consulta `lookup(name, true)` antes.
    pub fn define(&mut self, symbol: Symbol) {
        let scope = self.scopes.last_mut().expect("Scope stack is empty");
        log::debug!("definindo {} no escopo {}", symbol, scope.name);
        scope.symbols.insert(symbol.name().to_string(), symbol);
    }

    /// Com `current_scope_only` procura só no escopo corrente; caso contrário
    /// sobe pela cadeia de escopos até achar ou esgotar.
    pub fn lookup(&self, name: &str, current_scope_only: bool) -> Option<&Symbol> {
        if current_scope_only {
            return self.scopes.last()?.get(name);
        }
        self.resolve(name).map(|(symbol, _)| symbol)
    }

    /// Como `lookup` pela cadeia, mas diz também em que escopo o nome foi achado.
    pub fn resolve(&self, name: &str) -> Option<(&Symbol, &Scope)> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).map(|symbol| (symbol, scope)))
    }
}
