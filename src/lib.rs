pub mod token;
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod semantic_analyzer;
pub mod diagnostic;

// Reexportar tipos de erro principais para serem acessíveis aos usuários da biblioteca
pub use token::LexicalError;
pub use parser::ParseError;
pub use semantic_analyzer::SemanticError;

use ast::Program;
use lexer::Lexer;
use parser::Parser;
use semantic_analyzer::{AnalyzerOptions, SemanticAnalyzer};

use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CompilationError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("[Analisador Léxico] {0}")]
    Lex(#[from] LexicalError),
    #[error("[Analisador Sintático] {0}")]
    Parse(ParseError),
    #[error("[Analisador Semântico] {0}")]
    Semantic(#[from] SemanticError),
}

// Erros léxicos vindos de dentro do parser saem como erros léxicos.
impl From<ParseError> for CompilationError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lexical(lexical) => CompilationError::Lex(lexical),
            other => CompilationError::Parse(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Io,
    Lexical,
    Syntax,
    Semantic,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Io => f.write_str("E/S"),
            Phase::Lexical => f.write_str("léxico"),
            Phase::Syntax => f.write_str("sintático"),
            Phase::Semantic => f.write_str("semântico"),
        }
    }
}

impl CompilationError {
    pub fn phase(&self) -> Phase {
        match self {
            CompilationError::Io(_) => Phase::Io,
            CompilationError::Lex(_) => Phase::Lexical,
            CompilationError::Parse(_) => Phase::Syntax,
            CompilationError::Semantic(_) => Phase::Semantic,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            CompilationError::Io(_) => None,
            CompilationError::Lex(err) => Some(err.line()),
            CompilationError::Parse(err) => Some(err.line()),
            CompilationError::Semantic(err) => Some(err.line()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Imprime `Linha N - Token<...>` a cada token consumido pelo parser.
    pub trace_tokens: bool,
    pub strict_calls: bool,
}

/// Analisa léxica e sintaticamente, sem a fase semântica.
pub fn parse_source(source: &str) -> Result<Program, CompilationError> {
    let mut parser = Parser::new(Lexer::new(source))?;
    Ok(parser.parse()?)
}

/// Roda o front end inteiro sobre um texto fonte. Devolve a AST se o programa
/// for aceito; o primeiro erro encontrado interrompe tudo.
pub fn check_source(source: &str, options: CompileOptions) -> Result<Program, CompilationError> {
    log::info!("Fase 1: análise léxica e sintática...");
    let mut parser = Parser::new(Lexer::new(source))?;
    if options.trace_tokens {
        parser = parser.with_trace(|line, token| println!("Linha {} - {}", line, token));
    }
    let program = parser.parse()?;

    log::info!("Fase 2: análise semântica do programa {}...", program.name);
    let mut analyzer = SemanticAnalyzer::with_options(AnalyzerOptions { strict_calls: options.strict_calls });
    analyzer.analyze_program(&program)?;

    Ok(program)
}

pub fn check_file(path: impl AsRef<Path>, options: CompileOptions) -> Result<Program, CompilationError> {
    let path = path.as_ref();
    log::info!("Lendo {}", path.display());
    let source = fs::read_to_string(path)?;
    check_source(&source, options)
}
