// tests/common.rs
use minipascal::ast::{Program, Statement};
use minipascal::lexer::Lexer;
use minipascal::parser::{ParseError, Parser};
use minipascal::semantic_analyzer::{AnalyzerOptions, SemanticAnalyzer, SemanticError};

#[allow(dead_code)]
pub fn parse_test_source(source: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new(Lexer::new(source))?;
    parser.parse()
}

/// Monta `program teste; <declaracoes> inicio <corpo> fim.`
#[allow(dead_code)]
pub fn program_with(declarations: &str, body: &str) -> String {
    format!("program teste;\n{}\ninicio\n{}\nfim.", declarations, body)
}

/// Faz o parse (que precisa passar) e roda a análise semântica, devolvendo o
/// analisador para inspeção dos escopos e resoluções.
#[allow(dead_code)]
pub fn analyze_with(source: &str, options: AnalyzerOptions) -> (SemanticAnalyzer, Result<(), SemanticError>) {
    let program = parse_test_source(source)
        .unwrap_or_else(|e| panic!("Parsing failed for semantic test: {:?}, source: {}", e, source));
    let mut analyzer = SemanticAnalyzer::with_options(options);
    let result = analyzer.analyze_program(&program);
    (analyzer, result)
}

#[allow(dead_code)]
pub fn analyze_source(source: &str) -> Result<(), SemanticError> {
    analyze_with(source, AnalyzerOptions::default()).1
}

#[allow(dead_code)]
pub fn body_statements(program: &Program) -> &[Statement] {
    &program.block.compound.children
}
