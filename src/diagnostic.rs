// src/diagnostic.rs
use crate::CompilationError;

/// Formata o erro fatal para o terminal, mostrando a linha do fonte onde ele
/// ocorreu quando ela é conhecida.
pub fn render(error: &CompilationError, source: &str) -> String {
    match error.line() {
        Some(line) => {
            let line_text = source.lines().nth(line.saturating_sub(1)).unwrap_or("");
            format!("erro:{}: {}\n  {} | {}", line, error, line, line_text.trim_end())
        }
        None => format!("erro: {}", error),
    }
}
