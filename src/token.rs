// src/token.rs
use logos::Logos;
use std::fmt;

/// Falha bruta reportada pelo scanner do logos. Não carrega posição: o
/// [`Lexer`](crate::lexer::Lexer) é quem converte em [`LexicalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexFailure {
    #[default]
    UnexpectedCharacter,
    /// Uma sequência de dígitos seguida imediatamente de `.`
    MalformedNumber,
}

/// Categorias léxicas da linguagem. As palavras reservadas são as entradas
/// `#[token]` abaixo; `leia` e `escreva` não estão aqui de propósito e saem
/// como identificadores comuns. O BOM (U+FEFF) conta como espaço.
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[logos(error = LexFailure)]
#[logos(skip r"[\s\x{FEFF}]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"\{[^}]*\}?")]
pub enum TokenKind {
    // Palavras reservadas
    #[token("program")] Program,
    #[token("var")] Var,
    #[token("div")] IntegerDiv,
    #[token("inteiro")] IntegerType,
    #[token("logico")] Boolean,
    #[token("e")] And,
    #[token("ou")] Or,
    #[token("nao")] Not,
    #[token("se")] If,
    #[token("entao")] Then,
    #[token("senao")] Else,
    #[token("enquanto")] While,
    #[token("faca")] Do,
    #[token("inicio")] Begin,
    #[token("fim")] End,
    #[token("procedimento")] Procedure,
    #[token("verdadeiro")]
    #[token("falso")]
    BooleanLiteral,

    #[regex("[a-zA-Z][a-zA-Z0-9]*")]
    Identifier,

    #[regex("[0-9]+", reject_trailing_dot)]
    IntegerLiteral,

    // Operadores e pontuação
    #[token(":=")] Assign,
    #[token("<=")] Lte,
    #[token(">=")] Gte,
    #[token("<>")] Diff,
    #[token("=")] Eq,
    #[token("<")] Lt,
    #[token(">")] Gt,
    #[token(":")] Colon,
    #[token(",")] Comma,
    #[token(";")] Semicolon,
    #[token(".")] Dot,
    #[token("+")] Plus,
    #[token("-")] Minus,
    #[token("*")] Asterisk,
    #[token("/")] Slash,
    #[token("(")] LeftParenthesis,
    #[token(")")] RightParenthesis,

    // Nunca produzido pelo scanner, apenas pelo Lexer no fim da entrada
    Eof,
}

// Não existe literal de ponto flutuante: `1.5` e `1.` são sempre rejeitados.
fn reject_trailing_dot(lex: &mut logos::Lexer<'_, TokenKind>) -> Result<(), LexFailure> {
    if lex.remainder().starts_with('.') {
        return Err(LexFailure::MalformedNumber);
    }
    Ok(())
}

impl TokenKind {
    /// Nome da categoria como aparece nas mensagens de diagnóstico.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Plus => "MAIS",
            TokenKind::Minus => "MENOS",
            TokenKind::Asterisk => "MULTIPLICAÇÃO",
            TokenKind::Slash => "BARRA",
            TokenKind::Gt => "MAIOR",
            TokenKind::Lt => "MENOR",
            TokenKind::Eq => "IGUAL",
            TokenKind::Diff => "DIFERENTE",
            TokenKind::Gte => "MAIOR_OU_IGUAL",
            TokenKind::Lte => "MENOR_OU_IGUAL",
            TokenKind::Comma => "VIRGULA",
            TokenKind::Dot => "PONTO",
            TokenKind::Colon => "DOIS_PONTOS",
            TokenKind::Semicolon => "PONTO_E_VIRGULA",
            TokenKind::LeftParenthesis => "ABRIR_PARENTESIS",
            TokenKind::RightParenthesis => "FECHAR_PARENTESIS",
            TokenKind::Assign => "ATRIBUIÇÃO",
            TokenKind::Eof => "EOF",
            TokenKind::Begin => "INICIO",
            TokenKind::End => "FIM",
            TokenKind::Identifier => "IDENTIFICADOR",
            TokenKind::Program => "PROGRAM",
            TokenKind::Var => "VAR",
            TokenKind::IntegerType => "INTEIRO",
            TokenKind::Boolean => "LÓGICO",
            TokenKind::IntegerLiteral => "INTEIRO_LITERAL",
            TokenKind::IntegerDiv => "DIVISAO_INTEIRA",
            TokenKind::If => "SE",
            TokenKind::Then => "ENTÃO",
            TokenKind::Else => "SENÃO",
            TokenKind::While => "ENQUANTO",
            TokenKind::Do => "FAÇA",
            TokenKind::And => "E",
            TokenKind::Or => "OU",
            TokenKind::Not => "NÃO",
            TokenKind::Procedure => "PROCEDIMENTO",
            TokenKind::BooleanLiteral => "LÓGICO_LITERAL",
        }
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::Eq | TokenKind::Diff | TokenKind::Gt | TokenKind::Gte | TokenKind::Lt | TokenKind::Lte
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Valor carregado pelo token: o texto reconhecido ou o valor já convertido.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Lexeme {
    Integer(i64),
    Boolean(bool),
    Text(String),
    None,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lexeme::Integer(value) => write!(f, "{}", value),
            Lexeme::Boolean(true) => f.write_str("verdadeiro"),
            Lexeme::Boolean(false) => f.write_str("falso"),
            Lexeme::Text(text) => f.write_str(text),
            Lexeme::None => f.write_str("null"),
        }
    }
}

/// Um token é só o par (categoria, lexema); a linha fica com o Lexer.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Lexeme,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: Lexeme) -> Self {
        Token { kind, lexeme }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, Lexeme::None)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Texto do identificador ou da palavra reservada. Vazio para literais.
    pub fn text(&self) -> &str {
        match &self.lexeme {
            Lexeme::Text(text) => text,
            _ => "",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token<{}, {}>", self.kind, self.lexeme)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexicalError {
    #[error("Caractere inesperado: \"{character}\" na linha {line}")]
    UnexpectedCharacter { character: char, line: usize },
    #[error("Caractere inesperado: \".\" após o número {literal} na linha {line}")]
    MalformedNumber { literal: String, line: usize },
    #[error("Literal inteiro fora do intervalo: {literal} na linha {line}")]
    IntegerOverflow { literal: String, line: usize },
}

impl LexicalError {
    pub fn line(&self) -> usize {
        match self {
            LexicalError::UnexpectedCharacter { line, .. }
            | LexicalError::MalformedNumber { line, .. }
            | LexicalError::IntegerOverflow { line, .. } => *line,
        }
    }
}
