// src/lexer.rs
use crate::token::{LexFailure, LexicalError, Lexeme, Token, TokenKind};
use logos::Logos;
use std::ops::Range;

/// Analisador léxico. Entrega um token por chamada a [`Lexer::next_token`],
/// contando linhas pelo caminho; depois do fim da entrada devolve EOF para sempre.
pub struct Lexer<'source> {
    source: &'source str,
    scanner: logos::Lexer<'source, TokenKind>,
    line: usize,
    // Até onde as quebras de linha já foram contadas
    counted: usize,
    // Posição logo após o último token entregue
    cursor: usize,
    finished: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Lexer {
            source,
            scanner: TokenKind::lexer(source),
            line: 1,
            counted: 0,
            cursor: 0,
            finished: false,
        }
    }

    /// Linha corrente: a do último token entregue, ou a última linha após o EOF.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Olha o caractere bruto uma posição além do cursor, sem consumir nada.
    ///
    /// Com o cursor parado logo depois de um identificador, isto enxerga o
    /// segundo caractere após ele: `x := 1` e `x:=1` devolvem `:` e `=`.
    pub fn peek(&self) -> Option<char> {
        self.source.get(self.cursor..)?.chars().nth(1)
    }

    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        if self.finished {
            return Ok(Token::eof());
        }

        let Some(result) = self.scanner.next() else {
            self.advance_lines(self.source.len());
            self.cursor = self.source.len();
            self.finished = true;
            return Ok(Token::eof());
        };

        let span = self.scanner.span();
        self.advance_lines(span.start);
        self.cursor = span.end;

        let kind = match result {
            Ok(kind) => kind,
            Err(failure) => {
                self.finished = true;
                return Err(self.failure_to_error(failure, span));
            }
        };
        let slice = self.scanner.slice();
        let lexeme = match kind {
            TokenKind::IntegerLiteral => match slice.parse::<i64>() {
                Ok(value) => Lexeme::Integer(value),
                Err(_) => {
                    self.finished = true;
                    return Err(LexicalError::IntegerOverflow { literal: slice.to_string(), line: self.line });
                }
            },
            TokenKind::BooleanLiteral => Lexeme::Boolean(slice == "verdadeiro"),
            _ => Lexeme::Text(slice.to_string()),
        };
        Ok(Token::new(kind, lexeme))
    }

    fn advance_lines(&mut self, upto: usize) {
        if upto > self.counted {
            self.line += self.source[self.counted..upto].matches('\n').count();
            self.counted = upto;
        }
    }

    fn failure_to_error(&self, failure: LexFailure, span: Range<usize>) -> LexicalError {
        match failure {
            LexFailure::UnexpectedCharacter => LexicalError::UnexpectedCharacter {
                character: self.source[span.start..].chars().next().unwrap_or('\0'),
                line: self.line,
            },
            LexFailure::MalformedNumber => LexicalError::MalformedNumber {
                literal: self.source[span].to_string(),
                line: self.line,
            },
        }
    }
}

/// Lê a entrada inteira, devolvendo cada token com a linha onde começa.
/// O EOF final não entra no vetor.
pub fn lex_source(source: &str) -> Result<Vec<(Token, usize)>, LexicalError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.is(TokenKind::Eof) {
            return Ok(tokens);
        }
        tokens.push((token, lexer.line()));
    }
}
