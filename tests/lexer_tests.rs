use minipascal::lexer::{lex_source, Lexer};
use minipascal::token::{LexicalError, Lexeme, Token, TokenKind};

// Função helper para facilitar a escrita dos testes de lexing
fn kinds(source: &str) -> Vec<TokenKind> {
    lex_source(source)
        .unwrap_or_else(|e| panic!("Lexing failed for {:?}: {}", source, e))
        .into_iter()
        .map(|(token, _)| token.kind)
        .collect()
}

#[test]
fn test_reserved_words() {
    let source = "program var div inteiro logico e ou nao se entao senao enquanto faca inicio fim procedimento verdadeiro falso";
    assert_eq!(kinds(source), vec![
        TokenKind::Program, TokenKind::Var, TokenKind::IntegerDiv, TokenKind::IntegerType,
        TokenKind::Boolean, TokenKind::And, TokenKind::Or, TokenKind::Not, TokenKind::If,
        TokenKind::Then, TokenKind::Else, TokenKind::While, TokenKind::Do, TokenKind::Begin,
        TokenKind::End, TokenKind::Procedure, TokenKind::BooleanLiteral, TokenKind::BooleanLiteral,
    ]);
}

#[test]
fn test_leia_and_escreva_are_plain_identifiers() {
    let tokens = lex_source("leia escreva").unwrap();
    assert_eq!(tokens[0].0, Token::new(TokenKind::Identifier, Lexeme::Text("leia".into())));
    assert_eq!(tokens[1].0, Token::new(TokenKind::Identifier, Lexeme::Text("escreva".into())));
}

#[test]
fn test_reserved_words_are_case_sensitive() {
    assert_eq!(kinds("Inicio FIM Program"), vec![TokenKind::Identifier; 3]);
}

#[test]
fn test_identifiers_extend_past_reserved_prefixes() {
    let tokens = lex_source("fimx se1 programa a1b2").unwrap();
    let texts: Vec<&str> = tokens.iter().map(|(t, _)| t.text()).collect();
    assert!(tokens.iter().all(|(t, _)| t.is(TokenKind::Identifier)));
    assert_eq!(texts, vec!["fimx", "se1", "programa", "a1b2"]);
}

#[test]
fn test_operators_and_punctuation() {
    let source = ":= <= >= <> = < > : , ; . + - * / ( )";
    assert_eq!(kinds(source), vec![
        TokenKind::Assign, TokenKind::Lte, TokenKind::Gte, TokenKind::Diff, TokenKind::Eq,
        TokenKind::Lt, TokenKind::Gt, TokenKind::Colon, TokenKind::Comma, TokenKind::Semicolon,
        TokenKind::Dot, TokenKind::Plus, TokenKind::Minus, TokenKind::Asterisk, TokenKind::Slash,
        TokenKind::LeftParenthesis, TokenKind::RightParenthesis,
    ]);
}

#[test]
fn test_two_character_operators_without_spaces() {
    assert_eq!(kinds("x:=a<>b"), vec![
        TokenKind::Identifier, TokenKind::Assign, TokenKind::Identifier, TokenKind::Diff, TokenKind::Identifier,
    ]);
}

#[test]
fn test_literal_values() {
    let tokens = lex_source("123 0 verdadeiro falso").unwrap();
    let lexemes: Vec<Lexeme> = tokens.into_iter().map(|(t, _)| t.lexeme).collect();
    assert_eq!(lexemes, vec![
        Lexeme::Integer(123), Lexeme::Integer(0), Lexeme::Boolean(true), Lexeme::Boolean(false),
    ]);
}

#[test]
fn test_digits_followed_by_letters_split_in_two_tokens() {
    assert_eq!(kinds("12abc"), vec![TokenKind::IntegerLiteral, TokenKind::Identifier]);
}

#[test]
fn test_comments_produce_no_tokens() {
    assert!(kinds("{ isto é um comentário }").is_empty());
    assert!(kinds("// comentário").is_empty());
    assert_eq!(kinds("a { x := 1 } b // c d"), vec![TokenKind::Identifier, TokenKind::Identifier]);
}

#[test]
fn test_brace_comment_advances_line_counter() {
    let tokens = lex_source("{ linha 1\nlinha 2\n}\nx").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].1, 4);
}

#[test]
fn test_line_comment_stops_at_newline() {
    let tokens = lex_source("a // fim da linha\nb").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].1, 1);
    assert_eq!(tokens[1].1, 2);
}

#[test]
fn test_unterminated_brace_comment_runs_to_end() {
    assert_eq!(kinds("x { sem fechamento\n y z"), vec![TokenKind::Identifier]);
}

#[test]
fn test_byte_order_mark_is_whitespace() {
    let tokens = lex_source("\u{FEFF}program p; inicio fim.").unwrap();
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[0], (Token::new(TokenKind::Program, Lexeme::Text("program".into())), 1));
    assert_eq!(kinds("a\u{FEFF}b"), vec![TokenKind::Identifier, TokenKind::Identifier]);
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("x");
    assert!(lexer.next_token().unwrap().is(TokenKind::Identifier));
    for _ in 0..3 {
        assert_eq!(lexer.next_token().unwrap(), Token::eof());
    }
}

#[test]
fn test_line_tracking_across_tokens() {
    let tokens = lex_source("program p;\n\ninicio\n  x := 1\nfim.").unwrap();
    let lines: Vec<usize> = tokens.iter().map(|(_, line)| *line).collect();
    assert_eq!(lines, vec![1, 1, 1, 3, 4, 4, 4, 5, 5]);
}

#[test]
fn test_peek_looks_one_character_past_the_cursor() {
    let mut lexer = Lexer::new("x := 1");
    lexer.next_token().unwrap();
    assert_eq!(lexer.peek(), Some(':'));

    let mut lexer = Lexer::new("x:=1");
    lexer.next_token().unwrap();
    assert_eq!(lexer.peek(), Some('='));

    let mut lexer = Lexer::new("escreva(a)");
    lexer.next_token().unwrap();
    assert_eq!(lexer.peek(), Some('a'));

    let mut lexer = Lexer::new("p");
    lexer.next_token().unwrap();
    assert_eq!(lexer.peek(), None);
}

#[test]
fn test_number_followed_by_dot_is_rejected() {
    let result = lex_source("var inteiro x; inicio x := 1.5 fim.");
    match result {
        Err(LexicalError::MalformedNumber { literal, line }) => {
            assert_eq!(literal, "1");
            assert_eq!(line, 1);
        }
        other => panic!("Expected LexicalError::MalformedNumber, got {:?}", other),
    }
    assert!(matches!(lex_source("x := 10."), Err(LexicalError::MalformedNumber { .. })));
}

#[test]
fn test_lexical_error_unrecognized_character() {
    let result = lex_source("inicio\n\n x := 10 $ 20");
    assert_eq!(result, Err(LexicalError::UnexpectedCharacter { character: '$', line: 3 }));
    let message = result.unwrap_err().to_string();
    assert!(message.contains('$'));
    assert!(message.contains("linha 3"));
}

#[test]
fn test_non_ascii_character_outside_comment_is_rejected() {
    assert!(matches!(
        lex_source("lógico"),
        Err(LexicalError::UnexpectedCharacter { character: 'ó', line: 1 })
    ));
}

#[test]
fn test_integer_overflow_is_a_lexical_error() {
    assert!(matches!(
        lex_source("99999999999999999999"),
        Err(LexicalError::IntegerOverflow { line: 1, .. })
    ));
}

#[test]
fn test_token_display() {
    let token = Token::new(TokenKind::Identifier, Lexeme::Text("x".into()));
    assert_eq!(token.to_string(), "Token<IDENTIFICADOR, x>");
    assert_eq!(Token::new(TokenKind::IntegerLiteral, Lexeme::Integer(7)).to_string(), "Token<INTEIRO_LITERAL, 7>");
    assert_eq!(Token::eof().to_string(), "Token<EOF, null>");
}
