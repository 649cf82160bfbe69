//! Lexer 单元测试
//!
//! 测试分词与缩进块结构
#![allow(unused_imports)]
use crate::frontend::lexer::tokens::{Keyword, Symbol, TokenKind};
use crate::frontend::lexer::{
    tokenize, tokenize_blocks, tokenize_blocks_with, LexError, LexerOptions,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

#[cfg(test)]
mod lexer_basic_tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize_blocks("\n   \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_eq!(
            kinds("know x_1 is prime"),
            vec![
                TokenKind::Keyword(Keyword::Know),
                ident("x_1"),
                TokenKind::Keyword(Keyword::Is),
                ident("prime"),
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("knowing"), vec![ident("knowing")]);
        assert_eq!(kinds("type_member"), vec![TokenKind::Keyword(Keyword::TypeMember)]);
    }

    #[test]
    fn test_unicode_identifier() {
        assert_eq!(kinds("α = β"), vec![
            ident("α"),
            TokenKind::Symbol(Symbol::Eq),
            ident("β"),
        ]);
    }

    #[test]
    fn test_number_is_digit_run() {
        assert_eq!(
            kinds("12.30"),
            vec![
                TokenKind::Number("12".to_string()),
                TokenKind::Symbol(Symbol::Dot),
                TokenKind::Number("30".to_string()),
            ]
        );
        assert_eq!(
            kinds("1x"),
            vec![TokenKind::Number("1".to_string()), ident("x")]
        );
    }
}

#[cfg(test)]
mod lexer_symbol_tests {
    use super::*;

    #[test]
    fn test_longest_match() {
        assert_eq!(
            kinds(":: : == = != ! ++ + -- - && & || |"),
            vec![
                TokenKind::Symbol(Symbol::ColonColon),
                TokenKind::Symbol(Symbol::Colon),
                TokenKind::Symbol(Symbol::EqEq),
                TokenKind::Symbol(Symbol::Eq),
                TokenKind::Symbol(Symbol::NotEq),
                TokenKind::Symbol(Symbol::Bang),
                TokenKind::Symbol(Symbol::PlusPlus),
                TokenKind::Symbol(Symbol::Plus),
                TokenKind::Symbol(Symbol::MinusMinus),
                TokenKind::Symbol(Symbol::Minus),
                TokenKind::Symbol(Symbol::AndAnd),
                TokenKind::Symbol(Symbol::Amp),
                TokenKind::Symbol(Symbol::OrOr),
                TokenKind::Symbol(Symbol::Pipe),
            ]
        );
    }

    #[test]
    fn test_symbols_need_no_spaces() {
        assert_eq!(
            kinds("$p(x,y)"),
            vec![
                TokenKind::Symbol(Symbol::Dollar),
                ident("p"),
                TokenKind::Symbol(Symbol::LParen),
                ident("x"),
                TokenKind::Symbol(Symbol::Comma),
                ident("y"),
                TokenKind::Symbol(Symbol::RParen),
            ]
        );
    }

    #[test]
    fn test_every_symbol_round_trips() {
        for symbol in Symbol::ALL {
            let tokens = tokenize(symbol.as_str()).unwrap();
            assert_eq!(tokens.len(), 1, "symbol {}", symbol.as_str());
            assert_eq!(tokens[0].kind, TokenKind::Symbol(*symbol));
        }
    }

    #[test]
    fn test_every_keyword_round_trips() {
        for keyword in Keyword::ALL {
            let tokens = tokenize(keyword.as_str()).unwrap();
            assert_eq!(tokens[0].kind, TokenKind::Keyword(*keyword));
        }
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("a = @b").unwrap_err();
        match err {
            LexError::UnexpectedChar { ch, position } => {
                assert_eq!(ch, '@');
                assert_eq!(position.line, 1);
                assert_eq!(position.column, 5);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[cfg(test)]
mod block_tests {
    use super::*;

    #[test]
    fn test_flat_blocks() {
        let blocks = tokenize_blocks("know a = b\nknow b = c\n").unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.body.is_empty()));
        assert_eq!(blocks[1].header_text(), "know b = c");
        assert_eq!(blocks[1].position.line, 2);
    }

    #[test]
    fn test_nested_blocks() {
        let source = "\
forall x A:
    if:
        $p(x)
    then:
        $q(x)
know a = b
";
        let blocks = tokenize_blocks(source).unwrap();
        assert_eq!(blocks.len(), 2);
        let forall = &blocks[0];
        assert_eq!(forall.body.len(), 2);
        assert_eq!(forall.body[0].header_text(), "if :");
        assert_eq!(forall.body[0].body[0].header_text(), "$ p ( x )");
        assert_eq!(forall.body[1].body.len(), 1);
        assert_eq!(forall.block_count(), 5);
    }

    #[test]
    fn test_tabs_expand_to_four_spaces() {
        let blocks = tokenize_blocks("know:\n\ta = b\n    b = c\n").unwrap();
        assert_eq!(blocks[0].body.len(), 2);
        assert_eq!(blocks[0].body[0].indent, 4);
    }

    #[test]
    fn test_custom_tab_width() {
        let options = LexerOptions { tab_width: 2 };
        let blocks = tokenize_blocks_with("know:\n\ta = b\n  b = c\n", &options).unwrap();
        assert_eq!(blocks[0].body.len(), 2);
    }

    #[test]
    fn test_blank_lines_inside_body() {
        let blocks = tokenize_blocks("know:\n    a = b\n\n    b = c\n").unwrap();
        assert_eq!(blocks[0].body.len(), 2);
    }

    #[test]
    fn test_indent_without_colon() {
        let err = tokenize_blocks("know a = b\n    b = c\n").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedIndent { .. }));
        assert_eq!(err.position().line, 2);
    }

    #[test]
    fn test_first_line_indented() {
        let err = tokenize_blocks("  know a = b\n").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedIndent { .. }));
    }

    #[test]
    fn test_inconsistent_dedent() {
        let err = tokenize_blocks("know:\n    a = b\n  b = c\n").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedIndent { .. }));
        assert_eq!(err.position().line, 3);
    }

    #[test]
    fn test_colon_without_body() {
        let err = tokenize_blocks("know:\nknow a = b\n").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedBlock { .. }));
        let err = tokenize_blocks("know:").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedBlock { .. }));
    }

    #[test]
    fn test_display_reindents() {
        let blocks = tokenize_blocks("know:\n\ta = b\n").unwrap();
        assert_eq!(blocks[0].to_string(), "know :\n    a = b\n");
    }
}
