//! Parser tests for Studium statement and expression forms

use crate::ast::{BinOp, Expr, Stmt, Type, UnOp};
use crate::lexer::tokenize;
use crate::parser::parse;

/// Helper to parse a Studium program and return the AST
fn parse_program(source: &str) -> crate::Result<crate::ast::Program> {
    let tokens = tokenize(source)?;
    parse("test.stud", source, tokens)
}

/// Helper to parse and expect success
fn parse_ok(source: &str) -> crate::ast::Program {
    parse_program(source).expect("Parse should succeed")
}

/// Helper to check if parsing fails
fn parse_fails(source: &str) -> bool {
    parse_program(source).is_err()
}

// ============================================
// Declarations and assignments
// ============================================

#[test]
fn test_parse_empty_program() {
    let prog = parse_ok("");
    assert!(prog.stmts.is_empty());
}

#[test]
fn test_parse_decl_with_init() {
    let prog = parse_ok("int x = 5;");
    assert_eq!(prog.stmts.len(), 1);
    if let Stmt::Decl { ty, name, init } = &prog.stmts[0].node {
        assert_eq!(ty.node, Type::Int);
        assert_eq!(name.node, "x");
        assert!(matches!(init.as_ref().unwrap().node, Expr::IntLit(5)));
    } else {
        panic!("Expected Decl");
    }
}

#[test]
fn test_parse_decl_without_init() {
    let prog = parse_ok("string s;");
    if let Stmt::Decl { ty, name, init } = &prog.stmts[0].node {
        assert_eq!(ty.node, Type::String);
        assert_eq!(name.node, "s");
        assert!(init.is_none());
    } else {
        panic!("Expected Decl");
    }
}

#[test]
fn test_parse_decl_each_type() {
    parse_ok("int a;");
    parse_ok("double b;");
    parse_ok("boolean c;");
    parse_ok("char d;");
    parse_ok("string e;");
}

#[test]
fn test_parse_assign() {
    let prog = parse_ok("x = x + 1;");
    if let Stmt::Assign { name, value } = &prog.stmts[0].node {
        assert_eq!(name.node, "x");
        assert!(matches!(value.node, Expr::Binary { op: BinOp::Add, .. }));
    } else {
        panic!("Expected Assign");
    }
}

// ============================================
// Print and clear
// ============================================

#[test]
fn test_parse_print() {
    let prog = parse_ok(r#"print "hello";"#);
    if let Stmt::Print(e) = &prog.stmts[0].node {
        assert!(matches!(&e.node, Expr::StringLit(s) if s == "hello"));
    } else {
        panic!("Expected Print");
    }
}

#[test]
fn test_parse_clear() {
    let prog = parse_ok("clear;");
    assert!(matches!(prog.stmts[0].node, Stmt::Clear));
}

// ============================================
// Literals
// ============================================

#[test]
fn test_parse_literals() {
    let prog = parse_ok("print 42; print 1.5; print true; print false; print null; print 'a';");
    let exprs: Vec<_> = prog
        .stmts
        .iter()
        .map(|s| match &s.node {
            Stmt::Print(e) => &e.node,
            _ => panic!("Expected Print"),
        })
        .collect();
    assert!(matches!(exprs[0], Expr::IntLit(42)));
    assert!(matches!(exprs[1], Expr::DoubleLit(x) if (*x - 1.5).abs() < f64::EPSILON));
    assert!(matches!(exprs[2], Expr::BoolLit(true)));
    assert!(matches!(exprs[3], Expr::BoolLit(false)));
    assert!(matches!(exprs[4], Expr::NullLit));
    assert!(matches!(exprs[5], Expr::CharLit(c) if c == "a"));
}

// ============================================
// Operator precedence and associativity
// ============================================

#[test]
fn test_parse_mul_binds_tighter_than_add() {
    let prog = parse_ok("print 1 + 2 * 3;");
    let Stmt::Print(e) = &prog.stmts[0].node else {
        panic!("Expected Print");
    };
    let Expr::Binary { left, op, right } = &e.node else {
        panic!("Expected Binary");
    };
    assert_eq!(*op, BinOp::Add);
    assert!(matches!(left.node, Expr::IntLit(1)));
    assert!(matches!(right.node, Expr::Binary { op: BinOp::Mul, .. }));
}

#[test]
fn test_parse_comparison_binds_tighter_than_logical() {
    let prog = parse_ok("print 1 < 2 && 3 < 4;");
    let Stmt::Print(e) = &prog.stmts[0].node else {
        panic!("Expected Print");
    };
    let Expr::Binary { left, op, right } = &e.node else {
        panic!("Expected Binary");
    };
    assert_eq!(*op, BinOp::And);
    assert!(matches!(left.node, Expr::Binary { op: BinOp::Lt, .. }));
    assert!(matches!(right.node, Expr::Binary { op: BinOp::Lt, .. }));
}

#[test]
fn test_parse_and_binds_tighter_than_or() {
    let prog = parse_ok("print true || false && false;");
    let Stmt::Print(e) = &prog.stmts[0].node else {
        panic!("Expected Print");
    };
    let Expr::Binary { op, right, .. } = &e.node else {
        panic!("Expected Binary");
    };
    assert_eq!(*op, BinOp::Or);
    assert!(matches!(right.node, Expr::Binary { op: BinOp::And, .. }));
}

#[test]
fn test_parse_subtraction_left_associative() {
    let prog = parse_ok("print 10 - 4 - 3;");
    let Stmt::Print(e) = &prog.stmts[0].node else {
        panic!("Expected Print");
    };
    let Expr::Binary { left, op, right } = &e.node else {
        panic!("Expected Binary");
    };
    assert_eq!(*op, BinOp::Sub);
    assert!(matches!(left.node, Expr::Binary { op: BinOp::Sub, .. }));
    assert!(matches!(right.node, Expr::IntLit(3)));
}

#[test]
fn test_parse_parens_override_precedence() {
    let prog = parse_ok("print (1 + 2) * 3;");
    let Stmt::Print(e) = &prog.stmts[0].node else {
        panic!("Expected Print");
    };
    let Expr::Binary { left, op, .. } = &e.node else {
        panic!("Expected Binary");
    };
    assert_eq!(*op, BinOp::Mul);
    assert!(matches!(left.node, Expr::Binary { op: BinOp::Add, .. }));
}

#[test]
fn test_parse_unary() {
    let prog = parse_ok("print -x; print !ready; print - -1;");
    let Stmt::Print(e) = &prog.stmts[0].node else {
        panic!("Expected Print");
    };
    assert!(matches!(e.node, Expr::Unary { op: UnOp::Neg, .. }));
    let Stmt::Print(e) = &prog.stmts[1].node else {
        panic!("Expected Print");
    };
    assert!(matches!(e.node, Expr::Unary { op: UnOp::Not, .. }));
    let Stmt::Print(e) = &prog.stmts[2].node else {
        panic!("Expected Print");
    };
    let Expr::Unary { op: UnOp::Neg, expr } = &e.node else {
        panic!("Expected Unary");
    };
    assert!(matches!(expr.node, Expr::Unary { op: UnOp::Neg, .. }));
}

// ============================================
// Control flow
// ============================================

#[test]
fn test_parse_if() {
    let prog = parse_ok("if (x > 0) { print x; }");
    if let Stmt::If {
        cond,
        then_block,
        else_block,
    } = &prog.stmts[0].node
    {
        assert!(matches!(cond.node, Expr::Binary { op: BinOp::Gt, .. }));
        assert_eq!(then_block.len(), 1);
        assert!(else_block.is_none());
    } else {
        panic!("Expected If");
    }
}

#[test]
fn test_parse_if_else() {
    let prog = parse_ok("if (x > 0) { print 1; } else { print 2; }");
    if let Stmt::If { else_block, .. } = &prog.stmts[0].node {
        assert_eq!(else_block.as_ref().unwrap().len(), 1);
    } else {
        panic!("Expected If");
    }
}

#[test]
fn test_parse_nested_if_in_else() {
    let prog = parse_ok("if (a) { print 1; } else { if (b) { print 2; } }");
    if let Stmt::If { else_block, .. } = &prog.stmts[0].node {
        let else_block = else_block.as_ref().unwrap();
        assert!(matches!(else_block[0].node, Stmt::If { .. }));
    } else {
        panic!("Expected If");
    }
}

#[test]
fn test_parse_while() {
    let prog = parse_ok("while (i < 10) { i = i + 1; }");
    if let Stmt::While { cond, body } = &prog.stmts[0].node {
        assert!(matches!(cond.node, Expr::Binary { op: BinOp::Lt, .. }));
        assert_eq!(body.len(), 1);
    } else {
        panic!("Expected While");
    }
}

#[test]
fn test_parse_for_full_header() {
    let prog = parse_ok("for (int i = 0; i < 3; i = i + 1) { print i; }");
    if let Stmt::For {
        init,
        cond,
        update,
        body,
    } = &prog.stmts[0].node
    {
        assert!(matches!(init.as_ref().unwrap().node, Stmt::Decl { .. }));
        assert!(matches!(
            cond.as_ref().unwrap().node,
            Expr::Binary { op: BinOp::Lt, .. }
        ));
        assert!(matches!(update.as_ref().unwrap().node, Stmt::Assign { .. }));
        assert_eq!(body.len(), 1);
    } else {
        panic!("Expected For");
    }
}

#[test]
fn test_parse_for_empty_header() {
    let prog = parse_ok("for (;;) { }");
    if let Stmt::For {
        init,
        cond,
        update,
        body,
    } = &prog.stmts[0].node
    {
        assert!(init.is_none());
        assert!(cond.is_none());
        assert!(update.is_none());
        assert!(body.is_empty());
    } else {
        panic!("Expected For");
    }
}

#[test]
fn test_parse_for_assign_init() {
    let prog = parse_ok("for (i = 0; i < 3;) { }");
    if let Stmt::For { init, update, .. } = &prog.stmts[0].node {
        assert!(matches!(init.as_ref().unwrap().node, Stmt::Assign { .. }));
        assert!(update.is_none());
    } else {
        panic!("Expected For");
    }
}

#[test]
fn test_parse_block_statement() {
    let prog = parse_ok("{ int x = 1; print x; }");
    if let Stmt::Block(stmts) = &prog.stmts[0].node {
        assert_eq!(stmts.len(), 2);
    } else {
        panic!("Expected Block");
    }
}

#[test]
fn test_parse_multiple_statements() {
    let prog = parse_ok("int x = 5; x = x + 1; print x;");
    assert_eq!(prog.stmts.len(), 3);
}

// ============================================
// Failures
// ============================================

#[test]
fn test_parse_fails_missing_semicolon() {
    assert!(parse_fails("int x = 5"));
}

#[test]
fn test_parse_fails_missing_condition_parens() {
    assert!(parse_fails("if x > 0 { print x; }"));
}

#[test]
fn test_parse_fails_unbraced_else() {
    assert!(parse_fails("if (a) { } else print 1;"));
}

#[test]
fn test_parse_fails_unclosed_block() {
    assert!(parse_fails("while (true) { print 1;"));
}

#[test]
fn test_parse_fails_expression_statement() {
    assert!(parse_fails("1 + 2;"));
}

#[test]
fn test_parse_fails_decl_missing_name() {
    assert!(parse_fails("int = 5;"));
}

// ============================================
// Spans
// ============================================

#[test]
fn test_parse_statement_spans() {
    let source = "int x = 5; print x;";
    let prog = parse_ok(source);
    assert_eq!(prog.stmts[0].span.start, 0);
    assert_eq!(prog.stmts[0].span.end, 10);
    assert_eq!(prog.stmts[1].span.start, 11);
    assert_eq!(prog.stmts[1].span.end, source.len());
}
