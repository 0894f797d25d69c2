//! Integration tests exercising [`crate::generate`] against whole small
//! programs, run through the checker first.

use crate::{generate, CodeGenError};
use twc_par::{Parser, TokenStore};
use twc_sem::check;
use twc_util::Handler;

fn gen(source: &str) -> crate::GenResult {
    let mut handler = Handler::new();
    let tokens = TokenStore::lex(source, &mut handler);
    let parse = Parser::new(&tokens, &mut handler).parse_program();
    let checked = check(&parse.nodes, &tokens, &mut handler);
    assert!(checked.succeeded, "checker failed: {:?}", handler.diagnostics());
    generate(&checked, &parse.nodes, &tokens).expect("codegen")
}

#[test]
fn bare_panic_emits_unreachable_with_no_locals() {
    let result = gen("panic\n");
    assert_eq!(&result.binary[0..4], b"\0asm");
    assert!(result.valid);
    assert!(result.text.contains("unreachable"));
}

#[test]
fn scalar_binding_emits_one_local_and_its_constant() {
    let result = gen("x: i32 = 1\npanic\n");
    assert!(result.valid);
    assert!(result.text.contains("i32.const 1"));
    assert!(result.text.contains("local.set 0"));
}

#[test]
fn refined_binding_within_bounds_compiles() {
    let result = gen("x: i32<min=0, max=100> = 50\npanic\n");
    assert!(result.valid);
    assert!(result.text.contains("i32.const 50"));
}

#[test]
fn list_binding_emits_one_local_per_element_and_index_read() {
    let result = gen("arr: i32[]<size=3> = [10, 20, 30]\ny: i32 = arr[2]\npanic\n");
    assert!(result.valid);
    for v in ["i32.const 10", "i32.const 20", "i32.const 30"] {
        assert!(result.text.contains(v), "missing {v} in:\n{}", result.text);
    }
    assert!(result.text.contains("local.get 2"));
}

#[test]
fn record_field_sum_emits_an_add() {
    let source =
        "type Point\n\tx: i32\n\ty: i32\np: Point =\n\tx: 5\n\ty: 10\nsum: i32 = p.x + p.y\npanic\n";
    let result = gen(source);
    assert!(result.valid);
    assert!(result.text.contains("i32.add"));
}

#[test]
fn match_with_catch_all_emits_two_comparisons() {
    let source = "x: i32 = 1\nresult: i32 = match x\n\t0 -> 100\n\t1 -> 200\n\t_ -> 0\npanic\n";
    let result = gen(source);
    assert!(result.valid);
    assert_eq!(result.text.matches("i32.eq").count(), 2);
    assert_eq!(result.text.matches("if").count(), 2);
}

#[test]
fn empty_instruction_stream_is_an_empty_program_error() {
    let mut handler = Handler::new();
    let tokens = TokenStore::lex("", &mut handler);
    let parse = Parser::new(&tokens, &mut handler).parse_program();
    let checked = check(&parse.nodes, &tokens, &mut handler);
    let err = generate(&checked, &parse.nodes, &tokens).unwrap_err();
    assert!(matches!(err, CodeGenError::EmptyProgram));
}

#[test]
fn euclidean_modulo_of_negative_operand_compiles() {
    let result = gen("x: i32 = -7 %% 3\npanic\n");
    assert!(result.valid);
}
