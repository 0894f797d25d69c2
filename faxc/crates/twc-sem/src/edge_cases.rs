//! Edge case tests for twc-sem: whole small programs run end to end through
//! [`crate::check_source`].

#[cfg(test)]
mod tests {
    use crate::{check_source, type_store as ts, InstKind};
    use twc_util::{DiagnosticCode, Handler};

    fn codes(handler: &Handler) -> Vec<DiagnosticCode> {
        handler.diagnostics().into_iter().filter_map(|d| d.code).collect()
    }

    #[test]
    fn bare_panic_succeeds_with_no_diagnostics() {
        let mut handler = Handler::new();
        let result = check_source("panic\n", &mut handler);
        assert!(result.succeeded);
        assert!(!handler.has_errors());
        assert_eq!(result.symbols.local_count(), 0);
    }

    #[test]
    fn scalar_binding_allocates_one_local_and_one_int_const() {
        let mut handler = Handler::new();
        let result = check_source("x: i32 = 1\npanic\n", &mut handler);
        assert!(result.succeeded, "diagnostics: {:?}", codes(&handler));
        assert_eq!(result.symbols.local_count(), 1);
        let has_int_const = result.insts.iter_enumerated().any(|(_, inst)| inst.kind == InstKind::IntConst);
        assert!(has_int_const);
    }

    #[test]
    fn refined_type_in_bounds_succeeds() {
        let mut handler = Handler::new();
        let result = check_source("x: i32<min=0, max=100> = 50\npanic\n", &mut handler);
        assert!(result.succeeded, "diagnostics: {:?}", codes(&handler));
    }

    #[test]
    fn refined_type_out_of_bounds_emits_twcheck041() {
        let mut handler = Handler::new();
        let result = check_source("x: i32<min=0, max=100> = -1\npanic\n", &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK041));
    }

    #[test]
    fn list_binding_flattens_to_one_local_per_element() {
        let mut handler = Handler::new();
        let result =
            check_source("arr: i32[]<size=3> = [10, 20, 30]\ny: i32 = arr[2]\npanic\n", &mut handler);
        assert!(result.succeeded, "diagnostics: {:?}", codes(&handler));
        assert_eq!(result.symbols.local_count(), 4);
    }

    #[test]
    fn record_declaration_and_literal_flatten_per_field() {
        let mut handler = Handler::new();
        let source = "type Point\n\tx: i32\n\ty: i32\np: Point =\n\tx: 5\n\ty: 10\nsum: i32 = p.x + p.y\npanic\n";
        let result = check_source(source, &mut handler);
        assert!(result.succeeded, "diagnostics: {:?}", codes(&handler));
        assert_eq!(result.symbols.local_count(), 3);
        assert!(result.symbols.local_of(twc_util::Symbol::intern("p.x")).is_some());
        assert!(result.symbols.local_of(twc_util::Symbol::intern("p.y")).is_some());
    }

    #[test]
    fn self_referential_record_emits_twcheck032() {
        let mut handler = Handler::new();
        let result = check_source("type N\n\tnext: N\npanic\n", &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK032));
    }

    #[test]
    fn match_with_catch_all_succeeds() {
        let mut handler = Handler::new();
        let source = "x: i32 = 1\nresult: i32 = match x\n\t0 -> 100\n\t1 -> 200\n\t_ -> 0\npanic\n";
        let result = check_source(source, &mut handler);
        assert!(result.succeeded, "diagnostics: {:?}", codes(&handler));
        let arm_count =
            result.insts.iter_enumerated().filter(|(_, inst)| inst.kind == InstKind::MatchArm).count();
        assert_eq!(arm_count, 3);
    }

    #[test]
    fn match_without_catch_all_emits_twcheck020() {
        let mut handler = Handler::new();
        let source = "x: i32 = 1\nresult: i32 = match x\n\t0 -> 100\n\t1 -> 200\npanic\n";
        let result = check_source(source, &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK020));
    }

    #[test]
    fn statement_after_panic_emits_twcheck050_warning_but_still_succeeds() {
        let mut handler = Handler::new();
        let result = check_source("panic\nx: i32 = 1\n", &mut handler);
        assert!(result.succeeded, "diagnostics: {:?}", codes(&handler));
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK050));
    }

    #[test]
    fn undefined_variable_emits_twcheck013() {
        let mut handler = Handler::new();
        let result = check_source("y: i32 = x\npanic\n", &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK013));
    }

    #[test]
    fn mismatched_binary_operand_types_emit_twcheck022() {
        let mut handler = Handler::new();
        let result = check_source("x: f32 = 1.0\ny: i32 = 2\nz: i32 = x + y\npanic\n", &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK022));
    }

    #[test]
    fn bitwise_operator_on_float_emits_twcheck021() {
        let mut handler = Handler::new();
        let result = check_source("x: f32 = 1.0\ny: f32 = 2.0\nz: f32 = x & y\npanic\n", &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK021));
    }

    #[test]
    fn division_by_literal_zero_emits_twcheck025() {
        let mut handler = Handler::new();
        let result = check_source("x: i32 = 1 / 0\npanic\n", &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK025));
    }

    #[test]
    fn chained_comparison_lowers_to_pairwise_and() {
        let mut handler = Handler::new();
        let result = check_source("a: i32 = 1\nb: i32 = 2\nc: i32 = 3\nx: i32 = a < b < c\npanic\n", &mut handler);
        assert!(result.succeeded, "diagnostics: {:?}", codes(&handler));
        let has_and = result.insts.iter_enumerated().any(|(_, inst)| inst.kind == InstKind::LogicalAnd);
        assert!(has_and);
    }

    #[test]
    fn chained_not_equal_is_ambiguous_and_emits_twcheck023() {
        let mut handler = Handler::new();
        let result = check_source("a: i32 = 1\nb: i32 = 2\nc: i32 = 3\nx: i32 = a != b != c\npanic\n", &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK023));
    }

    #[test]
    fn empty_source_has_no_root_and_succeeds_trivially() {
        let mut handler = Handler::new();
        let result = check_source("", &mut handler);
        assert!(result.succeeded);
        assert_eq!(result.insts.len(), 0);
    }

    #[test]
    fn float_literal_narrows_to_f32_binding() {
        let mut handler = Handler::new();
        let result = check_source("x: f32 = 1.5\npanic\n", &mut handler);
        assert!(result.succeeded, "diagnostics: {:?}", codes(&handler));
        let float_const = result
            .insts
            .iter_enumerated()
            .find(|(_, inst)| inst.kind == InstKind::FloatConst)
            .expect("expected a FloatConst instruction");
        assert_eq!(float_const.1.type_id, ts::F32);
    }

    #[test]
    fn unknown_field_access_emits_twcheck030() {
        let mut handler = Handler::new();
        let source = "type Point\n\tx: i32\n\ty: i32\np: Point =\n\tx: 5\n\ty: 10\nz: i32 = p.missing\npanic\n";
        let result = check_source(source, &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK030));
    }

    #[test]
    fn missing_record_field_emits_twcheck027() {
        let mut handler = Handler::new();
        let source = "type Point\n\tx: i32\n\ty: i32\np: Point =\n\tx: 5\npanic\n";
        let result = check_source(source, &mut handler);
        assert!(!result.succeeded);
        assert!(codes(&handler).contains(&DiagnosticCode::TWCHECK027));
    }
}
