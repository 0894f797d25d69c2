//! Edge cases for whole-program parsing, exercised through [`Parser::parse_source`]
//! rather than a single production.

#[cfg(test)]
mod tests {
    use crate::ast::NodeKind;
    use crate::{ParseResult, Parser};
    use twc_util::Handler;

    fn parse(source: &str) -> ParseResult {
        let mut handler = Handler::new();
        Parser::parse_source(source, &mut handler)
    }

    #[test]
    fn empty_source() {
        let result = parse("");
        assert!(result.succeeded);
        assert!(result.nodes.children(result.nodes.root().unwrap()).is_empty());
    }

    #[test]
    fn whitespace_and_blank_lines_only() {
        let result = parse("\n\n\n");
        assert!(result.succeeded);
        assert!(result.nodes.children(result.nodes.root().unwrap()).is_empty());
    }

    #[test]
    fn single_type_declaration() {
        let result = parse("type Point\n\tx: i32\n\ty: i32\n");
        assert!(result.succeeded);
        let root = result.nodes.root().unwrap();
        let children = result.nodes.children(root);
        assert_eq!(children.len(), 1);
        assert_eq!(result.nodes.get(children[0]).kind, NodeKind::TypeDecl);
    }

    #[test]
    fn sequence_of_bindings_then_panic() {
        let source = "type Point\n\tx: i32\n\ty: i32\n\
            origin: Point = Point(x = 0, y = 0)\n\
            arr: i32[]<size=3> = [10, 20, 30]\n\
            result: i32 = match origin.x\n\
            \t0 -> 1\n\
            \t_ -> origin.x %% 7\n\
            panic\n";
        let result = parse(source);
        assert!(result.succeeded);
        let root = result.nodes.root().unwrap();
        let children = result.nodes.children(root);
        assert_eq!(children.len(), 5);
        assert_eq!(result.nodes.get(children[0]).kind, NodeKind::TypeDecl);
        assert_eq!(result.nodes.get(children[1]).kind, NodeKind::Binding);
        assert_eq!(result.nodes.get(children[2]).kind, NodeKind::Binding);
        assert_eq!(result.nodes.get(children[3]).kind, NodeKind::Binding);
        assert_eq!(result.nodes.get(children[4]).kind, NodeKind::PanicStmt);
    }

    #[test]
    fn spec_example_five_record_field_block_followed_by_field_access() {
        let source = "type Point\n\tx: i32\n\ty: i32\n\
            p: Point =\n\
            \tx: 5\n\
            \ty: 10\n\
            sum: i32 = p.x + p.y\n\
            panic\n";
        let result = parse(source);
        assert!(result.succeeded);
        let root = result.nodes.root().unwrap();
        let children = result.nodes.children(root);
        assert_eq!(children.len(), 4);
        let p_binding = children[1];
        assert_eq!(result.nodes.get(p_binding).kind, NodeKind::Binding);
        let p_children = result.nodes.children(p_binding);
        assert_eq!(p_children.len(), 3); // TypeName, x: 5, y: 10
        assert_eq!(result.nodes.get(p_children[1]).kind, NodeKind::FieldAssign);
        assert_eq!(result.nodes.get(p_children[2]).kind, NodeKind::FieldAssign);
    }

    #[test]
    fn deeply_nested_list_type_hints() {
        let result = parse("x: i32[]<size=2>[]<size=3> = [[1, 2], [3, 4], [5, 6]]\n");
        assert!(result.succeeded);
    }

    #[test]
    fn unterminated_record_literal_stops_the_parse() {
        let result = parse("x: Point = Point(a = 1\n");
        assert!(!result.succeeded);
    }

    #[test]
    fn unknown_leading_token_stops_the_parse_at_the_first_statement() {
        let result = parse("*\n");
        assert!(!result.succeeded);
        assert!(result.nodes.children(result.nodes.root().unwrap()).is_empty());
    }

    #[test]
    fn trailing_garbage_after_a_good_program_is_reported() {
        let result = parse("panic\n*\n");
        assert!(!result.succeeded);
        let root = result.nodes.root().unwrap();
        assert_eq!(result.nodes.children(root).len(), 1);
    }
}
