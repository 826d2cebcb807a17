use trivast::{collect_unsupported, parse, traverse, AstNode, NodeKind};

fn kinds(ast: &AstNode) -> Vec<NodeKind> {
    ast.traverse().map(AstNode::kind).collect()
}

#[test]
fn preorder_document_order() {
    let ast = parse("f(a + 1, !b) ? c : -2").unwrap();
    let rendered: Vec<String> = traverse(&ast).map(|n| n.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "(f((a + 1), ! b)) ? (c) : (- 2)",
            "f((a + 1), ! b)",
            "(a + 1)",
            "a",
            "1",
            "! b",
            "b",
            "c",
            "- 2",
            "2",
        ]
    );
}

#[test]
fn leaf_yields_only_itself() {
    let ast = AstNode::constant(5);
    assert_eq!(kinds(&ast), vec![NodeKind::Constant]);
    assert_eq!(ast.children().count(), 0);
}

#[test]
fn children_order_per_variant() {
    let cond = parse("a ? b : c").unwrap();
    let names: Vec<String> = cond.children().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    let bin = parse("a - b").unwrap();
    let names: Vec<String> = bin.children().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["a", "b"]);

    let call = parse("g(x, 2, \"s\")").unwrap();
    assert_eq!(call.children().len(), 3);

    let neg = parse("-x").unwrap();
    let names: Vec<String> = neg.children().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["x"]);
}

#[test]
fn every_node_visited_once() {
    let ast = parse("1 + 2 * 3 - f(4, 5)").unwrap();
    // -, +, 1, *, 2, 3, f, 4, 5
    assert_eq!(ast.traverse().count(), 9);
}

#[test]
fn traversal_is_repeatable() {
    let ast = parse("a * (b + c) > d").unwrap();
    let first: Vec<*const AstNode> = ast.traverse().map(|n| n as *const _).collect();
    let second: Vec<*const AstNode> = ast.traverse().map(|n| n as *const _).collect();
    assert_eq!(first, second);
}

#[test]
fn finds_every_unsupported_node_in_order() {
    let ast = parse("f(null, 'c', a.b) + (int)x").unwrap();
    let found: Vec<&str> = collect_unsupported(&ast)
        .into_iter()
        .map(|u| u.explanation())
        .collect();
    assert_eq!(
        found,
        vec![
            "Null literal is not supported",
            "Character literals are not supported",
            "Member access is not supported",
            "Type conversion is not supported",
        ]
    );
    let via_traverse = ast
        .traverse()
        .filter(|n| n.kind() == NodeKind::Unsupported)
        .count();
    assert_eq!(via_traverse, 4);
}

#[test]
fn unsupported_under_unary_is_reachable() {
    let ast = parse("-null").unwrap();
    assert_eq!(kinds(&ast), vec![NodeKind::Unary, NodeKind::Unsupported]);
    assert_eq!(collect_unsupported(&ast).len(), 1);
}

#[test]
fn deep_tree_walks_without_recursion() {
    let mut ast = AstNode::parameter("x");
    for _ in 0..2_000 {
        ast = AstNode::unary("-", ast);
    }
    assert_eq!(ast.traverse().count(), 2_001);
    assert_eq!(ast.traverse().last().map(AstNode::kind), Some(NodeKind::Parameter));
}
