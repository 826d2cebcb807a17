use trivast::{
    collect_parameters, parse, AstNode, AstVisitor, Binary, Conditional, Constant,
    DefaultAstVisitor, Function, NodeKind, Parameter, Unary, Unsupported,
};

/// Counts nodes recursively through `accept`.
struct NodeCount;

impl<'a> AstVisitor<'a> for NodeCount {
    type Output = usize;

    fn visit_constant(&mut self, _node: &'a Constant) -> usize {
        1
    }

    fn visit_parameter(&mut self, _node: &'a Parameter) -> usize {
        1
    }

    fn visit_unary(&mut self, node: &'a Unary) -> usize {
        1 + node.operand().accept(self)
    }

    fn visit_binary(&mut self, node: &'a Binary) -> usize {
        1 + node.left().accept(self) + node.right().accept(self)
    }

    fn visit_conditional(&mut self, node: &'a Conditional) -> usize {
        1 + node.condition().accept(self)
            + node.if_true().accept(self)
            + node.if_false().accept(self)
    }

    fn visit_function(&mut self, node: &'a Function) -> usize {
        1 + node
            .arguments()
            .iter()
            .map(|a| a.accept(self))
            .sum::<usize>()
    }

    fn visit_unsupported(&mut self, _node: &'a Unsupported) -> usize {
        1
    }
}

#[test]
fn full_visitor_agrees_with_traversal() {
    let ast = parse("f(a, -b) ? 1 + c : null").unwrap();
    assert_eq!(ast.accept(&mut NodeCount), ast.traverse().count());
}

/// Names every function call; everything else is `None`.
struct CallName;

impl<'a> DefaultAstVisitor<'a> for CallName {
    type Output = Option<&'a str>;

    fn fallback(&mut self, _kind: NodeKind) -> Self::Output {
        None
    }

    fn visit_function(&mut self, node: &'a Function) -> Self::Output {
        Some(node.name())
    }
}

#[test]
fn default_visitor_overrides_one_variant() {
    let ast = parse("Math.Max(a, Math.Min(b, 1)) + g()").unwrap();
    let names: Vec<&str> = ast
        .traverse()
        .filter_map(|n| n.accept(&mut CallName))
        .collect();
    assert_eq!(names, vec!["Math.Max", "Math.Min", "g"]);
}

#[test]
fn kind_reports_variant() {
    let cases = [
        ("1", NodeKind::Constant),
        ("x", NodeKind::Parameter),
        ("-x", NodeKind::Unary),
        ("x + 1", NodeKind::Binary),
        ("x ? 1 : 2", NodeKind::Conditional),
        ("f()", NodeKind::Function),
        ("null", NodeKind::Unsupported),
    ];
    for (src, kind) in cases {
        assert_eq!(parse(src).unwrap().kind(), kind, "{}", src);
    }
}

#[test]
fn parameters_in_first_seen_order() {
    let ast = parse("b * a + f(c, b) - a").unwrap();
    assert_eq!(collect_parameters(&ast), vec!["b", "a", "c"]);
}

#[test]
fn payload_accessors() {
    let ast = parse("x >= 2 ? \"ok\" : f(1)").unwrap();
    let AstNode::Conditional(cond) = &ast else {
        panic!("expected conditional, got {:?}", ast);
    };
    let AstNode::Binary(test) = cond.condition() else {
        panic!("expected binary condition");
    };
    assert_eq!(test.operator(), ">=");
    assert_eq!(test.left(), &AstNode::parameter("x"));
    assert_eq!(cond.if_true(), &AstNode::constant("ok"));
    let AstNode::Function(call) = cond.if_false() else {
        panic!("expected call");
    };
    assert_eq!(call.name(), "f");
    assert_eq!(call.arguments(), &[AstNode::constant(1)]);
}
