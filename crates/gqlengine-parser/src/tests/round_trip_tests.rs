//! Print/parse round-trip tests. Printed documents must re-parse into the
//! same structure and print identically.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

use crate::tests::utils;

#[derive(Clone, Debug)]
struct FieldShape {
    alias: Option<String>,
    name: String,
    args: Vec<(String, i32)>,
    children: Vec<FieldShape>,
}

impl FieldShape {
    /// Renders in the printer's canonical layout.
    fn render(&self, out: &mut String) {
        if let Some(alias) = &self.alias {
            out.push_str(alias);
            out.push_str(": ");
        }
        out.push_str(&self.name);
        if !self.args.is_empty() {
            let args: Vec<String> = self
                .args
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect();
            out.push('(');
            out.push_str(&args.join(", "));
            out.push(')');
        }
        if !self.children.is_empty() {
            out.push(' ');
            render_selection_set(&self.children, out);
        }
    }
}

fn render_selection_set(fields: &[FieldShape], out: &mut String) {
    out.push_str("{ ");
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        field.render(out);
    }
    out.push_str(" }");
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[_a-zA-Z][_a-zA-Z0-9]{0,6}"
}

fn field_strategy() -> impl Strategy<Value = FieldShape> {
    let leaf = (
        option::of(name_strategy()),
        name_strategy(),
        vec((name_strategy(), any::<i32>()), 0..3),
    )
        .prop_map(|(alias, name, args)| FieldShape {
            alias,
            name,
            args,
            children: Vec::new(),
        });

    leaf.prop_recursive(5, 48, 4, |inner| {
        (
            option::of(name_strategy()),
            name_strategy(),
            vec((name_strategy(), any::<i32>()), 0..3),
            vec(inner, 1..4),
        )
            .prop_map(|(alias, name, args, children)| FieldShape {
                alias,
                name,
                args,
                children,
            })
    })
}

proptest! {
    /// Verifies that a generated selection tree survives parse then print
    /// unchanged, including aliases and argument order.
    #[test]
    fn test_generated_selection_trees_round_trip(fields in vec(field_strategy(), 1..5)) {
        let mut source = String::new();
        render_selection_set(&fields, &mut source);

        let doc = utils::parse_ok(&source);
        prop_assert_eq!(doc.to_string(), format!("{source}\n"));
    }
}

/// Verifies that printing is a fixed point for a document using every
/// construct the printer knows about.
#[test]
fn test_print_is_stable_for_full_document() {
    let source = r#"
        query Q($id: ID! = "x\"y", $n: [Int!], $f: Float = 1) @dir(a: 1) {
          user(id: $id, filter: {tags: ["a", "b"], min: -2.5, kind: ADMIN, none: null}) {
            ...F
            ... on User @skip(if: true) { name }
            ... { __typename }
          }
        }
        mutation { inc(by: 1) }
        fragment F on User { id }
    "#;

    let printed = utils::parse_ok(source).to_string();
    let expected = concat!(
        "query Q($id: ID! = \"x\\\"y\", $n: [Int!], $f: Float = 1) @dir(a: 1) ",
        "{ user(id: $id, filter: {tags: [\"a\", \"b\"], min: -2.5, kind: ADMIN, none: null}) ",
        "{ ...F ... on User @skip(if: true) { name } ... { __typename } } }\n",
        "\n",
        "mutation { inc(by: 1) }\n",
        "\n",
        "fragment F on User { id }\n",
    );
    assert_eq!(printed, expected);

    let reprinted = utils::parse_ok(&printed).to_string();
    assert_eq!(reprinted, printed);
}

#[test]
fn test_float_literals_stay_floats() {
    let printed = utils::parse_ok("{ f(a: 1.0, b: 2e2) }").to_string();
    assert_eq!(printed, "{ f(a: 1.0, b: 200.0) }\n");
}
