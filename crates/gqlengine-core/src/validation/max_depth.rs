use crate::validation::ValidationContext;
use gqlengine_parser::Location;
use gqlengine_parser::ast::Selection;
use std::collections::HashMap;
use std::collections::HashSet;

/// `MaxDepth`: top-level fields are at depth 1. Spreads are followed, but
/// never into a fragment the walk is already inside or one that is part of
/// a cycle.
///
/// A fragment entered at some depth reports a superset of what it reports
/// when entered shallower, so it is only walked again when reached deeper
/// than before.
pub(crate) fn max_depth(ctx: &mut ValidationContext) {
    if ctx.max_depth == 0 {
        return;
    }
    let document = ctx.document;
    let mut walk = DepthWalk::default();
    for op in &document.operations {
        check_depth(ctx, &op.selections, 1, &mut walk);
    }
}

#[derive(Default)]
struct DepthWalk<'doc> {
    inside: HashSet<&'doc str>,
    deepest_entry: HashMap<&'doc str, usize>,
    reported: HashSet<Location>,
}

fn check_depth<'doc>(
    ctx: &mut ValidationContext<'_, 'doc>,
    selections: &'doc [Selection],
    depth: usize,
    walk: &mut DepthWalk<'doc>,
) {
    for selection in selections {
        match selection {
            Selection::Field(field) => {
                if depth > ctx.max_depth {
                    if walk.reported.insert(field.location()) {
                        let max_depth = ctx.max_depth;
                        ctx.report(
                            "MaxDepth",
                            format!(
                                "Field \"{}\" has depth {depth} that exceeds max depth {max_depth}",
                                field.name,
                            ),
                            [field.location()],
                        );
                    }
                } else {
                    check_depth(ctx, &field.selections, depth + 1, walk);
                }
            },

            Selection::InlineFragment(inline) =>
                check_depth(ctx, &inline.selections, depth, walk),

            Selection::FragmentSpread(spread) => {
                let name = spread.fragment_name.as_str();
                if walk.inside.contains(name) || ctx.cyclic_fragments.contains(name) {
                    continue;
                }
                if walk.deepest_entry.get(name).is_some_and(|deepest| *deepest >= depth) {
                    continue;
                }
                let Some(fragment) = ctx.fragment(name) else {
                    continue;
                };
                walk.deepest_entry.insert(name, depth);
                walk.inside.insert(name);
                check_depth(ctx, &fragment.selections, depth, walk);
                walk.inside.remove(name);
            },
        }
    }
}
