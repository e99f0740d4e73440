use crate::validation::ValidationContext;
use gqlengine_parser::Location;
use gqlengine_parser::ast::FragmentDecl;
use std::collections::HashMap;
use std::collections::HashSet;

pub(crate) fn unique_fragment_names(ctx: &mut ValidationContext) {
    let document = ctx.document;
    let mut seen: HashMap<&str, Location> = HashMap::new();
    for fragment in document.fragments.iter() {
        let name = &fragment.name;
        if let Some(first_loc) = seen.get(name.as_str()) {
            let locations = [*first_loc, name.location];
            ctx.report(
                "UniqueFragmentNames",
                format!("There can be only one fragment named \"{name}\"."),
                locations,
            );
        } else {
            seen.insert(name.as_str(), name.location);
        }
    }
}

pub(crate) fn known_fragment_names(ctx: &mut ValidationContext) {
    let document = ctx.document;
    let mut unknown = vec![];
    let operation_selections = document.operations.iter().map(|op| op.selections.as_slice());
    let fragment_selections = document.fragments.iter().map(|f| f.selections.as_slice());
    for selections in operation_selections.chain(fragment_selections) {
        ValidationContext::for_each_direct_spread(selections, &mut |name| {
            if document.fragment(name.as_str()).is_none() {
                unknown.push(name);
            }
        });
    }
    for name in unknown {
        ctx.report(
            "KnownFragmentNames",
            format!("Unknown fragment \"{name}\"."),
            [name.location],
        );
    }
}

/// Reports every spread cycle once, however many fragments take part in
/// it, and records the fragments involved so later rules do not follow
/// their spreads.
///
/// Each fragment is expanded at most once across the whole document, so
/// the walk stays linear in the number of spreads even when fragments
/// spread each other many times over.
pub(crate) fn no_fragment_cycles(ctx: &mut ValidationContext) {
    let document = ctx.document;
    let mut cycles = vec![];
    let mut seen_normalized = HashSet::new();
    let mut expanded = HashSet::new();
    for fragment in document.fragments.iter() {
        if expanded.contains(fragment.name.as_str()) {
            continue;
        }
        check_fragment_cycles(
            ctx,
            fragment,
            &mut vec![],
            &mut HashSet::new(),
            &mut expanded,
            &mut seen_normalized,
            &mut cycles,
        );
    }

    for (cycle, location) in cycles {
        ctx.cyclic_fragments.extend(cycle.iter().copied());
        ctx.report(
            "NoFragmentCycles",
            format!("Fragment cycle detected: {}", cycle.join(" → ")),
            [location],
        );
    }
}

fn check_fragment_cycles<'doc>(
    ctx: &ValidationContext<'_, 'doc>,
    fragment: &'doc FragmentDecl,
    path: &mut Vec<&'doc str>,
    visiting: &mut HashSet<&'doc str>,
    expanded: &mut HashSet<&'doc str>,
    seen_normalized: &mut HashSet<Vec<&'doc str>>,
    cycles: &mut Vec<(Vec<&'doc str>, Location)>,
) {
    let name = fragment.name.as_str();
    path.push(name);
    visiting.insert(name);
    expanded.insert(name);

    let mut spreads = vec![];
    ValidationContext::for_each_direct_spread(&fragment.selections, &mut |spread| {
        spreads.push(spread)
    });

    for spread in spreads {
        let target = spread.as_str();
        if visiting.contains(target) {
            let start = path.iter().position(|n| *n == target).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(target);
            let normalized = normalize_cycle(&cycle);
            if seen_normalized.insert(normalized) {
                cycles.push((cycle, spread.location));
            }
            continue;
        }
        if expanded.contains(target) {
            continue;
        }
        if let Some(next) = ctx.fragment(target) {
            check_fragment_cycles(ctx, next, path, visiting, expanded, seen_normalized, cycles);
        }
    }

    path.pop();
    visiting.remove(name);
}

/// Rotates `[B, C, A, B]` to `[A, B, C, A]` so that one cycle found from
/// different starting fragments compares equal.
fn normalize_cycle<'a>(cycle: &[&'a str]) -> Vec<&'a str> {
    let Some((_, without_repeat)) = cycle.split_last() else {
        return vec![];
    };
    let min_idx = without_repeat
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    let mut normalized = Vec::with_capacity(cycle.len());
    normalized.extend_from_slice(&without_repeat[min_idx..]);
    normalized.extend_from_slice(&without_repeat[..min_idx]);
    if let Some(first) = normalized.first().copied() {
        normalized.push(first);
    }
    normalized
}

pub(crate) fn no_unused_fragments(ctx: &mut ValidationContext) {
    let document = ctx.document;
    let mut used = HashSet::new();
    for op in &document.operations {
        for fragment in ctx.reachable_fragments(&op.selections) {
            used.insert(fragment.name.as_str());
        }
    }

    let unused: Vec<_> = document
        .fragments
        .iter()
        .filter(|fragment| !used.contains(fragment.name.as_str()))
        .collect();
    for fragment in unused {
        ctx.report(
            "NoUnusedFragments",
            format!("Fragment \"{}\" is never used.", fragment.name),
            [fragment.location],
        );
    }
}

/// `KnownTypeNames` and `FragmentsOnCompositeTypes` for fragment
/// declarations. Inline fragments are checked while walking fields.
pub(crate) fn fragment_type_conditions(ctx: &mut ValidationContext) {
    let document = ctx.document;
    let schema = ctx.schema;
    for fragment in document.fragments.iter() {
        let cond = &fragment.type_condition;
        match schema.lookup_type(cond.as_str()) {
            None => ctx.report(
                "KnownTypeNames",
                format!("Unknown type \"{cond}\"."),
                [cond.location],
            ),
            Some(type_) if !type_.is_composite() => ctx.report(
                "FragmentsOnCompositeTypes",
                format!(
                    "Fragment \"{}\" cannot condition on non composite type \"{cond}\".",
                    fragment.name,
                ),
                [cond.location],
            ),
            Some(_) => (),
        }
    }
}
