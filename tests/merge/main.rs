use kisuite::{NamespaceRegistry, SuiteDecl, host::GroupTree};
use pretty_assertions::assert_eq;

mod auth;
mod billing;

#[linkme::distributed_slice]
pub static SUITES: [SuiteDecl<GroupTree>];

fn load() -> GroupTree {
    let mut tree = GroupTree::new();
    let registry = NamespaceRegistry::new(&mut tree).unwrap();
    registry.register_all(&mut tree, SUITES.iter()).unwrap();
    tree
}

#[test]
fn files_share_top_level_groups() {
    let tree = load();

    let mut top: Vec<_> = tree
        .top_level()
        .iter()
        .map(|id| tree.description(*id))
        .collect();
    top.sort();
    assert_eq!(top, ["app", "billing"]);
}

#[test]
fn every_spec_lands_under_its_namespace() {
    let tree = load();

    let mut specs: Vec<_> = tree.all_specs().into_iter().map(|(name, _)| name).collect();
    specs.sort();
    assert_eq!(
        specs,
        [
            "app auth login accepts valid password",
            "app auth login rejects empty password",
            "app auth logout clears session",
            "app billing invoices totals line items",
            "billing refunds are idempotent",
        ]
    );
}

#[test]
fn cached_full_names_follow_the_final_parents() {
    let tree = load();

    let mut stack = tree.top_level().to_vec();
    while let Some(id) = stack.pop() {
        assert_eq!(tree.full_name(id), tree.compute_full_name(id));
        stack.extend(tree.children(id));
    }
}

#[test]
fn specs_still_pass_after_merging() {
    let tree = load();
    for (name, spec) in tree.all_specs() {
        assert_eq!(spec.run(), Ok(()), "{name} failed");
    }
}
