use error_kin::hierarchy::{resolve, Kind, Shape};
use error_kin::{family, Fault};

family! {
    /// Root of the linear test hierarchy.
    pub KindA;
    /// Middle link.
    pub KindB: KindA;
    /// Most-derived link.
    pub KindC: KindB;
    /// A kind sharing no ancestry with the chain above.
    pub Unrelated;
}

family! {
    pub Left;
    pub Right;
    /// Derives from two parents, declaration order.
    pub Both: Left, Right;
}

#[test]
fn chain_runs_most_derived_first_root_last() {
    let chain = KindC::lineage();

    assert_eq!(
        chain.as_ref(),
        &[
            KindC::qualified_name(),
            KindB::qualified_name(),
            KindA::qualified_name(),
            Fault::qualified_name(),
        ]
    );
}

#[test]
fn chain_length_matches_derivation_depth() {
    assert_eq!(KindA::lineage().len(), 2);
    assert_eq!(KindB::lineage().len(), 3);
    assert_eq!(KindC::lineage().len(), 4);
}

#[test]
fn resolution_is_deterministic() {
    let first = KindC::lineage();
    let second = KindC::lineage();
    assert_eq!(first.as_ref(), second.as_ref());
}

#[test]
fn multiple_parents_walk_in_declaration_order() {
    let chain = Both::lineage();

    assert_eq!(
        chain.as_ref(),
        &[
            Both::qualified_name(),
            Left::qualified_name(),
            Fault::qualified_name(),
            Right::qualified_name(),
            Fault::qualified_name(),
        ]
    );
}

#[test]
fn root_resolves_to_single_entry() {
    let chain = resolve(Fault::shape(), Fault::shape());
    assert_eq!(chain.as_ref(), &[Fault::qualified_name()]);
}

#[test]
fn orphan_shape_cannot_reach_root_and_degrades() {
    // Hand-rolled shape outside family!, deliberately malformed: no parents,
    // not the root. Resolution stays permissive and parent tests answer no.
    static ORPHAN: Shape = Shape {
        name: "hierarchy::Orphan",
        embeds: &[],
    };

    let chain = resolve(&ORPHAN, Fault::shape());
    assert_eq!(chain.as_ref(), &["hierarchy::Orphan"]);
    assert!(!chain.iter().any(|name| *name == Fault::qualified_name()));
}

#[test]
fn ancestor_value_is_parent_of_descendant_value() {
    let ancestor = KindA::make("");
    let descendant = KindC::make("");

    assert!(ancestor.is_parent_of(&descendant));
    assert!(!descendant.is_parent_of(&ancestor));
}

#[test]
fn kind_is_parent_of_itself() {
    let one = KindB::make("");
    let other = KindB::make("");
    assert!(one.is_parent_of(&other));
}

#[test]
fn unrelated_kinds_never_match() {
    let unrelated = Unrelated::make("");
    let derived = KindC::make("");

    assert!(!unrelated.is_parent_of(&derived));
    assert!(!derived.is_parent_of(&unrelated));
}

#[test]
fn foreign_errors_are_never_matched() {
    let ancestor = KindA::make("");
    let foreign = std::io::Error::other("not a fault");

    assert!(!ancestor.is_parent_of(&foreign));
}

#[test]
fn root_is_parent_of_everything_declared() {
    let root = Fault::of::<Fault>("");
    assert!(root.is_parent_of(&KindC::make("")));
    assert!(root.is_parent_of(&Unrelated::make("")));
}

#[test]
fn derives_from_mirrors_value_level_test() {
    let fault = KindC::make("");
    assert!(fault.derives_from::<KindC>());
    assert!(fault.derives_from::<KindB>());
    assert!(fault.derives_from::<KindA>());
    assert!(fault.derives_from::<Fault>());
    assert!(!fault.derives_from::<Unrelated>());
}
