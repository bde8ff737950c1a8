use hplc_engine::naming::{canonicalize, is_standard_name, CanonicalIdentifier};
use proptest::prelude::*;

fn regular_identifier() -> impl Strategy<Value = String> {
    (
        "[A-Za-z_]{1,8}",
        0u64..100_000,
        proptest::option::of(0u32..20),
        proptest::option::of(0u32..20),
    )
        .prop_filter("standards keep their own naming", |(prefix, ..)| {
            !is_standard_name(prefix)
        })
        .prop_map(|(prefix, number, replicate, timepoint)| {
            let mut raw = format!("{prefix}{number}");
            if let Some(replicate) = replicate {
                raw.push_str(&format!(".R{replicate}"));
            }
            if let Some(timepoint) = timepoint {
                raw.push_str(&format!(".T{timepoint}"));
            }
            raw
        })
}

fn components(id: &CanonicalIdentifier) -> (String, u64, Option<u32>, Option<u32>) {
    match id {
        CanonicalIdentifier::Sample {
            prefix,
            number,
            replicate,
            timepoint,
        } => (prefix.clone(), *number, *replicate, *timepoint),
        other => panic!("expected a parsed sample, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn canonical_form_is_a_fixed_point(raw in regular_identifier()) {
        let first = canonicalize(&raw);
        let second = canonicalize(&first.render(0));
        prop_assert_eq!(components(&first), components(&second));
    }

    #[test]
    fn technical_suffix_does_not_leak_into_components(raw in regular_identifier(), k in 1usize..6) {
        let first = canonicalize(&raw);
        let rendered = first.render(k);
        let suffix = format!(".TR{}", k);
        prop_assert!(rendered.ends_with(&suffix), "{} lacks {}", rendered, suffix);
        prop_assert_eq!(components(&canonicalize(&rendered)), components(&first));
    }

    #[test]
    fn standard_render_appends_only_the_technical_suffix(
        base in "(STD|std|Standard|standard)[A-Za-z0-9_]{0,8}",
        k in 0usize..6,
    ) {
        let id = canonicalize(&base);
        prop_assert!(id.is_standard());
        let expected = if k == 0 { base.clone() } else { format!("{base}.TR{k}") };
        prop_assert_eq!(id.render(k), expected);
    }
}

#[test]
fn padded_names_sort_numerically() {
    let mut names: Vec<String> = ["S10", "S9", "S100", "S1"]
        .iter()
        .map(|raw| canonicalize(raw).render(0))
        .collect();
    names.sort();
    assert_eq!(names, vec!["S00001", "S00009", "S00010", "S00100"]);
}
