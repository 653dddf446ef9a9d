use crate::aggregate::FrequencyTable;
use pretty_assertions::assert_eq;

fn table(values: &[&str]) -> FrequencyTable {
    let mut t = FrequencyTable::new();
    for v in values {
        t.add(v);
    }
    t
}

#[test]
fn sorted_is_descending_by_count() {
    let t = table(&["a", "b", "b", "c", "c", "c"]);

    assert_eq!(
        t.sorted(),
        vec![
            ("c".to_string(), 3),
            ("b".to_string(), 2),
            ("a".to_string(), 1)
        ]
    );
}

#[test]
fn ties_keep_first_appearance_order() {
    let t = table(&["boots", "hat", "scarf", "hat", "boots", "scarf", "gloves"]);

    let order: Vec<_> = t.sorted().into_iter().map(|(v, _)| v).collect();

    assert_eq!(order, vec!["boots", "hat", "scarf", "gloves"]);
}

#[test]
fn total_sums_every_occurrence() {
    let t = table(&["x", "y", "x"]);

    assert_eq!(t.total(), 3);
    assert_eq!(t.sorted().len(), 2);
}
