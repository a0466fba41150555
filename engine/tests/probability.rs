use dice::{Dice, RollSpec, expected_sum};
use proptest::prelude::*;

fn render(table: &[f64]) -> String {
    table
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}: {:.2}", i + 1, p * 100.0))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn d3_single_roll_is_uniform() {
    let p = Dice::new(3).unwrap().probability(1, 1);
    assert_eq!(p, vec![1.0 / 3.0; 3]);
}

#[test]
fn two_d2_sum() {
    let p = Dice::new(2).unwrap().probability(2, 2);
    assert_eq!(p, vec![0.0, 0.25, 0.5, 0.25]);
}

#[test]
fn best_of_two_d6_rolls_six_eleven_times_in_thirty_six() {
    let p = Dice::new(6).unwrap().probability(2, 1);
    assert!((p[5] - 11.0 / 36.0).abs() < 1e-12);
    assert!((p[5] - 0.3056).abs() < 1e-4);
}

#[test]
fn two_d6_table_snapshot() {
    let p = Dice::new(6).unwrap().probability(2, 2);
    insta::assert_snapshot!(render(&p), @r"
    1: 0.00
    2: 2.78
    3: 5.56
    4: 8.33
    5: 11.11
    6: 13.89
    7: 16.67
    8: 13.89
    9: 11.11
    10: 8.33
    11: 5.56
    12: 2.78
    ");
}

#[test]
fn ability_score_roll_matches_known_values() {
    // 4d6 drop lowest: 1296 outcomes, 18 comes up 21 times and 3 once.
    let p = "4d6k3".parse::<RollSpec>().unwrap().probability().unwrap();
    assert_eq!(p.len(), 18);
    assert!((p[17] - 21.0 / 1296.0).abs() < 1e-12);
    assert!((p[2] - 1.0 / 1296.0).abs() < 1e-12);
    assert!((expected_sum(&p) - 15869.0 / 1296.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn tables_are_normalised(sides in 1..=6i32, n in 1..=4i32, k in 1..=5i32) {
        let p = Dice::new(sides).unwrap().probability(n, k);
        prop_assert_eq!(p.len(), (sides * k) as usize);
        prop_assert!(p.iter().all(|&x| x >= 0.0));
        let total: f64 = p.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "sum was {}", total);
    }

    #[test]
    fn sums_below_k_never_happen(sides in 1..=6i32, n in 1..=4i32, k in 1..=4i32) {
        let p = Dice::new(sides).unwrap().probability(n, k);
        let floor = k.min(n) as usize;
        prop_assert!(p[..floor - 1].iter().all(|&x| x == 0.0));
        prop_assert!(p[floor - 1] > 0.0);
    }
}
