use super::Move;

/// Compares generated moves with the expected algebraic moves, ignoring order.
pub fn assert_moves(generated: impl IntoIterator<Item = Move>, expected: &[&str]) {
    let mut actual: Vec<String> = generated.into_iter().map(|m| m.as_algebraic()).collect();
    let mut wanted: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    actual.sort();
    wanted.sort();
    assert_eq!(actual, wanted, "generated moves differ");
}
