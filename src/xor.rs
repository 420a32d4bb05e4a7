/// Truncates to the shorter input.
pub fn xor(message: &[u8], key: &[u8]) -> Vec<u8> {
    message
        .iter()
        .zip(key.iter())
        .map(|(m, k)| m ^ k)
        .collect()
}

/// Xor `message` against `key` repeated cyclically. The result has the
/// length of `message`, or is empty when `key` is empty.
pub fn repeating_xor(message: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return Vec::new();
    }

    message
        .iter()
        .zip(key.iter().cycle())
        .map(|(m, k)| m ^ k)
        .collect()
}

/// Number of differing bits between `a` and `b`. Only the overlapping
/// prefix is compared.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x ^ y).count_ones() as usize)
        .sum()
}
