use beowulf_primitives::{AccountName, PublicKey};

/// Compressed secp256k1 generator point G and its multiples 2G and 3G.
pub const KEYS: [&str; 3] = [
  "BEO5p78kHbL33Rn3JWkTWRE2B9uz6gy4r1KbfAKLNQGE3ovMBS5bu",
  "BEO6PhSs6H49U1Lb6vz9GDtUF9RjtpFpkS6Rxm94LumQrnD1YqfSG",
  "BEO6nEZsuNhDnknxVTf1YH454nxiB5MpVSN7gQktMRioqRiAXfJpk",
];

pub fn name(s: &str) -> AccountName {
  s.parse().unwrap()
}

pub fn key(index: usize) -> PublicKey {
  KEYS[index].parse().unwrap()
}

/// All orderings of `items`, used to check that insertion order never
/// leaks into equality, hashing or encoding.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
  if items.len() <= 1 {
    return vec![items.to_vec()];
  }
  let mut output = vec![];
  for i in 0..items.len() {
    let mut rest = items.to_vec();
    let head = rest.remove(i);
    for mut tail in permutations(&rest) {
      tail.insert(0, head.clone());
      output.push(tail);
    }
  }
  output
}
