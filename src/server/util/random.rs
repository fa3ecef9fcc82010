use rand::Rng;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                              abcdefghijklmnopqrstuvwxyz\
                              0123456789";

/// Generates a random alphanumeric string of `len` characters.
///
/// Uses the thread-local CSPRNG, so the result is suitable for secrets such as refresh
/// tokens and one-time admin codes.
pub fn random_alphanumeric(len: usize) -> String {
    let mut rng = rand::rng();

    (0..len)
        .map(|_| ALPHANUMERIC[rng.random_range(0..ALPHANUMERIC.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        let value = random_alphanumeric(64);

        assert_eq!(value.len(), 64);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn values_differ() {
        assert_ne!(random_alphanumeric(32), random_alphanumeric(32));
    }
}
