use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random identifier drawn uniformly from `[A-Za-z0-9]`. Collisions are
/// harmless, the id only correlates log lines.
pub fn request_id<R: Rng>(length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::request_id;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn ids_have_the_requested_length() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(request_id(10, &mut rng).len(), 10);
        assert_eq!(request_id(0, &mut rng).len(), 0);
    }

    #[test]
    fn ids_stay_inside_the_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let id = request_id(10, &mut rng);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()), "{id}");
        }
    }

    #[test]
    fn a_seeded_source_is_deterministic() {
        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);
        assert_eq!(request_id(10, &mut first), request_id(10, &mut second));
    }
}
