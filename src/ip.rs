//! IP Assignment
//!
//! Synthetic dotted-quad addresses: four independent uniform octet draws.
//! No uniqueness is enforced anywhere; the address space is large but
//! finite and collisions across users or attackers are acceptable.

use rand::Rng;
use rand::rngs::StdRng;

/// One random IPv4-like address.
pub fn random_ip(rng: &mut StdRng) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.random_range(0..=255),
        rng.random_range(0..=255),
        rng.random_range(0..=255),
        rng.random_range(0..=255)
    )
}

/// 1-3 addresses for one user, assigned once during userbase setup.
pub fn assign(rng: &mut StdRng) -> Vec<String> {
    let count = rng.random_range(1..=3);
    (0..count).map(|_| random_ip(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_random_ip_is_dotted_quad() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let ip = random_ip(&mut rng);
            let octets: Vec<&str> = ip.split('.').collect();
            assert_eq!(octets.len(), 4, "bad address: {}", ip);
            for octet in octets {
                let value: u32 = octet.parse().expect("octet not numeric");
                assert!(value <= 255);
            }
        }
    }

    #[test]
    fn test_assign_gives_one_to_three() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let ips = assign(&mut rng);
            assert!((1..=3).contains(&ips.len()));
        }
    }
}
