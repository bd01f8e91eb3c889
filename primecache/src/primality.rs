//! Trial-division primality test.
//!
//! The divisor bound comes from [`integer_sqrt`] rather than a truncated
//! floating point root, so the test stays exact for every `i64`.

/// Largest `r` such that `r * r <= n`.
///
/// A floating point estimate seeds the search and is then corrected in
/// either direction until the bound is exact.
pub fn integer_sqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }

    // f64 has 53 bits of mantissa, so the estimate can be off by a few units
    // near u64::MAX. Clamp so r + 1 never overflows when squared.
    let mut r = ((n as f64).sqrt() as u64).min(u32::MAX as u64);

    while r * r > n {
        r -= 1;
    }
    while r < u32::MAX as u64 && (r + 1) * (r + 1) <= n {
        r += 1;
    }

    r
}

/// Returns `true` if and only if `n` is prime.
///
/// 2 is handled explicitly, everything below 2 and every other even number is
/// rejected, and odd `n` is divided by each odd number from 3 up to and
/// including `floor(sqrt(n))`.
pub fn is_prime(n: i64) -> bool {
    if n == 2 {
        return true;
    }

    if n < 2 || n % 2 == 0 {
        return false;
    }

    let limit = integer_sqrt(n as u64) as i64;
    let mut divisor = 3;
    while divisor <= limit {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Divides by every integer in [2, n - 1].
    fn brute_force_is_prime(n: i64) -> bool {
        n >= 2 && (2..n).all(|d| n % d != 0)
    }

    #[test]
    fn test_two_is_prime() {
        assert!(is_prime(2));
    }

    #[test]
    fn test_small_non_primes() {
        assert!(!is_prime(1));
        assert!(!is_prime(0));
        assert!(!is_prime(-5));
        assert!(!is_prime(i64::MIN));
    }

    #[test]
    fn test_known_values() {
        assert!(is_prime(3));
        assert!(is_prime(10007));
        assert!(is_prime(9973));
        // 73 * 137
        assert!(!is_prime(10001));
        // 7 * 2857
        assert!(!is_prime(19999));
    }

    #[test]
    fn test_perfect_squares_of_primes_are_rejected() {
        for p in [3i64, 5, 7, 11, 101, 9973] {
            assert!(!is_prime(p * p), "{} should be composite", p * p);
        }
    }

    #[test]
    fn test_odd_numbers_match_brute_force() {
        for n in (3..=19999i64).step_by(2) {
            assert_eq!(
                is_prime(n),
                brute_force_is_prime(n),
                "mismatch for {}",
                n
            );
        }
    }

    #[test]
    fn test_mersenne_prime_2_31() {
        // Largest prime below 2^31.
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(2_147_483_649));
    }

    #[test]
    fn test_integer_sqrt_edges() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(3), 1);
        assert_eq!(integer_sqrt(4), 2);
        assert_eq!(integer_sqrt(19999), 141);
        assert_eq!(integer_sqrt(u64::MAX), u32::MAX as u64);
        // (2^32 - 1)^2 and one below it
        let sq = (u32::MAX as u64) * (u32::MAX as u64);
        assert_eq!(integer_sqrt(sq), u32::MAX as u64);
        assert_eq!(integer_sqrt(sq - 1), u32::MAX as u64 - 1);
    }

    proptest! {
        #[test]
        fn prop_even_numbers_above_two_are_not_prime(half in 2i64..i64::MAX / 2) {
            prop_assert!(!is_prime(half * 2));
        }

        #[test]
        fn prop_integer_sqrt_bounds(n in any::<u64>()) {
            let r = integer_sqrt(n) as u128;
            let n = n as u128;
            prop_assert!(r * r <= n);
            prop_assert!((r + 1) * (r + 1) > n);
        }
    }
}
