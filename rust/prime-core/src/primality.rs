//! Single-number primality tests, packaged as interchangeable strategies.
//!
//! A [`Scanner`](crate::scan::Scanner) or checker receives one of these at
//! construction time instead of consulting a global "fast library available"
//! switch.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;

/// Witnesses that make Miller-Rabin deterministic for every `u64`.
const U64_WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// A primality test usable by the scan pipeline.
pub trait PrimalityTest {
    /// Short name for reports.
    fn name(&self) -> &'static str;

    /// Whether a `true` answer for `n` is a proof rather than a probable prime.
    fn is_exact_for(&self, n: &BigUint) -> bool;

    fn is_prime(&self, n: &BigUint) -> bool;

    fn is_prime_u64(&self, n: u64) -> bool {
        self.is_prime(&BigUint::from(n))
    }
}

impl<T: PrimalityTest + ?Sized> PrimalityTest for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_exact_for(&self, n: &BigUint) -> bool {
        (**self).is_exact_for(n)
    }

    fn is_prime(&self, n: &BigUint) -> bool {
        (**self).is_prime(n)
    }

    fn is_prime_u64(&self, n: u64) -> bool {
        (**self).is_prime_u64(n)
    }
}

impl<T: PrimalityTest + ?Sized> PrimalityTest for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_exact_for(&self, n: &BigUint) -> bool {
        (**self).is_exact_for(n)
    }

    fn is_prime(&self, n: &BigUint) -> bool {
        (**self).is_prime(n)
    }

    fn is_prime_u64(&self, n: u64) -> bool {
        (**self).is_prime_u64(n)
    }
}

/// Exact trial division by odd candidates up to `⌊√n⌋`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialDivision;

impl PrimalityTest for TrialDivision {
    fn name(&self) -> &'static str {
        "trial-division"
    }

    fn is_exact_for(&self, _n: &BigUint) -> bool {
        true
    }

    fn is_prime(&self, n: &BigUint) -> bool {
        match n.to_u64() {
            Some(small) => trial_division_is_prime(small),
            None => trial_division_is_prime_big(n),
        }
    }

    fn is_prime_u64(&self, n: u64) -> bool {
        trial_division_is_prime(n)
    }
}

/// Strong probable-prime test with random witnesses.
///
/// Never reports a prime as composite. For inputs that fit in a `u64` the
/// fixed witness set makes the answer exact.
#[derive(Debug, Clone, Copy)]
pub struct MillerRabin {
    pub rounds: u32,
}

impl Default for MillerRabin {
    fn default() -> Self {
        Self { rounds: 20 }
    }
}

impl PrimalityTest for MillerRabin {
    fn name(&self) -> &'static str {
        "miller-rabin"
    }

    fn is_exact_for(&self, n: &BigUint) -> bool {
        n.bits() <= 64
    }

    fn is_prime(&self, n: &BigUint) -> bool {
        match n.to_u64() {
            Some(small) => is_prime_u64(small),
            None => is_probably_prime(n, self.rounds),
        }
    }

    fn is_prime_u64(&self, n: u64) -> bool {
        is_prime_u64(n)
    }
}

/// Trial division up to `trial_limit`, Miller-Rabin above it.
///
/// The default limit matches [`DEFAULT_TABLE_LIMIT`](crate::DEFAULT_TABLE_LIMIT):
/// past it trial division costs far more than the deterministic `u64` test,
/// which is just as exact.
#[derive(Debug, Clone, Copy)]
pub struct Adaptive {
    pub trial_limit: u64,
    pub rounds: u32,
}

impl Default for Adaptive {
    fn default() -> Self {
        Self {
            trial_limit: crate::DEFAULT_TABLE_LIMIT,
            rounds: 20,
        }
    }
}

impl PrimalityTest for Adaptive {
    fn name(&self) -> &'static str {
        "adaptive"
    }

    fn is_exact_for(&self, n: &BigUint) -> bool {
        n.bits() <= 64
    }

    fn is_prime(&self, n: &BigUint) -> bool {
        match n.to_u64() {
            Some(small) => self.is_prime_u64(small),
            None => is_probably_prime(n, self.rounds),
        }
    }

    fn is_prime_u64(&self, n: u64) -> bool {
        if n <= self.trial_limit {
            trial_division_is_prime(n)
        } else {
            is_prime_u64(n)
        }
    }
}

/// Trial division over odd divisors. Exact for every `u64`.
pub fn trial_division_is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor = 3u64;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

fn trial_division_is_prime_big(n: &BigUint) -> bool {
    if n.is_even() {
        return false;
    }
    let mut divisor = BigUint::from(3u32);
    while &divisor * &divisor <= *n {
        if (n % &divisor).is_zero() {
            return false;
        }
        divisor += 2u32;
    }
    true
}

/// Deterministic Miller-Rabin for `u64` using the first twelve primes as witnesses.
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // Write n-1 = 2^s * d
    let mut d = n - 1;
    let mut s = 0u32;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'outer: for &a in &U64_WITNESSES {
        if a % n == 0 {
            continue;
        }
        let mut x = mod_pow_u64(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 0..s - 1 {
            x = (x as u128 * x as u128 % n as u128) as u64;
            if x == n - 1 {
                continue 'outer;
            }
        }
        return false;
    }
    true
}

/// Strong probable-prime test for integers past `u64`, with `rounds` witnesses
/// drawn uniformly from `[2, n - 2]`.
///
/// This is the path [`MillerRabin`] and [`Adaptive`] take once `n` no longer
/// fits in a `u64`. Smaller inputs go to the deterministic [`is_prime_u64`].
pub fn is_probably_prime(n: &BigUint, rounds: u32) -> bool {
    if let Some(small) = n.to_u64() {
        return is_prime_u64(small);
    }
    if n.is_even() {
        return false;
    }

    let n_minus_1 = n - 1u32;
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    let mut rng = rand::thread_rng();
    (0..rounds).all(|_| {
        let witness = random_witness(n, &mut rng);
        is_strong_probable_prime(n, &n_minus_1, &d, s, &witness)
    })
}

/// One Miller-Rabin round for `n - 1 = 2^s * d` and witness `a`.
fn is_strong_probable_prime(
    n: &BigUint,
    n_minus_1: &BigUint,
    d: &BigUint,
    s: u64,
    a: &BigUint,
) -> bool {
    let mut x = a.modpow(d, n);
    if x.is_one() || x == *n_minus_1 {
        return true;
    }
    for _ in 1..s {
        x = &x * &x % n;
        if x == *n_minus_1 {
            return true;
        }
        if x.is_one() {
            return false;
        }
    }
    false
}

/// Uniform witness in `[2, n - 2]`, by rejection over `bits(n - 4)` random bits.
fn random_witness(n: &BigUint, rng: &mut impl Rng) -> BigUint {
    let span = n - 4u32;
    loop {
        let offset = random_bits(span.bits(), rng);
        if offset <= span {
            return offset + 2u32;
        }
    }
}

/// Uniform integer in `[0, 2^bits)`.
fn random_bits(bits: u64, rng: &mut impl Rng) -> BigUint {
    let len = ((bits + 7) / 8) as usize;
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes[..]);
    if let Some(top) = bytes.last_mut() {
        *top &= 0xffu8 >> (len as u64 * 8 - bits);
    }
    BigUint::from_bytes_le(&bytes)
}

/// Modular exponentiation in `u64` with `u128` intermediates.
pub fn mod_pow_u64(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result = 1u128;
    let mut b = base as u128 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        exp >>= 1;
    }
    result as u64
}

/// A random prime of exactly `bits` bits, used for benchmark and test inputs.
///
/// Draws odd `bits`-bit integers until one passes 20 rounds of
/// [`is_probably_prime`]; up to 64 bits the answer is exact.
pub fn random_prime(bits: u32, rng: &mut impl Rng) -> BigUint {
    assert!(bits >= 2, "Cannot generate a prime with fewer than 2 bits");
    let top = BigUint::one() << (bits - 1);
    loop {
        let candidate = random_bits(u64::from(bits - 1), rng) | &top | BigUint::one();
        if is_probably_prime(&candidate, 20) {
            return candidate;
        }
    }
}

/// A uniformly random integer with exactly `digits` decimal digits.
pub fn random_with_digits(digits: u32, rng: &mut impl Rng) -> BigUint {
    assert!(digits >= 1, "A number needs at least one digit");
    let mut text = String::with_capacity(digits as usize);
    text.push(char::from(b'0' + rng.gen_range(1..=9u8)));
    for _ in 1..digits {
        text.push(char::from(b'0' + rng.gen_range(0..=9u8)));
    }
    // Built from ASCII digits only, so parsing cannot fail.
    BigUint::parse_bytes(text.as_bytes(), 10).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SMALL_PRIMES: [u64; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

    #[test]
    fn test_trial_division_small() {
        let primes: Vec<u64> = (0..30).filter(|&n| trial_division_is_prime(n)).collect();
        assert_eq!(primes, SMALL_PRIMES);
    }

    #[test]
    fn test_trial_division_perfect_squares() {
        // The loop bound must include ⌊√n⌋ itself.
        for p in [3u64, 5, 7, 97, 65_521] {
            assert!(!trial_division_is_prime(p * p), "{}^2 reported prime", p);
        }
    }

    #[test]
    fn test_deterministic_u64_agrees_with_trial_division() {
        for n in 0..20_000u64 {
            assert_eq!(is_prime_u64(n), trial_division_is_prime(n), "n = {}", n);
        }
    }

    #[test]
    fn test_u64_strong_pseudoprimes() {
        // Strong pseudoprimes to several small bases.
        for n in [2_047u64, 1_373_653, 25_326_001, 3_215_031_751, 2_152_302_898_747] {
            assert!(!is_prime_u64(n), "{} is composite", n);
        }
        assert!(is_prime_u64(18_446_744_073_709_551_557)); // largest u64 prime
        assert!(!is_prime_u64(u64::MAX));
    }

    #[test]
    fn test_miller_rabin_big() {
        // 2^89 - 1 and 2^127 - 1 are Mersenne primes; 2^67 - 1 is not.
        let m89 = (BigUint::one() << 89u32) - 1u32;
        let m127 = (BigUint::one() << 127u32) - 1u32;
        let m67 = (BigUint::one() << 67u32) - 1u32;
        let mr = MillerRabin::default();
        assert!(mr.is_prime(&m89));
        assert!(mr.is_prime(&m127));
        assert!(!mr.is_prime(&m67));
        assert!(!mr.is_exact_for(&m89));
    }

    #[test]
    fn test_miller_rabin_never_rejects_random_primes() {
        let mut rng = StdRng::seed_from_u64(69);
        for bits in [16u32, 33, 64, 96] {
            let p = random_prime(bits, &mut rng);
            assert_eq!(p.bits(), bits as u64);
            assert!(MillerRabin::default().is_prime(&p));
            assert!(Adaptive::default().is_prime(&p));
        }
    }

    #[test]
    fn test_strategies_agree_on_u64() {
        let strategies: Vec<Box<dyn PrimalityTest>> = vec![
            Box::new(TrialDivision),
            Box::new(MillerRabin::default()),
            Box::new(Adaptive {
                trial_limit: 500,
                rounds: 8,
            }),
        ];
        for n in 0..2_000u64 {
            let expected = trial_division_is_prime(n);
            for strategy in &strategies {
                assert_eq!(strategy.is_prime_u64(n), expected, "{} on {}", strategy.name(), n);
                assert_eq!(strategy.is_prime(&BigUint::from(n)), expected);
            }
        }
    }

    #[test]
    fn test_adaptive_default_limit_stays_exact() {
        let adaptive = Adaptive::default();
        assert_eq!(adaptive.trial_limit, crate::DEFAULT_TABLE_LIMIT);
        // Around the switch from trial division to the u64 witnesses.
        let limit = adaptive.trial_limit;
        for n in limit - 500..limit + 500 {
            assert_eq!(adaptive.is_prime_u64(n), trial_division_is_prime(n), "n = {}", n);
        }
        assert!(adaptive.is_prime_u64(1_000_000_000_039));
        assert!(!adaptive.is_prime_u64(2_152_302_898_747));
    }

    #[test]
    fn test_random_bits_and_witness_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_bits(0, &mut rng), BigUint::zero());
        for _ in 0..200 {
            assert!(random_bits(13, &mut rng).bits() <= 13);
        }
        let n = (BigUint::one() << 70u32) + 25u32;
        for _ in 0..200 {
            let a = random_witness(&n, &mut rng);
            assert!(a >= BigUint::from(2u32) && a <= &n - 2u32);
        }
    }

    #[test]
    fn test_trial_division_big_input() {
        // 2^61 - 1 is prime but too slow for BigUint trial division; use a
        // composite just past u64 with a small factor instead.
        let n = (BigUint::one() << 64u32) + 1u32; // 274177 * 67280421310721
        assert!(!TrialDivision.is_prime(&n));
    }

    #[test]
    fn test_mod_pow_u64() {
        assert_eq!(mod_pow_u64(2, 10, 1_000), 24);
        assert_eq!(mod_pow_u64(7, 0, 13), 1);
        assert_eq!(mod_pow_u64(5, 3, 1), 0);
    }

    #[test]
    fn test_random_with_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for digits in [1u32, 2, 10, 50] {
            let n = random_with_digits(digits, &mut rng);
            assert_eq!(n.to_string().len(), digits as usize);
        }
    }
}
