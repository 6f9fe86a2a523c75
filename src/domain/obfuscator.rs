//! Reversible ID permutation for generated short codes.
//!
//! Sequential database ids would leak creation order and volume if encoded
//! directly. The [`Obfuscator`] maps them through a multiplicative-inverse
//! permutation over `[0, 2^bits)`:
//!
//! ```text
//! obfuscate(n)   = ((n * prime)   mod 2^bits) XOR random
//! deobfuscate(m) = ((m XOR random) * inverse) mod 2^bits
//! ```
//!
//! Because `prime` is odd and `prime * inverse ≡ 1 (mod 2^bits)`, the
//! mapping is a bijection: distinct ids never collide after obfuscation.

/// Largest supported domain width.
pub const MAX_BITS: u32 = 62;

/// Default domain width, matching 31-bit optimus keys.
pub const DEFAULT_BITS: u32 = 31;

/// Configuration and range errors of the permutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObfuscatorError {
    #[error("Bit width must be between 1 and {MAX_BITS}, got {0}")]
    InvalidBitWidth(u32),

    #[error("Multiplier {0} must be odd and below 2^{1}")]
    InvalidPrime(u64, u32),

    #[error("{inverse} is not the modular inverse of {prime} modulo 2^{bits}")]
    InvalidInverse { prime: u64, inverse: u64, bits: u32 },

    #[error("Random mask {0} must be below 2^{1}")]
    InvalidRandom(u64, u32),

    #[error("Value {0} is outside the obfuscation domain [0, 2^{1})")]
    OutOfRange(u64, u32),
}

/// Multiplicative-inverse permutation over a fixed bit width.
///
/// Construct once at startup; a misconfigured key triple is rejected by
/// [`Obfuscator::new`] so it can never surface at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obfuscator {
    prime: u64,
    inverse: u64,
    random: u64,
    bits: u32,
    mask: u64,
}

impl Obfuscator {
    /// Builds a validated obfuscator.
    ///
    /// # Errors
    ///
    /// Returns an [`ObfuscatorError`] if the bit width is out of range,
    /// the multiplier is even or too large, `inverse` is not its modular
    /// inverse, or `random` does not fit the domain.
    pub fn new(prime: u64, inverse: u64, random: u64, bits: u32) -> Result<Self, ObfuscatorError> {
        let mask = domain_mask(bits)?;

        if prime % 2 == 0 || prime > mask {
            return Err(ObfuscatorError::InvalidPrime(prime, bits));
        }

        if inverse > mask || prime.wrapping_mul(inverse) & mask != 1 {
            return Err(ObfuscatorError::InvalidInverse {
                prime,
                inverse,
                bits,
            });
        }

        if random > mask {
            return Err(ObfuscatorError::InvalidRandom(random, bits));
        }

        Ok(Self {
            prime,
            inverse,
            random,
            bits,
            mask,
        })
    }

    /// Permutes `id` into a non-sequential value of the same domain.
    pub fn obfuscate(&self, id: u64) -> Result<u64, ObfuscatorError> {
        self.check_range(id)?;
        Ok((id.wrapping_mul(self.prime) & self.mask) ^ self.random)
    }

    /// Inverts [`Self::obfuscate`].
    pub fn deobfuscate(&self, value: u64) -> Result<u64, ObfuscatorError> {
        self.check_range(value)?;
        Ok(((value ^ self.random).wrapping_mul(self.inverse)) & self.mask)
    }

    /// Largest value of the domain, `2^bits - 1`.
    pub fn max_value(&self) -> u64 {
        self.mask
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Computes the inverse of an odd `prime` modulo `2^bits`.
    ///
    /// Uses Newton iteration; each step doubles the number of correct low bits.
    pub fn modular_inverse(prime: u64, bits: u32) -> Result<u64, ObfuscatorError> {
        let mask = domain_mask(bits)?;
        if prime % 2 == 0 {
            return Err(ObfuscatorError::InvalidPrime(prime, bits));
        }

        let mut x = prime;
        for _ in 0..5 {
            x = x.wrapping_mul(2u64.wrapping_sub(prime.wrapping_mul(x)));
        }

        Ok(x & mask)
    }

    fn check_range(&self, value: u64) -> Result<(), ObfuscatorError> {
        if value > self.mask {
            return Err(ObfuscatorError::OutOfRange(value, self.bits));
        }
        Ok(())
    }
}

fn domain_mask(bits: u32) -> Result<u64, ObfuscatorError> {
    if bits == 0 || bits > MAX_BITS {
        return Err(ObfuscatorError::InvalidBitWidth(bits));
    }
    Ok((1u64 << bits) - 1)
}

/// Deterministic Miller-Rabin primality test for 64-bit integers.
pub fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if n < 2 {
        return false;
    }
    for &p in &WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in &WITNESSES {
        let mut x = mod_pow(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mod_mul(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

fn mod_mul(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn mod_pow(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mod_mul(result, base, m);
        }
        base = mod_mul(base, base, m);
        exp >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const PRIME: u64 = 1_580_030_173;
    const INVERSE: u64 = 59_260_789;
    const RANDOM: u64 = 1_163_945_558;

    fn optimus() -> Obfuscator {
        Obfuscator::new(PRIME, INVERSE, RANDOM, DEFAULT_BITS).unwrap()
    }

    #[test]
    fn test_known_outputs() {
        let o = optimus();
        assert_eq!(o.obfuscate(1).unwrap(), 458_047_115);
        assert_eq!(o.obfuscate(2).unwrap(), 2_033_899_500);
        assert_eq!(o.obfuscate(3).unwrap(), 1_609_067_713);
    }

    #[test]
    fn test_sequential_ids_are_not_sequential() {
        let o = optimus();
        let a = o.obfuscate(100).unwrap();
        let b = o.obfuscate(101).unwrap();
        assert!(a.abs_diff(b) > 1);
    }

    #[test]
    fn test_deobfuscate_inverts() {
        let o = optimus();
        for id in (0..1_000_000u64).step_by(997).chain([o.max_value()]) {
            let obfuscated = o.obfuscate(id).unwrap();
            assert!(obfuscated <= o.max_value());
            assert_eq!(o.deobfuscate(obfuscated).unwrap(), id);
        }
    }

    #[test]
    fn test_bijection_over_small_domain() {
        let bits = 12;
        let prime = 1_000_003 & ((1 << bits) - 1);
        let inverse = Obfuscator::modular_inverse(prime, bits).unwrap();
        let o = Obfuscator::new(prime, inverse, 0b1010_1100_0011, bits).unwrap();

        let outputs: HashSet<u64> = (0..(1u64 << bits))
            .map(|n| o.obfuscate(n).unwrap())
            .collect();

        assert_eq!(outputs.len(), 1 << bits);
        assert!(outputs.iter().all(|&v| v <= o.max_value()));
    }

    #[test]
    fn test_modular_inverse() {
        assert_eq!(Obfuscator::modular_inverse(PRIME, 31).unwrap(), INVERSE);

        for bits in [1, 8, 31, 32, 48, MAX_BITS] {
            let mask = (1u64 << bits) - 1;
            let prime = 0x1234_5678_9abc_def1 & mask | 1;
            let inverse = Obfuscator::modular_inverse(prime, bits).unwrap();
            assert_eq!(prime.wrapping_mul(inverse) & mask, 1, "bits = {bits}");
        }
    }

    #[test]
    fn test_rejects_even_prime() {
        assert_eq!(
            Obfuscator::new(10, 1, 0, 31),
            Err(ObfuscatorError::InvalidPrime(10, 31))
        );
    }

    #[test]
    fn test_rejects_wrong_inverse() {
        assert!(matches!(
            Obfuscator::new(PRIME, INVERSE + 2, RANDOM, 31),
            Err(ObfuscatorError::InvalidInverse { .. })
        ));
    }

    #[test]
    fn test_rejects_random_outside_domain() {
        assert_eq!(
            Obfuscator::new(PRIME, INVERSE, 1 << 31, 31),
            Err(ObfuscatorError::InvalidRandom(1 << 31, 31))
        );
    }

    #[test]
    fn test_rejects_bit_width() {
        assert_eq!(
            Obfuscator::new(PRIME, INVERSE, RANDOM, 0),
            Err(ObfuscatorError::InvalidBitWidth(0))
        );
        assert_eq!(
            Obfuscator::new(PRIME, INVERSE, RANDOM, 63),
            Err(ObfuscatorError::InvalidBitWidth(63))
        );
    }

    #[test]
    fn test_out_of_range_input() {
        let o = optimus();
        assert_eq!(
            o.obfuscate(1 << 31),
            Err(ObfuscatorError::OutOfRange(1 << 31, 31))
        );
        assert!(o.deobfuscate(u64::MAX).is_err());
    }

    #[test]
    fn test_is_prime() {
        assert!(is_prime(2));
        assert!(is_prime(PRIME));
        assert!(is_prime(2_147_483_647));
        assert!(is_prime(18_446_744_073_709_551_557));
        assert!(!is_prime(1));
        assert!(!is_prime(1_000_001));
        assert!(!is_prime(3_215_031_751));
    }
}
