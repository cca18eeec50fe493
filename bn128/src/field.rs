//! Prime field arithmetic shared by the base field and the scalar field.
//!
//! Elements are kept in Montgomery form as `[u64; 4]` in little-endian limb
//! order. Both BN254 moduli are below 2^254, so a sum of two reduced values
//! never carries out of the top limb and a single conditional subtraction
//! after Montgomery reduction is enough.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::group::ScalarBits;

/// Compile-time description of a prime modulus in Montgomery form.
pub trait FieldParams: 'static + Copy + Send + Sync {
    /// Short label used by `Debug`.
    const NAME: &'static str;
    /// The modulus, little-endian limbs.
    const MODULUS: [u64; 4];
    /// R = 2^256 mod modulus.
    const R: [u64; 4];
    /// R^2 = 2^512 mod modulus.
    const R2: [u64; 4];
    /// -modulus^{-1} mod 2^64.
    const INV: u64;
}

/// An element of the prime field described by `P`.
///
/// Values are always fully reduced, so two elements are equal exactly when
/// their limbs are equal.
pub struct Fp<P: FieldParams> {
    /// Montgomery form: value * R mod modulus
    limbs: [u64; 4],
    params: PhantomData<P>,
}

impl<P: FieldParams> Clone for Fp<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams> Copy for Fp<P> {}

impl<P: FieldParams> PartialEq for Fp<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.limbs == other.limbs
    }
}

impl<P: FieldParams> Eq for Fp<P> {}

impl<P: FieldParams> Hash for Fp<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}

impl<P: FieldParams> Default for Fp<P> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<P: FieldParams> Fp<P> {
    /// Zero element (in Montgomery form)
    pub const ZERO: Self = Self::from_montgomery([0, 0, 0, 0]);

    /// One element (in Montgomery form: R mod modulus)
    pub const ONE: Self = Self::from_montgomery(P::R);

    #[inline]
    const fn from_montgomery(limbs: [u64; 4]) -> Self {
        Fp {
            limbs,
            params: PhantomData,
        }
    }

    /// Create a field element from a small integer.
    #[inline]
    pub fn from_u64(val: u64) -> Self {
        Self::from_limbs_reduced([val, 0, 0, 0])
    }

    /// Create a field element from a signed integer, mapping negative values
    /// to `modulus - |val|`.
    pub fn from_i64(val: i64) -> Self {
        let magnitude = Self::from_u64(val.unsigned_abs());
        if val < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Interpret any 256-bit little-endian value and reduce it.
    ///
    /// The Montgomery product of a value below 2^256 with R^2 stays below
    /// twice the modulus, so this is exact for every input.
    #[inline]
    pub fn from_limbs_reduced(limbs: [u64; 4]) -> Self {
        montgomery_mul::<P>(limbs, P::R2)
    }

    /// Create a field element from canonical limbs, rejecting values that
    /// are not below the modulus.
    pub fn from_canonical_limbs(limbs: [u64; 4]) -> Option<Self> {
        if is_canonical(limbs, P::MODULUS) {
            Some(Self::from_limbs_reduced(limbs))
        } else {
            None
        }
    }

    /// Canonical (non-Montgomery) limbs in little-endian order.
    #[inline]
    pub fn to_canonical_limbs(&self) -> [u64; 4] {
        montgomery_mul::<P>(self.limbs, [1, 0, 0, 0]).limbs
    }

    /// Parse a 32-byte big-endian word, rejecting non-canonical values.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::from_canonical_limbs(limbs_from_be_bytes(bytes))
    }

    /// Parse a 32-byte big-endian word and reduce it modulo the modulus.
    pub fn from_be_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Self::from_limbs_reduced(limbs_from_be_bytes(bytes))
    }

    /// 32-byte big-endian encoding of the canonical value.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let canonical = self.to_canonical_limbs();
        let mut out = [0u8; 32];
        for (chunk, limb) in out.chunks_exact_mut(8).zip(canonical.iter().rev()) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Parse a big-endian hex string of at most 64 digits, with or without
    /// a `0x` prefix. Returns `None` for malformed or non-canonical input.
    pub fn from_be_hex(input: &str) -> Option<Self> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        if digits.is_empty() || digits.len() > 64 {
            return None;
        }
        let padded = format!("{digits:0>64}");
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(padded, &mut bytes).ok()?;
        Self::from_be_bytes(&bytes)
    }

    /// The modulus as a big integer.
    pub fn modulus() -> BigUint {
        limbs_to_biguint(P::MODULUS)
    }

    /// The canonical value as a big integer.
    pub fn to_biguint(&self) -> BigUint {
        limbs_to_biguint(self.to_canonical_limbs())
    }

    /// Reduce an arbitrary big integer into the field.
    pub fn from_biguint(value: &BigUint) -> Self {
        let reduced = value % Self::modulus();
        let mut limbs = [0u64; 4];
        for (slot, digit) in limbs.iter_mut().zip(reduced.iter_u64_digits()) {
            *slot = digit;
        }
        Self::from_limbs_reduced(limbs)
    }

    /// Check if this field element is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0, 0, 0, 0]
    }

    /// Parity of the canonical value.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.to_canonical_limbs()[0] & 1 == 1
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Variable-time exponentiation by a 256-bit little-endian exponent.
    pub fn pow_vartime(&self, exp: [u64; 4]) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;

        for &limb in exp.iter() {
            let mut remaining = limb;
            for _ in 0..64 {
                if remaining & 1 == 1 {
                    result *= base;
                }
                base = base.square();
                remaining >>= 1;
            }
        }

        result
    }

    /// Multiplicative inverse via Fermat's little theorem, `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let (exp, _) = sub_limbs(P::MODULUS, [2, 0, 0, 0]);
        Some(self.pow_vartime(exp))
    }
}

impl<P: FieldParams> ScalarBits for Fp<P> {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.to_canonical_limbs()
    }
}

fn limbs_from_be_bytes(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().rev().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

fn limbs_to_biguint(limbs: [u64; 4]) -> BigUint {
    let mut bytes = Vec::with_capacity(32);
    for &limb in &limbs {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

/// Helper: Carrying addition
#[inline]
const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

/// Helper: Borrowing subtraction
#[inline]
const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// Plain 256-bit subtraction, returning the final borrow.
#[inline]
const fn sub_limbs(a: [u64; 4], b: [u64; 4]) -> ([u64; 4], bool) {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// Plain 256-bit addition, returning the final carry.
#[inline]
const fn add_limbs(a: [u64; 4], b: [u64; 4]) -> ([u64; 4], bool) {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);
    ([r0, r1, r2, r3], carry)
}

#[inline]
const fn is_canonical(limbs: [u64; 4], modulus: [u64; 4]) -> bool {
    let (_, borrow) = sub_limbs(limbs, modulus);
    borrow
}

/// Add two reduced values mod `modulus`
#[inline]
const fn add_mod(a: [u64; 4], b: [u64; 4], modulus: [u64; 4]) -> [u64; 4] {
    let (sum, _) = add_limbs(a, b);
    let (reduced, borrow) = sub_limbs(sum, modulus);
    if borrow {
        sum
    } else {
        reduced
    }
}

/// Subtract two reduced values mod `modulus`
#[inline]
const fn sub_mod(a: [u64; 4], b: [u64; 4], modulus: [u64; 4]) -> [u64; 4] {
    let (diff, borrow) = sub_limbs(a, b);
    if borrow {
        add_limbs(diff, modulus).0
    } else {
        diff
    }
}

/// Montgomery multiplication: (a * b * R^{-1}) mod modulus
///
/// `a` may be any value below 2^256 as long as `b` is reduced.
#[inline]
fn montgomery_mul<P: FieldParams>(a: [u64; 4], b: [u64; 4]) -> Fp<P> {
    // Compute a * b
    let mut t = [0u64; 8];

    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    // Montgomery reduction
    for i in 0..4 {
        let k = t[i].wrapping_mul(P::INV);
        let mut carry = 0u128;

        for j in 0..4 {
            let product = (k as u128) * (P::MODULUS[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        for slot in t.iter_mut().skip(i + 4) {
            let sum = (*slot as u128) + carry;
            *slot = sum as u64;
            carry = sum >> 64;
        }
    }

    // Extract high half and conditionally subtract the modulus
    let result = [t[4], t[5], t[6], t[7]];
    let (reduced, borrow) = sub_limbs(result, P::MODULUS);
    if borrow {
        Fp::from_montgomery(result)
    } else {
        Fp::from_montgomery(reduced)
    }
}

impl<P: FieldParams> Distribution<Fp<P>> for StandardUniform {
    /// Rejection sampling over 254-bit candidates.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp<P> {
        loop {
            let mut bytes: [u8; 32] = rng.random();
            bytes[0] &= 0x3f;

            if let Some(value) = Fp::from_be_bytes(&bytes) {
                return value;
            }
        }
    }
}

// Arithmetic operations
impl<P: FieldParams> Add for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Fp::from_montgomery(add_mod(self.limbs, rhs.limbs, P::MODULUS))
    }
}

impl<P: FieldParams> AddAssign for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: FieldParams> Sub for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Fp::from_montgomery(sub_mod(self.limbs, rhs.limbs, P::MODULUS))
    }
}

impl<P: FieldParams> SubAssign for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: FieldParams> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl<P: FieldParams> Mul for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        montgomery_mul::<P>(self.limbs, rhs.limbs)
    }
}

impl<P: FieldParams> MulAssign for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: FieldParams> Sum for Fp<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<P: FieldParams> Product for Fp<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

// Display and Debug
impl<P: FieldParams> Display for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl<P: FieldParams> Debug for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", P::NAME, self)
    }
}

// Hex strings for human-readable formats, raw big-endian words otherwise.
impl<P: FieldParams> Serialize for Fp<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            self.to_be_bytes().serialize(serializer)
        }
    }
}

impl<'de, P: FieldParams> Deserialize<'de> for Fp<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            Fp::from_be_hex(&text)
                .ok_or_else(|| D::Error::custom(format!("invalid {} element", P::NAME)))
        } else {
            let bytes = <[u8; 32]>::deserialize(deserializer)?;
            Fp::from_be_bytes(&bytes)
                .ok_or_else(|| D::Error::custom(format!("non-canonical {} element", P::NAME)))
        }
    }
}
