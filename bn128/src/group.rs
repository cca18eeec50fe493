use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Access to the canonical bits of a scalar, little-endian limbs.
pub trait ScalarBits {
    fn to_u64_limbs(&self) -> [u64; 4];
}

/// Prime-order group operations shared by the point representations.
///
/// The default scalar multiplications are variable time. That is acceptable
/// here: every scalar they see is either public or a one-shot blinding value.
pub trait Group:
    Sized + Copy + Add<Output = Self> + AddAssign + Sub<Output = Self> + SubAssign + Neg<Output = Self>
{
    type Scalar: ScalarBits;

    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn generator() -> Self;
    fn double(&self) -> Self;

    #[inline]
    fn negate(&self) -> Self {
        -*self
    }

    /// Double-and-add, least significant bit first.
    fn scalar_mul(&self, scalar: &Self::Scalar) -> Self {
        let scalar_limbs = scalar.to_u64_limbs();
        let mut result = Self::identity();
        let mut temp = *self;

        for &limb in scalar_limbs.iter() {
            let mut bits = limb;
            for _ in 0..64 {
                if bits & 1 == 1 {
                    result += temp;
                }
                temp = temp.double();
                bits >>= 1;
            }
        }

        result
    }

    /// Fixed 4-bit window, most significant window first.
    fn scalar_mul_windowed(&self, scalar: &Self::Scalar) -> Self {
        if self.is_identity() {
            return Self::identity();
        }

        let mut table = [Self::identity(); 16];
        table[1] = *self;

        for i in 2..16 {
            table[i] = if i % 2 == 0 {
                table[i / 2].double()
            } else {
                table[i - 1] + table[1]
            };
        }

        let scalar_limbs = scalar.to_u64_limbs();
        let mut result = Self::identity();

        for &limb in scalar_limbs.iter().rev() {
            for shift in (0..64).step_by(4).rev() {
                for _ in 0..4 {
                    result = result.double();
                }

                let window = ((limb >> shift) & 0xF) as usize;
                if window != 0 {
                    result += table[window];
                }
            }
        }

        result
    }

    fn mul_u64(&self, n: u64) -> Self {
        let mut result = Self::identity();
        let mut temp = *self;
        let mut bits = n;

        while bits > 0 {
            if bits & 1 == 1 {
                result += temp;
            }
            temp = temp.double();
            bits >>= 1;
        }

        result
    }
}
