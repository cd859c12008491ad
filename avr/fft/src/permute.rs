//! Bit-reversal permutation

use crate::{FftError, FftResult};

/// Reorder `data` so element `i` moves to the index with `i`'s bits reversed.
///
/// The length must be a power of two. Applying the permutation twice
/// restores the original order.
pub fn bit_reverse_permute<T>(data: &mut [T]) -> FftResult<()> {
    let n = data.len();
    if !n.is_power_of_two() {
        return Err(FftError::NotPowerOfTwo(n));
    }
    if n <= 2 {
        return Ok(());
    }

    let shift = usize::BITS - n.trailing_zeros();
    for i in 1..n - 1 {
        let j = i.reverse_bits() >> shift;
        if j > i {
            data.swap(i, j);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_points() {
        let mut data = [0, 1, 2, 3, 4, 5, 6, 7];
        bit_reverse_permute(&mut data).unwrap();
        assert_eq!(data, [0, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn test_involution() {
        let original: Vec<u16> = (0..256).collect();
        let mut data = original.clone();
        bit_reverse_permute(&mut data).unwrap();
        assert_ne!(data, original);
        bit_reverse_permute(&mut data).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn test_trivial_and_invalid_lengths() {
        let mut one = [9];
        bit_reverse_permute(&mut one).unwrap();
        assert_eq!(one, [9]);

        let mut two = [1, 2];
        bit_reverse_permute(&mut two).unwrap();
        assert_eq!(two, [1, 2]);

        let mut empty: [u8; 0] = [];
        assert_eq!(bit_reverse_permute(&mut empty), Err(FftError::NotPowerOfTwo(0)));

        let mut six = [0u8; 6];
        assert_eq!(bit_reverse_permute(&mut six), Err(FftError::NotPowerOfTwo(6)));
    }
}
