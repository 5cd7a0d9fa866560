//! # Little-Endian Scalars
//!
//! Every fixed-width value in a table buffer is stored little-endian. The
//! `Scalar` trait gives the builder, the accessor and the verifier one way to
//! size, read and write them.

use std::fmt::Debug;

pub trait Scalar: Copy + PartialEq + Debug {
    const SIZE: usize;

    /// Decodes from the first `SIZE` bytes of `bytes`.
    fn read_le(bytes: &[u8]) -> Self;

    /// Encodes into the first `SIZE` bytes of `out`.
    fn write_le(self, out: &mut [u8]);
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_le_bytes(raw)
                }

                #[inline]
                fn write_le(self, out: &mut [u8]) {
                    out[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl Scalar for bool {
    const SIZE: usize = 1;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn write_le(self, out: &mut [u8]) {
        out[0] = self as u8;
    }
}

/// Reads a scalar at `pos`. Panics if the value runs past the end of `buf`.
#[inline]
pub fn read_scalar<T: Scalar>(buf: &[u8], pos: usize) -> T {
    T::read_le(&buf[pos..pos + T::SIZE])
}

#[inline]
pub fn write_scalar<T: Scalar>(buf: &mut [u8], pos: usize, value: T) {
    value.write_le(&mut buf[pos..pos + T::SIZE]);
}
