use num_traits::AsPrimitive;

use super::{Complex32, Complex64, Element, Scalar};

/// The table of registered element conversions.
///
/// `Src: ElementCast<Dst>` means a value of `Src` can be stored into an array
/// of `Dst`. Real numeric conversions follow [`num_traits::AsPrimitive`]
/// (`as`-cast semantics: float to int truncates toward zero and saturates,
/// integer narrowing wraps). Conversions that lose the imaginary part are
/// deliberately **not** registered; storing a complex source into a real
/// array fails at the dispatch layer instead.
pub trait ElementCast<T: Element>: Element {
    fn cast_elem(self) -> T;
}

macro_rules! cast_real {
    ($($src:ty),*) => {$(
        cast_real!(@dst $src => u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
    )*};
    (@dst $src:ty => $($dst:ty),*) => {$(
        impl ElementCast<$dst> for $src {
            #[inline]
            fn cast_elem(self) -> $dst {
                self.as_()
            }
        }
    )*};
}

cast_real!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

macro_rules! cast_bool_to {
    ($($dst:ty),*) => {$(
        impl ElementCast<$dst> for bool {
            #[inline]
            fn cast_elem(self) -> $dst {
                if self { <$dst as Element>::ONE } else { <$dst as Element>::ZERO }
            }
        }
    )*};
}

cast_bool_to!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, Complex32, Complex64);

macro_rules! cast_to_bool {
    ($($src:ty),*) => {$(
        impl ElementCast<bool> for $src {
            #[inline]
            fn cast_elem(self) -> bool {
                self != <$src as Element>::ZERO
            }
        }
    )*};
}

cast_to_bool!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl ElementCast<bool> for bool {
    #[inline]
    fn cast_elem(self) -> bool {
        self
    }
}

macro_rules! cast_real_to_complex {
    ($(($src:ty, $dst:ty, $f:ty)),* $(,)?) => {$(
        impl ElementCast<$dst> for $src {
            #[inline]
            fn cast_elem(self) -> $dst {
                <$dst>::new(self.as_(), <$f as Element>::ZERO)
            }
        }
    )*};
}

cast_real_to_complex!(
    (u8, Complex32, f32),
    (u16, Complex32, f32),
    (u32, Complex32, f32),
    (u64, Complex32, f32),
    (i8, Complex32, f32),
    (i16, Complex32, f32),
    (i32, Complex32, f32),
    (i64, Complex32, f32),
    (f32, Complex32, f32),
    (f64, Complex32, f32),
    (u8, Complex64, f64),
    (u16, Complex64, f64),
    (u32, Complex64, f64),
    (u64, Complex64, f64),
    (i8, Complex64, f64),
    (i16, Complex64, f64),
    (i32, Complex64, f64),
    (i64, Complex64, f64),
    (f32, Complex64, f64),
    (f64, Complex64, f64),
);

impl ElementCast<Complex32> for Complex32 {
    #[inline]
    fn cast_elem(self) -> Complex32 {
        self
    }
}

impl ElementCast<Complex64> for Complex64 {
    #[inline]
    fn cast_elem(self) -> Complex64 {
        self
    }
}

impl ElementCast<Complex64> for Complex32 {
    #[inline]
    fn cast_elem(self) -> Complex64 {
        Complex64::new(self.re as f64, self.im as f64)
    }
}

impl ElementCast<Complex32> for Complex64 {
    #[inline]
    fn cast_elem(self) -> Complex32 {
        Complex32::new(self.re as f32, self.im as f32)
    }
}

macro_rules! cast_to_object {
    ($($src:ty),*) => {$(
        impl ElementCast<Scalar> for $src {
            #[inline]
            fn cast_elem(self) -> Scalar {
                self.to_scalar()
            }
        }
    )*};
}

cast_to_object!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, Complex32, Complex64, Scalar);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_casts() {
        assert_eq!(<f64 as ElementCast<i32>>::cast_elem(2.9), 2);
        assert_eq!(<f64 as ElementCast<i32>>::cast_elem(-2.9), -2);
        assert_eq!(<i32 as ElementCast<u8>>::cast_elem(300), 44);
        assert_eq!(<u8 as ElementCast<f32>>::cast_elem(7), 7.0);
        // as-cast saturation for out of range floats
        assert_eq!(<f64 as ElementCast<u8>>::cast_elem(1e9), 255);
        assert_eq!(<f64 as ElementCast<u8>>::cast_elem(-1.0), 0);
    }

    #[test]
    fn test_bool_casts() {
        assert_eq!(<bool as ElementCast<i64>>::cast_elem(true), 1);
        assert_eq!(<bool as ElementCast<f32>>::cast_elem(false), 0.0);
        assert_eq!(<f64 as ElementCast<bool>>::cast_elem(0.0), false);
        assert_eq!(<i8 as ElementCast<bool>>::cast_elem(-1), true);
    }

    #[test]
    fn test_complex_casts() {
        assert_eq!(
            <i32 as ElementCast<Complex64>>::cast_elem(3),
            Complex64::new(3.0, 0.0)
        );
        assert_eq!(
            <Complex32 as ElementCast<Complex64>>::cast_elem(Complex32::new(1.5, -2.5)),
            Complex64::new(1.5, -2.5)
        );
        assert_eq!(
            <bool as ElementCast<Complex32>>::cast_elem(true),
            Complex32::new(1.0, 0.0)
        );
    }

    #[test]
    fn test_object_fallback_agrees_with_direct() {
        // going through Scalar must match the direct registered conversion
        let x = -3.7f64;
        let direct: i16 = x.cast_elem();
        let via: i16 = i16::from_scalar(x.to_scalar()).unwrap();
        assert_eq!(direct, via);
    }
}
