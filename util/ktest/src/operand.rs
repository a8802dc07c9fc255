// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Values accepted by the equality assertions.
//!
//! The textual rule is picked from the operand's static type. The set of
//! types is closed: the trait is sealed, so comparing anything else (strings,
//! references, aggregates) is rejected at compile time.
//!
//! | Types                                   | Rendering                    |
//! |-----------------------------------------|------------------------------|
//! | `i8` `i16` `i32` `i64` `i128` `isize`   | signed decimal               |
//! | `u8` `u16` `u32` `u64` `u128` `usize`   | unsigned decimal             |
//! | `f32` `f64`                             | fixed, six fractional digits |
//! | `*const T` `*mut T`                     | address, `0x…`               |
//!
//! ```no_run
//! fn body() {
//!     ktest::assert_eq!(0.5f64, 0.25f64 * 2.0);
//! }
//! # body();
//! ```
//!
//! String slices have no rule, so this does not build:
//!
//! ```compile_fail
//! fn body() {
//!     ktest::assert_eq!("left", "right");
//! }
//! # body();
//! ```

use core::fmt;

mod sealed {
    pub trait Sealed {}
}

/// A value the equality assertions know how to print.
pub trait Operand: sealed::Sealed {
    /// Writes the value using the rule for its type.
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Adapter that displays an [`Operand`] with its type's rule.
pub struct Rendered<'a, T: Operand + ?Sized>(pub &'a T);

impl<T: Operand + ?Sized> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f)
    }
}

macro_rules! decimal_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Operand for $ty {
                #[inline]
                fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

macro_rules! fixed_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Operand for $ty {
                #[inline]
                fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{:.6}", self)
                }
            }
        )*
    };
}

decimal_operand!(i8, i16, i32, i64, i128, isize);
decimal_operand!(u8, u16, u32, u64, u128, usize);
fixed_operand!(f32, f64);

impl<T: ?Sized> sealed::Sealed for *const T {}
impl<T: ?Sized> sealed::Sealed for *mut T {}

impl<T: ?Sized> Operand for *const T {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", *self)
    }
}

impl<T: ?Sized> Operand for *mut T {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", *self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show<T: Operand>(value: T) -> String {
        format!("{}", Rendered(&value))
    }

    #[test]
    fn signed_values_round_trip() {
        for value in [i64::MIN, -1, 0, 7, i64::MAX] {
            assert_eq!(show(value).parse::<i64>().unwrap(), value);
        }
        assert_eq!(show(i8::MIN), "-128");
        assert_eq!(show(-5isize), "-5");
        assert_eq!(show(i128::MIN).parse::<i128>().unwrap(), i128::MIN);
    }

    #[test]
    fn unsigned_values_round_trip() {
        for value in [0u64, 1, u64::MAX] {
            assert_eq!(show(value).parse::<u64>().unwrap(), value);
        }
        assert_eq!(show(u8::MAX), "255");
        assert_eq!(show(u128::MAX).parse::<u128>().unwrap(), u128::MAX);
    }

    #[test]
    fn floats_use_six_fraction_digits() {
        assert_eq!(show(2.5f64), "2.500000");
        assert_eq!(show(-0.125f32), "-0.125000");
        assert_eq!(show(1.0f64 / 3.0), "0.333333");
        assert_eq!(show(2.0f64 / 3.0), "0.666667");
        assert_eq!(show(f64::NAN), "NaN");
    }

    #[test]
    fn float_text_parses_back_to_rounded_value() {
        let value = 1234.5678901f64;
        let parsed: f64 = show(value).parse().unwrap();
        assert!((parsed - value).abs() <= 0.5e-6);
    }

    #[test]
    fn pointers_render_as_addresses() {
        let value = 7u32;
        let ptr = &value as *const u32;
        let text = show(ptr);
        assert!(text.starts_with("0x"));
        assert_eq!(usize::from_str_radix(&text[2..], 16).unwrap(), ptr as usize);
        assert_eq!(show(core::ptr::null_mut::<u8>()), "0x0");
    }
}
