// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Small integer helpers tested with ktest.
//!
//! `cargo run -p arith-demo` runs the passing suite;
//! `cargo run -p arith-demo --bin arith-broken` shows a failing run and its
//! nonzero exit status.

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Mean of two values without intermediate overflow, rounded toward zero.
pub fn midpoint(a: i32, b: i32) -> i32 {
    ((a as i64 + b as i64) / 2) as i32
}

/// Converts a 16.16 fixed-point value to floating point.
pub fn fixed_to_f64(raw: i32) -> f64 {
    raw as f64 / 65536.0
}
