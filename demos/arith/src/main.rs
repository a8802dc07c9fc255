// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

mod checks {
    use arith_demo::*;
    use ktest::{assert, assert_eq, assert_ne, def_test};

    #[def_test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(0, 9), 9);
    }

    #[def_test]
    fn test_midpoint_extremes() {
        assert_eq!(midpoint(i32::MAX, i32::MAX), i32::MAX);
        assert_eq!(midpoint(i32::MIN, i32::MAX), 0);
        assert_ne!(midpoint(-3, 4), 1);
    }

    #[def_test]
    fn test_fixed_point() {
        assert_eq!(fixed_to_f64(0x0001_8000), 1.5);
        assert!(fixed_to_f64(-1) < 0.0, "expected a negative value");
    }
}

ktest::test_main!();
