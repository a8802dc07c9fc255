// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

mod checks {
    use arith_demo::*;
    use ktest::{assert, assert_eq, def_test};

    #[def_test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
    }

    #[def_test]
    fn test_wrong_expectation() {
        assert_eq!(5, 2 + 2);
        assert!(gcd(4, 6) == 4, "gcd(4, 6) = {}", gcd(4, 6));
    }
}

ktest::test_main!();
