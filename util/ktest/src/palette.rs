// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Escape sequences used by the report.

use crate::config::ColorChoice;

macro_rules! sgr {
    ($code:literal) => {
        concat!("\u{1B}[", $code, "m")
    };
}

/// Display roles and the escape text each resolves to.
///
/// Resolved once when a run starts. A plain palette maps every role to the
/// empty string so the report degrades to uncolored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub reset: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
}

impl Palette {
    pub const ANSI: Palette = Palette {
        reset: sgr!(0),
        success: sgr!(32),
        failure: sgr!(31),
    };
    pub const PLAIN: Palette = Palette {
        reset: "",
        success: "",
        failure: "",
    };

    /// Picks the palette for a run.
    pub fn resolve(choice: ColorChoice, stdout_is_terminal: bool) -> Self {
        if choice.enabled(stdout_is_terminal) {
            Self::ANSI
        } else {
            Self::PLAIN
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}
