// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target: markup stripping never panics and never grows plain text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lzedit::corpus::markup::strip_markup;

fuzz_target!(|html: &str| {
    let text = strip_markup(html);
    if !html.contains(['<', '&']) {
        assert_eq!(text, html);
    }
});
