// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for smctl integration tests

// Allow unused code - not every test file uses every helper
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::Command;

/// Variables that would leak the developer's own setup into a test
const ISOLATED_VARS: &[&str] = &[
    "SMCTL_PROFILE",
    "SMCTL_URL",
    "SMCTL_SUBSCRIPTION_ID",
    "SMCTL_CERT_FILE",
    "SMCTL_TOKEN",
    "SMAPI_BASE_URI",
    "SMAPI_TIMEOUT_SECS",
    "SMAPI_USER_AGENT",
    "RUST_LOG",
];

/// Get a Command for the smctl binary using `config_dir` for profiles
///
/// Stdin is an empty pipe, so the binary never prompts.
pub fn smctl_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("smctl").expect("Failed to find smctl binary");
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd.env("SMCTL_CONFIG_DIR", config_dir);
    cmd.write_stdin("");
    cmd
}

/// Parse stdout of a successful `--json` invocation
pub fn json_output(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Command should succeed.\nstdout: {}\nstderr: {}",
        stdout,
        stderr
    );
    serde_json::from_str(&stdout)
        .unwrap_or_else(|_| panic!("Should parse JSON output: {}", stdout))
}
