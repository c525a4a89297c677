// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default configuration output

use anyhow::Result;
use mx_core::ClusterConfig;

pub fn run() -> Result<()> {
    print!("{}", ClusterConfig::default().to_toml_string()?);
    Ok(())
}
