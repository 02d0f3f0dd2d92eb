// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Opening the tutorial video with the platform's default player.

use std::path::Path;
use std::process::{Command, Stdio};

/// Builds the command opening `path` with the desktop's default handler.
pub fn opener_command(path: &Path) -> Command {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        // `start` takes the first quoted argument as the window title.
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    command
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

/// Launches the opener without waiting for it.
///
/// The child is left running on its own; failures are only logged.
pub fn launch(path: &Path) {
    if !path.exists() {
        log::warn!("Tutorial video '{}' does not exist", path.display());
        return;
    }
    match opener_command(path).spawn() {
        Ok(child) => log::info!(
            "Opened '{}' in the default player (pid {})",
            path.display(),
            child.id()
        ),
        Err(e) => log::warn!("Failed to open '{}': {e}", path.display()),
    }
}
