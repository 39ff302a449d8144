// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::process::{Command, Stdio};

use super::ExportError;

pub trait MailLauncher {
    /// Hands `uri` to the mail client.
    fn open(&mut self, uri: &str) -> Result<(), ExportError>;
}

/// Opens `mailto:` URIs with the platform opener, or with a configured shell command.
#[derive(Debug, Clone, Default)]
pub struct SystemMailLauncher {
    command: Option<String>,
}

impl SystemMailLauncher {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|command| !command.trim().is_empty()),
        }
    }

    fn build_command(&self, uri: &str) -> (String, Command) {
        if let Some(command) = self.command.as_deref() {
            let line = format!("{command} {}", shell_single_quote(uri));
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&line);
            return (line, cmd);
        }
        platform_command(uri)
    }
}

#[cfg(target_os = "macos")]
fn platform_command(uri: &str) -> (String, Command) {
    let mut cmd = Command::new("open");
    cmd.arg(uri);
    ("open".to_owned(), cmd)
}

// `cmd /C start` would split the URI at `&`; rundll32 takes it as a single argument.
#[cfg(windows)]
fn platform_command(uri: &str) -> (String, Command) {
    let mut cmd = Command::new("rundll32");
    cmd.args(["url.dll,FileProtocolHandler", uri]);
    ("rundll32 url.dll,FileProtocolHandler".to_owned(), cmd)
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_command(uri: &str) -> (String, Command) {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(uri);
    ("xdg-open".to_owned(), cmd)
}

impl MailLauncher for SystemMailLauncher {
    fn open(&mut self, uri: &str) -> Result<(), ExportError> {
        if uri.starts_with('-') {
            return Err(ExportError::Unsupported("invalid mail URI".to_owned()));
        }

        let (command_line, mut cmd) = self.build_command(uri);
        tracing::debug!(command = %command_line, "launching mail client");
        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ExportError::Spawn {
                command: command_line.clone(),
                source,
            })?;
        if !status.success() {
            return Err(ExportError::Status {
                command: command_line,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
