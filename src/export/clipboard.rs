// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use crossterm::{execute, style::Print};

use super::ExportError;

pub trait Clipboard {
    fn name(&self) -> &'static str;

    fn write_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Which clipboard path ended up holding the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Primary,
    Fallback,
}

impl CopyPath {
    pub fn notice(self) -> &'static str {
        match self {
            Self::Primary => "Email copied to clipboard!",
            Self::Fallback => "Copied (fallback).",
        }
    }
}

/// Copies with `primary`, falling back to `fallback` when the primary write fails.
pub fn copy_with_fallback(
    primary: &mut dyn Clipboard,
    fallback: &mut dyn Clipboard,
    text: &str,
) -> Result<CopyPath, ExportError> {
    match primary.write_text(text) {
        Ok(()) => {
            tracing::debug!(clipboard = primary.name(), "copied output");
            Ok(CopyPath::Primary)
        }
        Err(err) => {
            tracing::warn!(
                clipboard = primary.name(),
                fallback = fallback.name(),
                error = %err,
                "clipboard write failed; trying fallback"
            );
            fallback.write_text(text)?;
            Ok(CopyPath::Fallback)
        }
    }
}

/// The platform clipboard, reached through the usual helper commands.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    commands: Vec<Vec<String>>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        let commands: &[&[&str]] = if cfg!(target_os = "macos") {
            &[&["pbcopy"]]
        } else if cfg!(windows) {
            &[&["clip"]]
        } else if env::var_os("WAYLAND_DISPLAY").is_some() {
            &[&["wl-copy"], &["xclip", "-selection", "clipboard"], &["xsel", "--clipboard", "--input"]]
        } else {
            &[&["xclip", "-selection", "clipboard"], &["xsel", "--clipboard", "--input"]]
        };
        Self::with_commands(
            commands
                .iter()
                .map(|command| command.iter().map(|part| (*part).to_owned()).collect())
                .collect(),
        )
    }

    pub fn with_commands(commands: Vec<Vec<String>>) -> Self {
        Self { commands }
    }

    fn run(command: &[String], text: &str) -> Result<(), ExportError> {
        let display = command.join(" ");
        let Some((program, args)) = command.split_first() else {
            return Err(ExportError::Unsupported("empty clipboard command".to_owned()));
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ExportError::Spawn {
                command: display.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(ExportError::Status {
                command: display,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

impl Clipboard for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        let mut last_err = None;
        for command in &self.commands {
            match Self::run(command, text) {
                Ok(()) => return Ok(()),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err
            .unwrap_or_else(|| ExportError::Unsupported("no clipboard command available".to_owned())))
    }
}

/// Writes an OSC 52 escape so the terminal itself stores the text.
pub struct Osc52Clipboard<W: Write = io::Stdout> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        execute!(self.out, Print(osc52_sequence(text)))?;
        Ok(())
    }
}

pub(crate) fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
