use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::dialog::{Dialog, NumberValidator, StringValidator};

/// One dialog request, one line of JSON on the way out. The frontend renders
/// the dialog and answers with a [`DialogReply`] echoing the id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DialogRequest<'a> {
    id: String,
    kind: &'static str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'a [&'a str]>,
    /// Rejection message of the previous attempt, shown inline on re-prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DialogReply {
    id: String,
    #[serde(default)]
    value: serde_json::Value,
    #[serde(default)]
    cancelled: bool,
}

/// `Dialog` over newline-delimited JSON on a reader/writer pair; in
/// production that pair is the process stdio and the peer is the desktop
/// frontend. Replies are lockstep: one per request, matching id. EOF on the
/// reader means the frontend is gone and reads as cancellation everywhere.
pub struct StdioDialog<R, W> {
    reader: R,
    writer: W,
    next_id: u64,
}

impl StdioDialog<io::StdinLock<'static>, io::Stdout> {
    pub fn over_stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdioDialog<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    fn send(&mut self, request: &DialogRequest) -> Result<()> {
        let line = serde_json::to_string(request).context("encode dialog request")?;
        writeln!(self.writer, "{line}").context("write dialog request")?;
        self.writer.flush().context("flush dialog request")?;
        Ok(())
    }

    /// `None` means the reply channel reached EOF.
    fn read_reply(&mut self, id: &str) -> Result<Option<DialogReply>> {
        loop {
            let mut line = String::new();
            let n = self
                .reader
                .read_line(&mut line)
                .context("read dialog reply")?;
            if n == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let reply: DialogReply =
                serde_json::from_str(trimmed).context("parse dialog reply")?;
            if reply.id != id {
                bail!("dialog reply id mismatch: expected {id}, got {}", reply.id);
            }
            return Ok(Some(reply));
        }
    }

    fn show(&mut self, kind: &'static str, title: &str, message: &str) -> Result<()> {
        let id = self.next_id();
        self.send(&DialogRequest {
            id: id.clone(),
            kind,
            title,
            label: None,
            message: Some(message),
            options: None,
            error: None,
        })?;
        // Modal: wait for the dismissal ack. A vanished frontend is fine.
        self.read_reply(&id)?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Dialog for StdioDialog<R, W> {
    fn prompt_string(
        &mut self,
        title: &str,
        label: &str,
        validate: StringValidator,
    ) -> Result<Option<String>> {
        let mut error: Option<String> = None;
        loop {
            let id = self.next_id();
            self.send(&DialogRequest {
                id: id.clone(),
                kind: "promptString",
                title,
                label: Some(label),
                message: None,
                options: None,
                error: error.take(),
            })?;
            let Some(reply) = self.read_reply(&id)? else {
                return Ok(None);
            };
            if reply.cancelled {
                return Ok(None);
            }
            let Some(input) = reply.value.as_str() else {
                error = Some("Enter a text value".to_string());
                continue;
            };
            match validate(input) {
                Ok(()) => return Ok(Some(input.to_string())),
                Err(e) => error = Some(e.to_string()),
            }
        }
    }

    fn prompt_number(
        &mut self,
        title: &str,
        label: &str,
        validate: NumberValidator,
    ) -> Result<Option<f64>> {
        let mut error: Option<String> = None;
        loop {
            let id = self.next_id();
            self.send(&DialogRequest {
                id: id.clone(),
                kind: "promptNumber",
                title,
                label: Some(label),
                message: None,
                options: None,
                error: error.take(),
            })?;
            let Some(reply) = self.read_reply(&id)? else {
                return Ok(None);
            };
            if reply.cancelled {
                return Ok(None);
            }
            let Some(value) = reply.value.as_f64() else {
                error = Some("Enter a numeric value".to_string());
                continue;
            };
            match validate(value) {
                Ok(()) => return Ok(Some(value)),
                Err(e) => error = Some(e.to_string()),
            }
        }
    }

    fn confirm(&mut self, title: &str, message: &str) -> Result<bool> {
        let id = self.next_id();
        self.send(&DialogRequest {
            id: id.clone(),
            kind: "confirm",
            title,
            label: None,
            message: Some(message),
            options: None,
            error: None,
        })?;
        let Some(reply) = self.read_reply(&id)? else {
            return Ok(false);
        };
        if reply.cancelled {
            return Ok(false);
        }
        Ok(reply.value.as_bool().unwrap_or(false))
    }

    fn show_info(&mut self, title: &str, message: &str) -> Result<()> {
        self.show("info", title, message)
    }

    fn show_alert(&mut self, title: &str, message: &str) -> Result<()> {
        self.show("alert", title, message)
    }

    fn show_text(&mut self, title: &str, message: &str) -> Result<()> {
        self.show("text", title, message)
    }

    fn choose_option(&mut self, title: &str, options: &[&str]) -> Result<Option<usize>> {
        let mut error: Option<String> = None;
        loop {
            let id = self.next_id();
            self.send(&DialogRequest {
                id: id.clone(),
                kind: "menu",
                title,
                label: None,
                message: None,
                options: Some(options),
                error: error.take(),
            })?;
            let Some(reply) = self.read_reply(&id)? else {
                return Ok(None);
            };
            if reply.cancelled {
                return Ok(None);
            }
            match reply.value.as_u64() {
                Some(index) if (index as usize) < options.len() => {
                    return Ok(Some(index as usize))
                }
                _ => error = Some("Invalid option".to_string()),
            }
        }
    }
}
