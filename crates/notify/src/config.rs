// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// SMTP settings for notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from: String,
    pub to: Vec<String>,
    /// Link placed at the end of message bodies; may be empty.
    pub app_base_url: String,
}

impl EmailConfig {
    /// Returns `true` when every setting needed to send mail is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.smtp_host.trim().is_empty()
            && !self.smtp_user.trim().is_empty()
            && !self.smtp_pass.is_empty()
            && !self.from.trim().is_empty()
            && !self.to.is_empty()
    }
}

/// Splits a comma-separated recipient list, dropping blank entries.
#[must_use]
pub fn parse_recipients(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect()
}
