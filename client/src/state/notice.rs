//! Transient toast-style notices.
//!
//! DESIGN
//! ======
//! Notices are plain data in one context signal. Views push them and the
//! tray renders them; dismissal is by id so a timer firing after a manual
//! close is harmless.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

/// How long a notice stays up before it dismisses itself.
pub const NOTICE_TTL_MS: u32 = 4_000;

/// Oldest notices are dropped past this many.
pub const MAX_NOTICES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    /// CSS modifier for the tray item.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "notice notice--success",
            Self::Error => "notice notice--error",
            Self::Info => "notice notice--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    next_id: u64,
    pub items: Vec<Notice>,
}

impl NoticeState {
    /// Queue a notice and return its id.
    pub fn push(&mut self, kind: NoticeKind, title: &str, description: Option<&str>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice {
            id,
            kind,
            title: title.to_owned(),
            description: description.map(str::to_owned),
        });
        if self.items.len() > MAX_NOTICES {
            let excess = self.items.len() - MAX_NOTICES;
            self.items.drain(..excess);
        }
        id
    }

    /// Remove a notice; returns whether it was still showing.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }
}
