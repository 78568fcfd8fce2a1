//! Plain-text report rendering.
//!
//! Everything writes to a generic writer so the exact output shape stays
//! testable; main hands in stdout.

use crate::domain::{Emoticon, RoomSummary, UnreadBlock};
use crossterm::style::Stylize;
use std::io::{self, Write};

/// Print the unread report: per conversation a bolded header, one line per
/// message, then a blank separator. Conversations without printable lines
/// (card-only backlogs) produce no output at all. Unresolved read states are
/// dumped verbatim so the JID can be diagnosed.
pub fn write_unread_report(out: &mut impl Write, blocks: &[UnreadBlock]) -> io::Result<()> {
    for block in blocks {
        match block {
            UnreadBlock::Conversation { name, lines } => {
                if lines.is_empty() {
                    continue;
                }
                writeln!(out, "{}", name.as_str().bold())?;
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
                writeln!(out)?;
            }
            UnreadBlock::Unresolved(state) => {
                let raw = serde_json::to_string(state).unwrap_or_else(|_| format!("{:?}", state));
                writeln!(out, "{}", raw)?;
            }
        }
    }
    Ok(())
}

/// Print a room's details, one field per line.
pub fn write_room(out: &mut impl Write, room: &RoomSummary) -> io::Result<()> {
    writeln!(out, "{} (room {})", room.name.as_str().bold(), room.id)?;
    writeln!(out, "jid:         {}", room.jid)?;
    writeln!(out, "topic:       {}", room.topic)?;
    writeln!(out, "privacy:     {}", room.privacy)?;
    writeln!(out, "owner id:    {}", opt(room.owner_id))?;
    writeln!(out, "created:     {}", room.created.to_rfc3339())?;
    writeln!(out, "archived:    {}", if room.is_archived { "yes" } else { "no" })?;
    writeln!(
        out,
        "last active: {}",
        opt(room.last_active.map(|t| t.to_rfc3339()))
    )?;
    Ok(())
}

/// Print emoticon metadata. The image itself is rendered separately.
pub fn write_emoticon(out: &mut impl Write, emoticon: &Emoticon) -> io::Result<()> {
    writeln!(out, "{} (emoticon {})", emoticon.shortcut.as_str().bold(), emoticon.id)?;
    writeln!(out, "url:  {}", emoticon.url)?;
    match (emoticon.width, emoticon.height) {
        (Some(w), Some(h)) => writeln!(out, "size: {}x{}", w, h)?,
        _ => writeln!(out, "size: unknown")?,
    }
    Ok(())
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
