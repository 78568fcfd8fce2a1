//! Inline image output via the iTerm2 OSC 1337 escape sequence.
//!
//! `ESC ] 1337 ; File = <args> : <base64 payload> BEL`. Terminals without
//! this protocol show nothing; detection is out of scope.

use std::io::{self, Write};

fn base64_encode(data: &[u8]) -> String {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    STANDARD.encode(data)
}

/// Emit one inline image. `name` is advisory (the protocol wants it base64
/// encoded); width/height are in pixels when the service reported them.
pub fn write_inline_image(
    out: &mut impl Write,
    name: &str,
    data: &[u8],
    width: Option<u32>,
    height: Option<u32>,
) -> io::Result<()> {
    let mut args = format!(
        "name={};size={};inline=1",
        base64_encode(name.as_bytes()),
        data.len()
    );
    if let Some(w) = width {
        args.push_str(&format!(";width={}px", w));
    }
    if let Some(h) = height {
        args.push_str(&format!(";height={}px", h));
    }
    write!(out, "\u{1b}]1337;File={}:{}\u{7}", args, base64_encode(data))?;
    writeln!(out)?;
    Ok(())
}
