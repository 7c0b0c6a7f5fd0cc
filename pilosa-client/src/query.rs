//! Builders for the PQL query strings sent by the client.
//!
//! Frame names are inserted verbatim between single quotes. No escaping is
//! applied, so a frame containing `'` produces a query the server rejects.

/// `SetBit(<bitmap_id>, '<frame>', <profile_id>)`
pub fn set_bit(bitmap_id: u64, frame: &str, profile_id: u64) -> String {
    format!("SetBit({bitmap_id}, '{frame}', {profile_id})")
}

/// `ClearBit(<bitmap_id>, '<frame>', <profile_id>)`
pub fn clear_bit(bitmap_id: u64, frame: &str, profile_id: u64) -> String {
    format!("ClearBit({bitmap_id}, '{frame}', {profile_id})")
}

/// `Bitmap(<bitmap_id>, '<frame>')`
pub fn bitmap(bitmap_id: u64, frame: &str) -> String {
    format!("Bitmap({bitmap_id}, '{frame}')")
}

/// Wraps a bitmap expression in `Count(..)`
pub fn count(inner: &str) -> String {
    format!("Count({inner})")
}
