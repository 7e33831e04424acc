// SPDX-License-Identifier: MPL-2.0
//! Human-readable size and ratio strings for the result panel.

const BYTES_PER_KB: f64 = 1024.0;

/// Formats a byte count for display.
///
/// Zero renders as `"0 KB"`; anything below one megabyte renders as KB with
/// two decimals, and everything else as MB with two decimals.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 KB".to_string();
    }

    let kb = bytes as f64 / BYTES_PER_KB;
    if kb >= BYTES_PER_KB {
        format!("{:.2} MB", kb / BYTES_PER_KB)
    } else {
        format!("{kb:.2} KB")
    }
}

/// Formats the compressed-to-original size ratio as a percentage with one
/// decimal place.
///
/// Returns `None` when the original size is zero, so the caller can skip
/// the ratio line instead of rendering a non-finite value.
#[must_use]
pub fn compression_ratio(original_bytes: u64, compressed_bytes: u64) -> Option<String> {
    if original_bytes == 0 {
        return None;
    }

    let ratio = compressed_bytes as f64 / original_bytes as f64 * 100.0;
    Some(format!("{ratio:.1}%"))
}
