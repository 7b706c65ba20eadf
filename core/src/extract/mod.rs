//! Target extraction.
//!
//! JSON-like dialects share the event-driven state machine in [`json`];
//! line-oriented dialects (Makefiles, Ant, build scripts) produce the same
//! [`Targets`] map from their own extractors.

pub mod json;
mod targets;

pub use json::{extract_json, extract_scripts, extract_task_labels, Extraction, JsonSection};
pub use targets::{Target, Targets};

/// Yields `(byte offset, line without terminator)` for every line of `text`.
///
/// Line-oriented extractors use this to report target offsets.
pub fn line_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        (start, line.trim_end_matches(['\n', '\r']))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_offsets_track_byte_positions() {
        let lines: Vec<_> = line_offsets("a:\r\n\tb\nc").collect();
        assert_eq!(lines, vec![(0, "a:"), (4, "\tb"), (7, "c")]);
    }
}
