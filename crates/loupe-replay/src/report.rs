//! JSON-lines output: one [`Frame`] per replayed event.

use std::io::Write;

use loupe_core::{Effect, Timestamp, Transform, ZoomPanState};
use serde::Serialize;

use crate::error::ReplayError;

/// What the viewer looked like right after one event was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub seq: usize,
    pub t: Timestamp,
    pub kind: &'static str,
    pub effect: Option<Effect>,
    pub index: usize,
    pub state: ZoomPanState,
    pub transform: Transform,
    /// Scale on screen at `t`, which lags `state.zoom_level` while the
    /// animation runs.
    pub displayed_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub frames: usize,
    pub navigations: Vec<usize>,
    pub final_index: usize,
    pub final_state: ZoomPanState,
}

pub fn write_frames<W: Write>(mut out: W, frames: &[Frame]) -> Result<(), ReplayError> {
    for frame in frames {
        serde_json::to_writer(&mut out, frame)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use loupe_core::ViewportSize;

    use super::*;

    #[test]
    fn test_one_line_per_frame() {
        let state = ZoomPanState::default();
        let frame = Frame {
            seq: 0,
            t: Timestamp::from_millis(1_000),
            kind: "start",
            effect: None,
            index: 2,
            state,
            transform: state.transform(ViewportSize::new(375.0, 667.0)),
            displayed_scale: 1.0,
        };
        let mut out = Vec::new();
        write_frames(&mut out, &[frame.clone(), Frame { seq: 1, ..frame }])
            .expect("writing to a Vec cannot fail");

        let text = String::from_utf8(out).expect("report is UTF-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).expect("valid JSON");
        assert_eq!(first["t"], 1000);
        assert_eq!(first["index"], 2);
        assert_eq!(first["state"]["status"], "Normal");
        assert!(first["effect"].is_null());
    }
}
