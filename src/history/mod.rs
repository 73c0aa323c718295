//! History recorder: per-step notes, committed snapshots, trace export.
//!
//! One snapshot is committed per atomic turn step. The engine's in-progress
//! state is never part of the history; when the run halts, whatever was not
//! committed is simply dropped, so the trace ends at the last completed step.

mod notes;
mod recorder;
pub mod trace;

pub use notes::NoteBuffer;
pub use recorder::History;
pub use trace::Trace;
