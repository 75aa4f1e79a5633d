//! Motion program synthesis for the laser-bending cell.
//!
//! A program is a fixed preamble, one block per scan entry and a fixed
//! postamble, in the Siemens-style dialect the cell controller runs
//! (see [`dialect`]). The synthesizer threads an explicit [`MachineState`]
//! through the blocks so absolute Z moves are only emitted when Z changes.

pub mod dialect;
mod scan;
mod synth;

pub use scan::ScanParams;
pub use synth::{synthesize, MachineState, MotionProgram, Synthesis, DEFAULT_RAPID_FEED};
