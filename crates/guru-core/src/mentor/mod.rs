//! The six-phase mentor loop.
//!
//! - `outcome`: stage operation result records
//! - `orchestrator`: the state machine driving diagnostic sessions

mod orchestrator;
mod outcome;

pub use orchestrator::MentorLoopOrchestrator;
pub use outcome::{
    AnswerNextAction, AnswerOutcome, BaselineOutcome, FrameOutcome, GuideOutcome, ObserveOutcome,
    ReflectOutcome, StageStatus,
};
