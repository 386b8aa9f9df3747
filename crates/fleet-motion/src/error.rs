use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("a journey needs at least one segment")]
    EmptyJourney,

    #[error("journey has {segments} delivery segments for {stops} stops")]
    StopMismatch { stops: usize, segments: usize },
}

pub type MotionResult<T> = Result<T, MotionError>;
