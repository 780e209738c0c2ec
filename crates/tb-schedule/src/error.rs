use thiserror::Error;

use tb_core::Tick;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("recurring event interval must be at least one tick")]
    ZeroInterval,

    #[error("cannot schedule at {at}: the queue is already at {now}")]
    InPast { at: Tick, now: Tick },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
