use std::time::{Duration, Instant};

use crate::core::ports::repository::{HealthCommon, Manager};
use crate::error::Error;

#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub latency: Duration,
    pub slow: bool,
}

/// Round trip to storage, connection checkout included.
pub async fn probe<M>(manager: &M, max_latency: Duration) -> Result<Probe, Error>
where
    M: Manager,
{
    let start = Instant::now();
    let mut db = manager.db().await?;
    HealthCommon::ping(&mut db).await?;
    let latency = start.elapsed();
    let slow = latency > max_latency;
    if slow {
        log::warn!("storage probe took {:?}, threshold {:?}", latency, max_latency);
    }
    Ok(Probe { latency, slow })
}
