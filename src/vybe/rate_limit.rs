use log::debug;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Process-wide token bucket guarding the data provider.
///
/// Every outbound request takes one token. When the bucket is empty the
/// caller waits for the next refill instead of failing, so bursts from many
/// chats queue up rather than tripping the provider's own limit.
pub struct TokenBucket {
    capacity: f64,
    refill_per_sec: f64,
    state: Mutex<BucketState>,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl BucketState {
    fn refill(&mut self, capacity: f64, refill_per_sec: f64) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * refill_per_sec).min(capacity);
        self.last_refill = now;
    }
}

impl TokenBucket {
    pub fn new(burst: u32, refill_per_sec: f64) -> Self {
        let capacity = f64::from(burst.max(1));
        Self {
            capacity,
            refill_per_sec: if refill_per_sec > 0.0 {
                refill_per_sec
            } else {
                1.0
            },
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Takes a token, waiting for a refill when the bucket is empty.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                state.refill(self.capacity, self.refill_per_sec);
                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return;
                }
                Duration::from_secs_f64((1.0 - state.tokens) / self.refill_per_sec)
            };

            debug!("Rate limit budget exhausted, waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }

}
