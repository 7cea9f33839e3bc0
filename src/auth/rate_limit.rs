use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_ATTEMPTS: usize = 5;
const WINDOW_SECS: u64 = 900; // 15 minutes
/// Map size above which `record_failure` sweeps out expired IPs.
const PRUNE_THRESHOLD: usize = 1024;

/// Failed-login counter per client IP, shared across workers.
#[derive(Clone)]
pub struct RateLimiter {
    attempts: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
    max_attempts: usize,
    window: Duration,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, Duration::from_secs(WINDOW_SECS))
    }
}

impl RateLimiter {
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(HashMap::new())),
            max_attempts,
            window,
        }
    }

    /// Check if the given IP is rate-limited. Returns true if blocked.
    /// Also lazily cleans up stale entries for the checked IP.
    pub fn is_blocked(&self, ip: IpAddr) -> bool {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        if let Some(timestamps) = map.get_mut(&ip) {
            timestamps.retain(|t| now.duration_since(*t) < self.window);
            if timestamps.is_empty() {
                map.remove(&ip);
                return false;
            }
            timestamps.len() >= self.max_attempts
        } else {
            false
        }
    }

    pub fn record_failure(&self, ip: IpAddr) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        if map.len() >= PRUNE_THRESHOLD {
            map.retain(|_, timestamps| {
                timestamps.retain(|t| now.duration_since(*t) < self.window);
                !timestamps.is_empty()
            });
        }

        map.entry(ip).or_default().push(now);
    }

    /// Forget all attempts for `ip`; called on successful login.
    pub fn clear(&self, ip: IpAddr) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&ip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const IP: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const OTHER: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn blocks_after_max_failures_per_ip() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..2 {
            limiter.record_failure(IP);
        }
        assert!(!limiter.is_blocked(IP));
        limiter.record_failure(IP);
        assert!(limiter.is_blocked(IP));
        assert!(!limiter.is_blocked(OTHER));
    }

    #[test]
    fn clear_resets_counter() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        limiter.record_failure(IP);
        assert!(limiter.is_blocked(IP));
        limiter.clear(IP);
        assert!(!limiter.is_blocked(IP));
    }

    #[test]
    fn expired_ips_are_swept_when_map_grows() {
        let limiter = RateLimiter::new(5, Duration::from_millis(20));
        for n in 0..PRUNE_THRESHOLD as u32 {
            limiter.record_failure(IpAddr::V4(Ipv4Addr::from(n)));
        }
        assert_eq!(limiter.attempts.lock().unwrap().len(), PRUNE_THRESHOLD);

        std::thread::sleep(Duration::from_millis(40));
        limiter.record_failure(IP);

        let map = limiter.attempts.lock().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&IP));
    }

    #[test]
    fn live_entries_survive_a_sweep() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        limiter.record_failure(IP);
        for n in 0..PRUNE_THRESHOLD as u32 {
            limiter.record_failure(IpAddr::V4(Ipv4Addr::from(n)));
        }
        limiter.record_failure(IP);
        assert!(limiter.is_blocked(IP));
    }

    #[test]
    fn attempts_expire_after_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        limiter.record_failure(IP);
        assert!(limiter.is_blocked(IP));
        std::thread::sleep(Duration::from_millis(40));
        assert!(!limiter.is_blocked(IP));
    }
}
