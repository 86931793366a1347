use std::env;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_STATIC_DIR: &str = "frontend/dist";

/// `REDIS_URL` value that selects the in-process store.
pub const MEMORY_URL: &str = "memory://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub redis_url: String,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            bind_addr: get("BIND_ADDR", DEFAULT_BIND_ADDR),
            redis_url: get("REDIS_URL", DEFAULT_REDIS_URL),
            static_dir: get("STATIC_DIR", DEFAULT_STATIC_DIR),
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.redis_url == MEMORY_URL
    }
}
