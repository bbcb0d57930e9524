//! Persistent on-disk cache of the last SELIC observation, so cold starts
//! without network still pre-fill a recent rate.

use std::{
    fs,
    path::PathBuf,
    sync::OnceLock,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

const CACHE_FILENAME: &str = "selic_cache.json";

/// Cache TTL: 24 hours. The SELIC target only moves on Copom meeting days.
pub const SELIC_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Last observation written by a successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelicCache {
    /// Unix timestamp (seconds) when this cache was created.
    pub cached_at: u64,
    /// Annual rate in percent points, as published.
    pub annual_rate_pct: f64,
    /// Observation date as published by the series (`dd/MM/yyyy`).
    pub reference_date: String,
}

impl SelicCache {
    /// Create a new cache entry with the current timestamp.
    pub fn new(annual_rate_pct: f64, reference_date: String) -> Self {
        let cached_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            cached_at,
            annual_rate_pct,
            reference_date,
        }
    }

    /// Check if the entry has outlived [`SELIC_CACHE_TTL`].
    pub fn is_expired(&self) -> bool {
        self.age() > SELIC_CACHE_TTL
    }

    /// Get cache age as Duration.
    pub fn age(&self) -> Duration {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Duration::from_secs(now.saturating_sub(self.cached_at))
    }

    /// Human-readable age string.
    pub fn age_string(&self) -> String {
        let secs = self.age().as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86400)
        }
    }
}

/// Get the cache file path (in the app data directory).
fn cache_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("preco-de-venda");

        // Ensure directory exists
        let _ = fs::create_dir_all(&base);

        base.join(CACHE_FILENAME)
    })
    .clone()
}

/// Load the SELIC cache from disk, if it exists. Expiry is the caller's call;
/// an expired entry is still the best offline fallback available.
pub fn load_selic_cache() -> Option<SelicCache> {
    let path = cache_path();

    if !path.exists() {
        println!("[cache] No SELIC cache found at {}", path.display());
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str::<SelicCache>(&content) {
            Ok(cache) => {
                println!(
                    "[cache] Loaded SELIC cache ({}% a.a., age: {})",
                    cache.annual_rate_pct,
                    cache.age_string()
                );
                Some(cache)
            }
            Err(e) => {
                println!("[cache] Failed to parse SELIC cache: {e}");
                None
            }
        },
        Err(e) => {
            println!("[cache] Failed to read SELIC cache: {e}");
            None
        }
    }
}

/// Save the SELIC cache to disk.
pub fn save_selic_cache(cache: &SelicCache) -> Result<(), std::io::Error> {
    let path = cache_path();
    let content = serde_json::to_string_pretty(cache)?;
    fs::write(&path, content)?;
    println!(
        "[cache] Saved SELIC cache ({}% a.a. on {}) to {}",
        cache.annual_rate_pct,
        cache.reference_date,
        path.display()
    );
    Ok(())
}

/// Remove the cache file, if any.
pub fn clear_selic_cache() -> Result<(), std::io::Error> {
    let path = cache_path();
    if path.exists() {
        fs::remove_file(&path)?;
        println!("[cache] Removed SELIC cache at {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entries_are_not_expired() {
        let cache = SelicCache::new(15.0, "06/08/2026".to_string());
        assert!(!cache.is_expired());
        assert!(cache.age() < Duration::from_secs(5));
    }

    #[test]
    fn old_entries_expire() {
        let cache = SelicCache {
            cached_at: 0,
            annual_rate_pct: 13.75,
            reference_date: "01/01/1970".to_string(),
        };
        assert!(cache.is_expired());
        assert!(cache.age_string().ends_with('d'));
    }

    #[test]
    fn serialized_form_round_trips() {
        let cache = SelicCache::new(10.5, "02/05/2025".to_string());
        let json = serde_json::to_string(&cache).unwrap();
        let back: SelicCache = serde_json::from_str(&json).unwrap();
        assert_eq!(back.annual_rate_pct, 10.5);
        assert_eq!(back.reference_date, "02/05/2025");
    }
}
