//! Engine configuration
//!
//! All values can be overridden through environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | API_BASE_URL | http://localhost:3000/api | REST backend root |
//! | COMPANION_FEE | 150000 | Per-companion surcharge |
//! | REQUIRE_PAYMENT_ON_SUBMIT | false | Payment step requires >= 1 payment |
//! | MAX_COMPANIONS | 10 | Hard cap on companions per reservation |
//! | PAGE_SIZE | 5 | Reservation table page size |

/// Engine configuration for a wizard session
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// REST backend root URL
    pub api_base_url: String,
    /// Single authoritative per-companion surcharge, applied uniformly
    /// across admin and client flows
    pub companion_fee: f64,
    /// Whether the payment step blocks submission with zero payments
    pub require_payment_on_submit: bool,
    /// Hard cap on companions per reservation
    pub max_companions: u32,
    /// Nominal room occupancy (rooms serve 1-2 guests)
    pub room_default_capacity: u32,
    /// Reservation table page size
    pub page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            companion_fee: 150_000.0,
            require_payment_on_submit: false,
            max_companions: 10,
            room_default_capacity: 2,
            page_size: 5,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            companion_fee: std::env::var("COMPANION_FEE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.companion_fee),
            require_payment_on_submit: std::env::var("REQUIRE_PAYMENT_ON_SUBMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.require_payment_on_submit),
            max_companions: std::env::var("MAX_COMPANIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_companions),
            room_default_capacity: defaults.room_default_capacity,
            page_size: std::env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.page_size),
        }
    }
}
