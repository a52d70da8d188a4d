/// Currency every product price is stored in.
pub const BASE_CURRENCY: &str = "USD";

/// Language used when neither the request nor the languages table name one.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default page size for product listings
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound for the page size a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Largest quantity a single cart line may hold
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Rows returned by the dashboard's recent products list by default
pub const DEFAULT_RECENT_LIMIT: i64 = 5;

/// Stock level at or below which a product counts as low stock
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;
