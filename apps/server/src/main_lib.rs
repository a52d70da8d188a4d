use std::sync::Arc;

use argon2::password_hash::PasswordHash;
use storefront_core::{
    cart::{CartService, CartServiceTrait},
    catalog::{CategoryService, CategoryServiceTrait},
    currencies::{CurrencyService, CurrencyServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait},
    languages::{LanguageService, LanguageServiceTrait},
    products::{ProductService, ProductServiceTrait},
    upcoming::{UpcomingProductService, UpcomingProductServiceTrait},
    users::{UserService, UserServiceTrait},
};
use storefront_storage_sqlite::{
    db, CategoryRepository, CurrencyRepository, DashboardRepository, LanguageRepository,
    ProductRepository, UpcomingProductRepository, UserRepository,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::auth::{AuthConfig, AuthManager};
use crate::config::Config;

pub struct AppState {
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub product_service: Arc<dyn ProductServiceTrait>,
    pub upcoming_service: Arc<dyn UpcomingProductServiceTrait>,
    pub currency_service: Arc<dyn CurrencyServiceTrait>,
    pub language_service: Arc<dyn LanguageServiceTrait>,
    pub cart_service: Arc<dyn CartServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth: Option<Arc<AuthManager>>,
}

/// Installs the global subscriber. `SF_LOG_FORMAT=json` selects JSON output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("SF_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let fmt_layer = if json {
        fmt::layer().json().with_current_span(false).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let product_repo = Arc::new(ProductRepository::new(pool.clone(), writer.clone()));
    let upcoming_repo = Arc::new(UpcomingProductRepository::new(pool.clone(), writer.clone()));
    let currency_repo = Arc::new(CurrencyRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let language_repo = Arc::new(LanguageRepository::new(pool.clone()));
    let dashboard_repo = Arc::new(DashboardRepository::new(pool.clone()));

    let category_service: Arc<dyn CategoryServiceTrait> =
        Arc::new(CategoryService::new(category_repo));
    let language_service: Arc<dyn LanguageServiceTrait> =
        Arc::new(LanguageService::new(language_repo));
    let product_service: Arc<dyn ProductServiceTrait> = Arc::new(ProductService::new(
        product_repo,
        category_service.clone(),
        language_service.clone(),
    ));
    let upcoming_service: Arc<dyn UpcomingProductServiceTrait> =
        Arc::new(UpcomingProductService::new(upcoming_repo));
    let currency_service: Arc<dyn CurrencyServiceTrait> =
        Arc::new(CurrencyService::new(currency_repo));
    let cart_service: Arc<dyn CartServiceTrait> =
        Arc::new(CartService::new(product_service.clone()));
    let dashboard_service: Arc<dyn DashboardServiceTrait> = Arc::new(DashboardService::new(
        dashboard_repo,
        product_service.clone(),
    ));
    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repo));

    let auth = config.jwt_secret.as_ref().map(|secret| {
        Arc::new(AuthManager::new(&AuthConfig {
            jwt_secret: secret.clone(),
            access_token_ttl: config.token_ttl,
        }))
    });
    if auth.is_none() {
        tracing::warn!("SF_JWT_SECRET is not set; auth and admin routes are disabled");
    }

    match (&config.admin_email, &config.admin_password_hash) {
        (Some(email), Some(hash)) => {
            PasswordHash::new(hash)
                .map_err(|e| anyhow::anyhow!("Invalid SF_ADMIN_PASSWORD_HASH: {e}"))?;
            let admin = user_service.ensure_admin(email, hash).await?;
            tracing::info!("Admin account ready: {}", admin.email);
        }
        (Some(_), None) | (None, Some(_)) => {
            tracing::warn!(
                "Both SF_ADMIN_EMAIL and SF_ADMIN_PASSWORD_HASH are required to bootstrap an admin"
            );
        }
        (None, None) => {}
    }

    Ok(Arc::new(AppState {
        category_service,
        product_service,
        upcoming_service,
        currency_service,
        language_service,
        cart_service,
        dashboard_service,
        user_service,
        auth,
    }))
}
