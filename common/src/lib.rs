//! CLOMonitor Common Library
//!
//! Web(WASM)とCLIで共有される型とユーティリティ

pub mod anchor;
pub mod api;
pub mod checks;
pub mod error;
pub mod migrations;
pub mod prefs;
pub mod query;
pub mod routes;
pub mod score;
pub mod store;
pub mod theme;
pub mod types;

pub use anchor::get_anchor_value;
pub use api::{ApiContent, ApiError, ErrorKind};
pub use error::{Error, Result, StorageError};
pub use migrations::{apply_migrations, Migration, MIGRATIONS};
pub use prefs::{
    ConfiguredTheme, EffectiveTheme, LocalPrefs, MemoryStorage, Prefs, PrefsList, PrefsStorage,
};
#[cfg(not(target_arch = "wasm32"))]
pub use prefs::FileStorage;
pub use query::{
    build_search_params, prepare_api_query_string, prepare_query_string, FilterKind, FilterMap,
    Pagination, SearchFilters, SearchQuery, SortBy, SortDirection,
};
pub use routes::Route;
pub use score::{get_category_color, rating_for_score, Rating, RepositoryKind, ScoreColor, ScoreType};
pub use store::{app_reducer, Action, AppState, NoopEffects, Store, StoreEffects};
pub use theme::ThemeColorSet;
pub use types::{Project, ProjectDetail, SearchResults, Stats};
