use crate::application::admin::CatalogEndpoints;
use crate::infra::db::PostgresRepositories;

#[derive(Clone)]
pub struct ApiState {
    pub catalogs: CatalogEndpoints,
    /// Present only when the catalogs are backed by Postgres.
    pub db: Option<PostgresRepositories>,
}
