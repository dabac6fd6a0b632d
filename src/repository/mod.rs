use crate::{
    db::DbPool,
    domain::{
        cliente::{Cliente, NewCliente, UpdateCliente},
        types::ClienteId,
    },
    repository::errors::RepositoryResult,
};

pub mod cliente;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index.
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows to skip before the requested page.
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.per_page)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClienteListQuery {
    pub pagination: Option<Pagination>,
}

impl ClienteListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read side of the cliente store.
pub trait ClienteReader {
    fn get_cliente_by_id(&self, id: ClienteId) -> RepositoryResult<Option<Cliente>>;
    fn get_cliente_by_cuit(&self, cuit: &str) -> RepositoryResult<Option<Cliente>>;
    fn get_cliente_by_email(&self, email: &str) -> RepositoryResult<Option<Cliente>>;
    /// Returns the total number of clientes together with the requested page.
    fn list_clientes(&self, query: ClienteListQuery) -> RepositoryResult<(usize, Vec<Cliente>)>;
    /// Runs the store-side text search, returning every match.
    fn search_clientes(&self, query: &str) -> RepositoryResult<Vec<Cliente>>;
}

/// Write side of the cliente store.
pub trait ClienteWriter {
    fn create_cliente(&self, new_cliente: &NewCliente) -> RepositoryResult<Cliente>;
    fn update_cliente(
        &self,
        cliente_id: ClienteId,
        updates: &UpdateCliente,
    ) -> RepositoryResult<Cliente>;
    /// Removes the row if present; deleting an absent id is not an error.
    fn delete_cliente(&self, cliente_id: ClienteId) -> RepositoryResult<()>;
}

/// Diesel-backed repository sharing a single connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
