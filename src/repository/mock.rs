//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::cliente::{Cliente, NewCliente, UpdateCliente};
use crate::domain::types::ClienteId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClienteListQuery, ClienteReader, ClienteWriter};

mock! {
    pub Repository {}

    impl ClienteReader for Repository {
        fn get_cliente_by_id(&self, id: ClienteId) -> RepositoryResult<Option<Cliente>>;
        fn get_cliente_by_cuit(&self, cuit: &str) -> RepositoryResult<Option<Cliente>>;
        fn get_cliente_by_email(&self, email: &str) -> RepositoryResult<Option<Cliente>>;
        fn list_clientes(&self, query: ClienteListQuery) -> RepositoryResult<(usize, Vec<Cliente>)>;
        fn search_clientes(&self, query: &str) -> RepositoryResult<Vec<Cliente>>;
    }

    impl ClienteWriter for Repository {
        fn create_cliente(&self, new_cliente: &NewCliente) -> RepositoryResult<Cliente>;
        fn update_cliente(
            &self,
            cliente_id: ClienteId,
            updates: &UpdateCliente,
        ) -> RepositoryResult<Cliente>;
        fn delete_cliente(&self, cliente_id: ClienteId) -> RepositoryResult<()>;
    }
}
