use diesel::prelude::*;
use diesel::sql_types::Text;

use crate::{
    db::get_connection,
    domain::{
        cliente::{Cliente, NewCliente, UpdateCliente},
        types::ClienteId,
    },
    models::cliente::{
        Cliente as DbCliente, NewCliente as DbNewCliente, UpdateCliente as DbUpdateCliente,
    },
    repository::{
        ClienteListQuery, ClienteReader, ClienteWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::clientes,
};

/// Store-side surname search: substring match on `apellido`.
///
/// SQLite's `LIKE` folds case for ASCII letters only, so `NUÑ` finds `Nuñez`
/// but `NÚÑ` does not find `Núñez`.
pub const SEARCH_CLIENTES_SQL: &str = "SELECT * FROM clientes \
     WHERE apellido LIKE '%' || ? || '%' COLLATE NOCASE \
     ORDER BY apellido, id";

fn into_domain(rows: Vec<DbCliente>) -> RepositoryResult<Vec<Cliente>> {
    rows.into_iter()
        .map(|row| Cliente::try_from(row).map_err(RepositoryError::from))
        .collect()
}

fn to_i64(value: usize) -> RepositoryResult<i64> {
    i64::try_from(value)
        .map_err(|_| RepositoryError::ValidationError(format!("value out of range: {value}")))
}

impl ClienteReader for DieselRepository {
    fn get_cliente_by_id(&self, id: ClienteId) -> RepositoryResult<Option<Cliente>> {
        let mut conn = get_connection(self.pool())?;
        let cliente = clientes::table
            .find(id.get())
            .first::<DbCliente>(&mut conn)
            .optional()?;

        cliente.map(Cliente::try_from).transpose().map_err(Into::into)
    }

    fn get_cliente_by_cuit(&self, cuit: &str) -> RepositoryResult<Option<Cliente>> {
        let mut conn = get_connection(self.pool())?;
        let cliente = clientes::table
            .filter(clientes::cuit.eq(cuit))
            .first::<DbCliente>(&mut conn)
            .optional()?;

        cliente.map(Cliente::try_from).transpose().map_err(Into::into)
    }

    fn get_cliente_by_email(&self, email: &str) -> RepositoryResult<Option<Cliente>> {
        let mut conn = get_connection(self.pool())?;
        let cliente = clientes::table
            .filter(clientes::email.eq(email))
            .first::<DbCliente>(&mut conn)
            .optional()?;

        cliente.map(Cliente::try_from).transpose().map_err(Into::into)
    }

    fn list_clientes(&self, query: ClienteListQuery) -> RepositoryResult<(usize, Vec<Cliente>)> {
        let mut conn = get_connection(self.pool())?;

        let total: i64 = clientes::table.count().get_result(&mut conn)?;

        let mut items = clientes::table.order(clientes::id.asc()).into_boxed();

        if let Some(pagination) = &query.pagination {
            items = items
                .limit(to_i64(pagination.per_page)?)
                .offset(to_i64(pagination.offset())?);
        }

        let rows = items.load::<DbCliente>(&mut conn)?;
        let total = usize::try_from(total)
            .map_err(|_| RepositoryError::Unexpected(format!("negative row count: {total}")))?;

        Ok((total, into_domain(rows)?))
    }

    fn search_clientes(&self, query: &str) -> RepositoryResult<Vec<Cliente>> {
        let mut conn = get_connection(self.pool())?;

        let rows = diesel::sql_query(SEARCH_CLIENTES_SQL)
            .bind::<Text, _>(query)
            .load::<DbCliente>(&mut conn)?;

        into_domain(rows)
    }
}

impl ClienteWriter for DieselRepository {
    fn create_cliente(&self, new_cliente: &NewCliente) -> RepositoryResult<Cliente> {
        let mut conn = get_connection(self.pool())?;
        let insertable: DbNewCliente = new_cliente.into();

        let created = diesel::insert_into(clientes::table)
            .values(&insertable)
            .get_result::<DbCliente>(&mut conn)?;

        Ok(Cliente::try_from(created)?)
    }

    fn update_cliente(
        &self,
        cliente_id: ClienteId,
        updates: &UpdateCliente,
    ) -> RepositoryResult<Cliente> {
        let mut conn = get_connection(self.pool())?;
        let changes: DbUpdateCliente = updates.into();

        let updated = diesel::update(clientes::table.find(cliente_id.get()))
            .set(&changes)
            .get_result::<DbCliente>(&mut conn)?;

        Ok(Cliente::try_from(updated)?)
    }

    fn delete_cliente(&self, cliente_id: ClienteId) -> RepositoryResult<()> {
        let mut conn = get_connection(self.pool())?;

        diesel::delete(clientes::table.find(cliente_id.get())).execute(&mut conn)?;
        Ok(())
    }
}
