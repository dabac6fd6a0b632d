mod common;

use std::thread::sleep;
use std::time::Duration;

use chrono::Utc;
use diesel::RunQueryDsl;
use diesel::sql_types::Text;

use clientes_service::domain::cliente::UpdateCliente;
use clientes_service::domain::types::{ClienteEmail, ClienteId};
use clientes_service::models::cliente::Cliente as DbCliente;
use clientes_service::repository::cliente::SEARCH_CLIENTES_SQL;
use clientes_service::repository::errors::RepositoryError;
use clientes_service::repository::{ClienteListQuery, ClienteReader, ClienteWriter};

use common::{TestDb, sample_data, sample_new};

#[test]
fn create_then_read_back_by_every_key() {
    let test_db = TestDb::new("test_repo_create.db");
    let repo = test_db.repository();

    let created = repo.create_cliente(&sample_new(1, "Ovejero")).unwrap();
    assert_eq!(created.id.get(), 1);
    assert_eq!(created.fecha_creacion, created.fecha_modificacion);

    let by_id = repo.get_cliente_by_id(created.id).unwrap().unwrap();
    assert_eq!(by_id, created);

    let by_cuit = repo.get_cliente_by_cuit("20-00000001-9").unwrap().unwrap();
    assert_eq!(by_cuit.id, created.id);

    let by_email = repo
        .get_cliente_by_email("cliente1@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);

    assert!(repo.get_cliente_by_cuit("27-99999999-1").unwrap().is_none());
    assert!(
        repo.get_cliente_by_id(ClienteId::new(42).unwrap())
            .unwrap()
            .is_none()
    );
}

#[test]
fn update_keeps_creation_time_and_refreshes_modification_time() {
    let test_db = TestDb::new("test_repo_update.db");
    let repo = test_db.repository();

    let created = repo.create_cliente(&sample_new(1, "Ovejero")).unwrap();
    sleep(Duration::from_millis(5));

    let mut data = sample_data(1, "Ovejero");
    data.email = ClienteEmail::new("nuevo@example.com").unwrap();
    data.fecha_nacimiento = None;
    let updated = repo
        .update_cliente(created.id, &UpdateCliente::new(data, Utc::now().naive_utc()))
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fecha_creacion, created.fecha_creacion);
    assert!(updated.fecha_modificacion > created.fecha_modificacion);
    assert_eq!(updated.email, "nuevo@example.com");
    assert_eq!(updated.fecha_nacimiento, None);
}

#[test]
fn update_of_missing_row_is_not_found() {
    let test_db = TestDb::new("test_repo_update_missing.db");
    let repo = test_db.repository();

    let updates = UpdateCliente::new(sample_data(1, "Ovejero"), Utc::now().naive_utc());
    let result = repo.update_cliente(ClienteId::new(7).unwrap(), &updates);

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[test]
fn unique_indexes_reject_duplicates_by_column() {
    let test_db = TestDb::new("test_repo_unique.db");
    let repo = test_db.repository();
    repo.create_cliente(&sample_new(1, "Ovejero")).unwrap();

    let mut same_cuit = sample_new(2, "Perez");
    same_cuit.data.cuit = sample_data(1, "x").cuit;
    match repo.create_cliente(&same_cuit) {
        Err(RepositoryError::UniqueViolation(column)) => assert_eq!(column, "cuit"),
        other => panic!("expected cuit violation, got {other:?}"),
    }

    let mut same_email = sample_new(3, "Perez");
    same_email.data.email = sample_data(1, "x").email;
    match repo.create_cliente(&same_email) {
        Err(RepositoryError::UniqueViolation(column)) => assert_eq!(column, "email"),
        other => panic!("expected email violation, got {other:?}"),
    }
}

#[test]
fn delete_is_idempotent_and_ids_are_not_reused() {
    let test_db = TestDb::new("test_repo_delete.db");
    let repo = test_db.repository();

    let first = repo.create_cliente(&sample_new(1, "Ovejero")).unwrap();
    repo.delete_cliente(first.id).unwrap();
    repo.delete_cliente(first.id).unwrap();

    assert!(repo.get_cliente_by_id(first.id).unwrap().is_none());

    let second = repo.create_cliente(&sample_new(2, "Perez")).unwrap();
    assert!(second.id.get() > first.id.get());
}

#[test]
fn list_pages_in_id_order_with_total() {
    let test_db = TestDb::new("test_repo_list.db");
    let repo = test_db.repository();
    for n in 1..=15 {
        repo.create_cliente(&sample_new(n, "Ovejero")).unwrap();
    }

    let (total, first) = repo
        .list_clientes(ClienteListQuery::new().paginate(0, 10))
        .unwrap();
    assert_eq!(total, 15);
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].id.get(), 1);

    let (_, second) = repo
        .list_clientes(ClienteListQuery::new().paginate(1, 10))
        .unwrap();
    assert_eq!(second.len(), 5);
    assert_eq!(second[0].id.get(), 11);

    let (_, beyond) = repo
        .list_clientes(ClienteListQuery::new().paginate(5, 10))
        .unwrap();
    assert!(beyond.is_empty());

    let (_, all) = repo.list_clientes(ClienteListQuery::new()).unwrap();
    assert_eq!(all.len(), 15);
}

#[test]
fn search_matches_surname_case_insensitively() {
    let test_db = TestDb::new("test_repo_search.db");
    let repo = test_db.repository();
    repo.create_cliente(&sample_new(1, "Ovejero")).unwrap();
    repo.create_cliente(&sample_new(2, "Perez")).unwrap();
    repo.create_cliente(&sample_new(3, "Ovelar")).unwrap();

    let matches = repo.search_clientes("OVE").unwrap();
    let apellidos: Vec<_> = matches.iter().map(|c| c.apellido.as_str()).collect();
    assert_eq!(apellidos, ["Ovejero", "Ovelar"]);

    assert!(repo.search_clientes("gomez").unwrap().is_empty());
    assert_eq!(repo.search_clientes("").unwrap().len(), 3);
}

#[test]
fn search_folds_ascii_case_only() {
    let test_db = TestDb::new("test_repo_search_unicode.db");
    let repo = test_db.repository();
    repo.create_cliente(&sample_new(1, "Núñez")).unwrap();

    assert_eq!(repo.search_clientes("nú").unwrap().len(), 1);
    assert_eq!(repo.search_clientes("Núñ").unwrap().len(), 1);
    assert!(repo.search_clientes("NÚÑ").unwrap().is_empty());
}

#[test]
fn search_query_runs_directly_against_the_table() {
    let test_db = TestDb::new("test_repo_search_sql.db");
    let repo = test_db.repository();
    repo.create_cliente(&sample_new(1, "Gonzalez")).unwrap();

    let mut conn = test_db.pool().get().unwrap();
    let rows: Vec<DbCliente> = diesel::sql_query(SEARCH_CLIENTES_SQL)
        .bind::<Text, _>("gonz")
        .load(&mut conn)
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].apellido, "Gonzalez");
}
