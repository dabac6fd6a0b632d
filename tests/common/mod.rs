#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use tempfile::TempDir;

use clientes_service::db::{DbPool, establish_connection_pool, run_migrations};
use clientes_service::domain::cliente::{ClienteData, NewCliente};
use clientes_service::domain::types::{ClienteEmail, Cuit, MobilePhone, NonEmptyString};
use clientes_service::repository::DieselRepository;

/// Migrated SQLite database living in a temporary directory removed on drop.
pub struct TestDb {
    pool: DbPool,
    path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf8 path").to_string();

        let pool = establish_connection_pool(&url).expect("pool");
        run_migrations(&pool).expect("migrations");

        Self {
            pool,
            path,
            _dir: dir,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// Valid business fields; `n` keeps CUIT and email distinct across records.
pub fn sample_data(n: u32, apellido: &str) -> ClienteData {
    ClienteData {
        nombre: NonEmptyString::new("Juan").unwrap(),
        apellido: NonEmptyString::new(apellido).unwrap(),
        razon_social: NonEmptyString::new("Acme SA").unwrap(),
        cuit: Cuit::new(format!("20-{n:08}-9")).unwrap(),
        fecha_nacimiento: NaiveDate::from_ymd_opt(1985, 3, 14),
        telefono_celular: MobilePhone::new("11-12345678").unwrap(),
        email: ClienteEmail::new(format!("cliente{n}@example.com")).unwrap(),
    }
}

pub fn sample_new(n: u32, apellido: &str) -> NewCliente {
    NewCliente::new(sample_data(n, apellido), Utc::now().naive_utc())
}
