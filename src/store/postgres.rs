use async_trait::async_trait;
use sqlx::PgPool;

use super::{CityStore, DepartmentDelete, DepartmentStore};
use crate::models::city::City;
use crate::models::department::Department;

/// Postgres-backed store. Every statement binds its values as parameters;
/// no user input is ever spliced into the SQL text.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentStore for PgStore {
    async fn list(&self) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            "SELECT id_departamento, nombre FROM departamentos ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get(&self, id: i32) -> Result<Option<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            "SELECT id_departamento, nombre FROM departamentos WHERE id_departamento = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn search(&self, fragment: &str) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            "SELECT id_departamento, nombre FROM departamentos WHERE nombre LIKE $1 ORDER BY nombre",
        )
        .bind(format!("%{}%", fragment))
        .fetch_all(&self.pool)
        .await
    }

    async fn create(&self, nombre: &str) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO departamentos (nombre) VALUES ($1) RETURNING id_departamento",
        )
        .bind(nombre)
        .fetch_one(&self.pool)
        .await
    }

    async fn update(&self, id: i32, nombre: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE departamentos SET nombre = $1 WHERE id_departamento = $2")
            .bind(nombre)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<DepartmentDelete, sqlx::Error> {
        // The count and the delete share one transaction so a city inserted
        // concurrently cannot land between the check and the delete.
        let mut tx = self.pool.begin().await?;

        let cities: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ciudades WHERE id_departamento = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if cities > 0 {
            return Ok(DepartmentDelete::HasCities);
        }

        let result = sqlx::query("DELETE FROM departamentos WHERE id_departamento = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            Ok(DepartmentDelete::Missing)
        } else {
            Ok(DepartmentDelete::Deleted)
        }
    }
}

#[async_trait]
impl CityStore for PgStore {
    async fn list(&self) -> Result<Vec<City>, sqlx::Error> {
        sqlx::query_as::<_, City>(
            "SELECT c.id_ciudad, c.nombre, c.id_departamento, d.nombre AS nombre_departamento \
             FROM ciudades c \
             LEFT JOIN departamentos d ON c.id_departamento = d.id_departamento \
             ORDER BY c.nombre",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get(&self, id: i32) -> Result<Option<City>, sqlx::Error> {
        sqlx::query_as::<_, City>(
            "SELECT c.id_ciudad, c.nombre, c.id_departamento, d.nombre AS nombre_departamento \
             FROM ciudades c \
             LEFT JOIN departamentos d ON c.id_departamento = d.id_departamento \
             WHERE c.id_ciudad = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_by_department(&self, id_departamento: i32) -> Result<Vec<City>, sqlx::Error> {
        sqlx::query_as::<_, City>(
            "SELECT c.id_ciudad, c.nombre, c.id_departamento, d.nombre AS nombre_departamento \
             FROM ciudades c \
             LEFT JOIN departamentos d ON c.id_departamento = d.id_departamento \
             WHERE c.id_departamento = $1 \
             ORDER BY c.nombre",
        )
        .bind(id_departamento)
        .fetch_all(&self.pool)
        .await
    }

    async fn search(&self, fragment: &str) -> Result<Vec<City>, sqlx::Error> {
        sqlx::query_as::<_, City>(
            "SELECT c.id_ciudad, c.nombre, c.id_departamento, d.nombre AS nombre_departamento \
             FROM ciudades c \
             LEFT JOIN departamentos d ON c.id_departamento = d.id_departamento \
             WHERE c.nombre LIKE $1 \
             ORDER BY c.nombre",
        )
        .bind(format!("%{}%", fragment))
        .fetch_all(&self.pool)
        .await
    }

    async fn create(&self, nombre: &str, id_departamento: Option<i32>) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO ciudades (nombre, id_departamento) VALUES ($1, $2) RETURNING id_ciudad",
        )
        .bind(nombre)
        .bind(id_departamento)
        .fetch_one(&self.pool)
        .await
    }

    async fn update(
        &self,
        id: i32,
        nombre: &str,
        id_departamento: Option<i32>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE ciudades SET nombre = $1, id_departamento = $2 WHERE id_ciudad = $3",
        )
        .bind(nombre)
        .bind(id_departamento)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ciudades WHERE id_ciudad = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
