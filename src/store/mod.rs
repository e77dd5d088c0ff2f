use async_trait::async_trait;

use crate::models::city::City;
use crate::models::department::Department;

pub mod postgres;

#[cfg(test)]
pub mod fake;

/// Outcome of the guarded department deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentDelete {
    Deleted,
    Missing,
    HasCities,
}

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Department>, sqlx::Error>;
    async fn get(&self, id: i32) -> Result<Option<Department>, sqlx::Error>;
    async fn search(&self, fragment: &str) -> Result<Vec<Department>, sqlx::Error>;
    async fn create(&self, nombre: &str) -> Result<i32, sqlx::Error>;
    /// Returns the number of rows the update touched.
    async fn update(&self, id: i32, nombre: &str) -> Result<u64, sqlx::Error>;
    /// Counts dependent cities and deletes within one transaction.
    async fn delete(&self, id: i32) -> Result<DepartmentDelete, sqlx::Error>;
}

#[async_trait]
pub trait CityStore: Send + Sync {
    async fn list(&self) -> Result<Vec<City>, sqlx::Error>;
    async fn get(&self, id: i32) -> Result<Option<City>, sqlx::Error>;
    async fn list_by_department(&self, id_departamento: i32) -> Result<Vec<City>, sqlx::Error>;
    async fn search(&self, fragment: &str) -> Result<Vec<City>, sqlx::Error>;
    async fn create(&self, nombre: &str, id_departamento: Option<i32>) -> Result<i32, sqlx::Error>;
    async fn update(
        &self,
        id: i32,
        nombre: &str,
        id_departamento: Option<i32>,
    ) -> Result<u64, sqlx::Error>;
    async fn delete(&self, id: i32) -> Result<u64, sqlx::Error>;
}
