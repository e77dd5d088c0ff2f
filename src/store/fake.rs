use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CityStore, DepartmentDelete, DepartmentStore};
use crate::models::city::City;
use crate::models::department::Department;

/// A city row as stored, before the join resolves the department name.
#[derive(Debug, Clone)]
pub struct CityRow {
    pub id_ciudad: i32,
    pub nombre: String,
    pub id_departamento: Option<i32>,
}

/// In-memory stand-in for the Postgres store so handler tests run without a
/// database. Listings come back name-ordered and city reads resolve the
/// department name the way the SQL left join does.
#[derive(Default)]
pub struct FakeStore {
    pub departamentos: Mutex<Vec<Department>>,
    pub ciudades: Mutex<Vec<CityRow>>,
    failing: AtomicBool,
}

impl FakeStore {
    /// When set, every store call fails like a dropped connection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn department_count(&self) -> usize {
        self.departamentos.lock().unwrap().len()
    }

    pub fn city_count(&self) -> usize {
        self.ciudades.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolClosed)
        } else {
            Ok(())
        }
    }

    fn join(&self, row: &CityRow) -> City {
        let departamentos = self.departamentos.lock().unwrap();
        let nombre_departamento = row.id_departamento.and_then(|id| {
            departamentos
                .iter()
                .find(|d| d.id_departamento == id)
                .map(|d| d.nombre.clone())
        });
        City {
            id_ciudad: row.id_ciudad,
            nombre: row.nombre.clone(),
            id_departamento: row.id_departamento,
            nombre_departamento,
        }
    }

    fn joined_sorted(&self, rows: Vec<CityRow>) -> Vec<City> {
        let mut cities: Vec<City> = rows.iter().map(|r| self.join(r)).collect();
        cities.sort_by(|a, b| a.nombre.cmp(&b.nombre));
        cities
    }
}

#[async_trait]
impl DepartmentStore for FakeStore {
    async fn list(&self) -> Result<Vec<Department>, sqlx::Error> {
        self.check()?;
        let mut departamentos = self.departamentos.lock().unwrap().clone();
        departamentos.sort_by(|a, b| a.nombre.cmp(&b.nombre));
        Ok(departamentos)
    }

    async fn get(&self, id: i32) -> Result<Option<Department>, sqlx::Error> {
        self.check()?;
        Ok(self
            .departamentos
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id_departamento == id)
            .cloned())
    }

    async fn search(&self, fragment: &str) -> Result<Vec<Department>, sqlx::Error> {
        self.check()?;
        let mut matches: Vec<Department> = self
            .departamentos
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.nombre.contains(fragment))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.nombre.cmp(&b.nombre));
        Ok(matches)
    }

    async fn create(&self, nombre: &str) -> Result<i32, sqlx::Error> {
        self.check()?;
        let mut departamentos = self.departamentos.lock().unwrap();
        let id = departamentos
            .iter()
            .map(|d| d.id_departamento)
            .max()
            .unwrap_or(0)
            + 1;
        departamentos.push(Department {
            id_departamento: id,
            nombre: nombre.to_string(),
        });
        Ok(id)
    }

    async fn update(&self, id: i32, nombre: &str) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut departamentos = self.departamentos.lock().unwrap();
        match departamentos.iter_mut().find(|d| d.id_departamento == id) {
            Some(d) => {
                d.nombre = nombre.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> Result<DepartmentDelete, sqlx::Error> {
        self.check()?;
        let dependents = self
            .ciudades
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.id_departamento == Some(id))
            .count();
        if dependents > 0 {
            return Ok(DepartmentDelete::HasCities);
        }
        let mut departamentos = self.departamentos.lock().unwrap();
        let before = departamentos.len();
        departamentos.retain(|d| d.id_departamento != id);
        if departamentos.len() == before {
            Ok(DepartmentDelete::Missing)
        } else {
            Ok(DepartmentDelete::Deleted)
        }
    }
}

#[async_trait]
impl CityStore for FakeStore {
    async fn list(&self) -> Result<Vec<City>, sqlx::Error> {
        self.check()?;
        let rows = self.ciudades.lock().unwrap().clone();
        Ok(self.joined_sorted(rows))
    }

    async fn get(&self, id: i32) -> Result<Option<City>, sqlx::Error> {
        self.check()?;
        let row = self
            .ciudades
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id_ciudad == id)
            .cloned();
        Ok(row.map(|r| self.join(&r)))
    }

    async fn list_by_department(&self, id_departamento: i32) -> Result<Vec<City>, sqlx::Error> {
        self.check()?;
        let rows: Vec<CityRow> = self
            .ciudades
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.id_departamento == Some(id_departamento))
            .cloned()
            .collect();
        Ok(self.joined_sorted(rows))
    }

    async fn search(&self, fragment: &str) -> Result<Vec<City>, sqlx::Error> {
        self.check()?;
        let rows: Vec<CityRow> = self
            .ciudades
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.nombre.contains(fragment))
            .cloned()
            .collect();
        Ok(self.joined_sorted(rows))
    }

    async fn create(&self, nombre: &str, id_departamento: Option<i32>) -> Result<i32, sqlx::Error> {
        self.check()?;
        let mut ciudades = self.ciudades.lock().unwrap();
        let id = ciudades.iter().map(|c| c.id_ciudad).max().unwrap_or(0) + 1;
        ciudades.push(CityRow {
            id_ciudad: id,
            nombre: nombre.to_string(),
            id_departamento,
        });
        Ok(id)
    }

    async fn update(
        &self,
        id: i32,
        nombre: &str,
        id_departamento: Option<i32>,
    ) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut ciudades = self.ciudades.lock().unwrap();
        match ciudades.iter_mut().find(|c| c.id_ciudad == id) {
            Some(c) => {
                c.nombre = nombre.to_string();
                c.id_departamento = id_departamento;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut ciudades = self.ciudades.lock().unwrap();
        let before = ciudades.len();
        ciudades.retain(|c| c.id_ciudad != id);
        Ok((before - ciudades.len()) as u64)
    }
}
