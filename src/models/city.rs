use serde::{Deserialize, Serialize};

/// A city as the API serves it. `nombre_departamento` comes from a left
/// join, so both department fields stay null when the city has no parent.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct City {
    pub id_ciudad: i32,
    pub nombre: String,
    pub id_departamento: Option<i32>,
    pub nombre_departamento: Option<String>,
}
