use serde::{Deserialize, Serialize};

/// One row of the `players` table, minus the server-assigned
/// `created_at`/`updated_at` columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub shortname: String,
    pub sex: String,
    pub rank: i32,
    pub points: i32,
    /// Body weight in grams.
    pub weight: i32,
    /// Height in centimeters.
    pub height: i32,
    pub age: i32,
    /// Recent match outcomes, newest first; 1 = win, 0 = loss.
    pub last: Vec<u8>,
    pub countrycode: String,
    pub countrypicture: String,
    pub picture: String,
}
