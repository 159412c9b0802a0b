use crate::schema::users;
use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    #[diesel(column_name = password)]
    pub password_hash: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub username: String,
    /// PHC-encoded argon2 hash, never the plaintext.
    #[diesel(column_name = password)]
    pub password_hash: String,
}
